use std::fmt::{Debug, Display};

use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    alphabet::Alphabet,
    id::{ScalarIdType, StateIndex, SymbolIndex},
    math::OrderedSet,
    Label,
};

use super::builder::DfaBuilder;

/// A deterministic finite automaton (DFA). It consists of a non-empty, ordered collection of
/// states, an [`Alphabet`], a designated initial state, a set of accepting states and a total
/// transition function. A finite word is accepted if the run on it ends in an accepting state.
///
/// Values of this type are immutable and can only be obtained through a [`DfaBuilder`] (which
/// validates the raw parts) or as the output of one of the pipeline stages, so the transition
/// function is guaranteed to be total and deterministic.
///
/// States are labelled with values of type `Q` and interned into dense [`StateIndex`]es in the
/// order of their declaration, the same holds for symbols of type `S`. The transition table is
/// stored row by row, i.e. the successor of state `q` on symbol `a` is found at position
/// `q * |alphabet| + a`.
///
/// # Example
/// ```
/// use automata_min::Dfa;
///
/// let dfa = Dfa::builder()
///     .with_states(["even", "odd"])
///     .with_alphabet(['a'])
///     .with_initial("even")
///     .with_accepting(["even"])
///     .with_transitions([("even", 'a', "odd"), ("odd", 'a', "even")])
///     .build()
///     .unwrap();
/// assert!(dfa.accepts(&['a', 'a']));
/// assert!(!dfa.accepts(&['a']));
/// ```
#[derive(Clone)]
pub struct Dfa<Q: Label = String, S: Label = char> {
    pub(crate) states: OrderedSet<Q>,
    pub(crate) alphabet: Alphabet<S>,
    pub(crate) initial: StateIndex,
    pub(crate) accepting: BitSet,
    pub(crate) transitions: Vec<StateIndex>,
}

impl<Q: Label, S: Label> Dfa<Q, S> {
    /// Returns an empty [`DfaBuilder`].
    pub fn builder() -> DfaBuilder<Q, S> {
        DfaBuilder::default()
    }

    /// Assembles a DFA from already interned parts. The caller guarantees that `transitions`
    /// has exactly one entry for every pair of state and symbol and that all entries as well
    /// as `initial` and `accepting` point to existing states.
    pub(crate) fn from_parts(
        states: OrderedSet<Q>,
        alphabet: Alphabet<S>,
        initial: StateIndex,
        accepting: BitSet,
        transitions: Vec<StateIndex>,
    ) -> Self {
        debug_assert_eq!(transitions.len(), states.len() * alphabet.size());
        debug_assert!(initial.into_usize() < states.len());
        debug_assert!(transitions.iter().all(|q| q.into_usize() < states.len()));
        Self {
            states,
            alphabet,
            initial,
            accepting,
            transitions,
        }
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Gives a reference to the alphabet.
    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// Returns the index of the initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Returns the label of the initial state.
    pub fn initial_label(&self) -> &Q {
        self.label(self.initial)
    }

    /// Iterates over the indices of all states, in declaration order.
    pub fn state_indices(&self) -> impl Iterator<Item = StateIndex> {
        (0..self.size()).map(StateIndex::from_usize)
    }

    /// Iterates over the labels of all states, in declaration order.
    pub fn state_labels(&self) -> impl Iterator<Item = &Q> + '_ {
        self.states.iter()
    }

    /// Returns the label of the state with index `q`, or `None` if no such state exists.
    pub fn state_label(&self, q: StateIndex) -> Option<&Q> {
        self.states.get_index(q.into_usize())
    }

    /// Looks up the index of the state labelled `label`.
    pub fn state_index(&self, label: &Q) -> Option<StateIndex> {
        self.states.get_index_of(label).map(StateIndex::from_usize)
    }

    /// Returns true if the state with index `q` is accepting.
    pub fn is_accepting(&self, q: StateIndex) -> bool {
        self.accepting.contains(q.into_usize())
    }

    /// Returns the indices of all states that are accepting.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.accepting.iter().map(StateIndex::from_usize)
    }

    /// Returns the indices of all states that are rejecting.
    pub fn rejecting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|q| !self.is_accepting(*q))
    }

    /// Returns the labels of all accepting states.
    pub fn accepting_labels(&self) -> impl Iterator<Item = &Q> + '_ {
        self.accepting_states().map(|q| self.label(q))
    }

    /// Returns the successor of `q` on the symbol with index `a`. Panics if either index
    /// is out of range.
    pub fn successor(&self, q: StateIndex, a: SymbolIndex) -> StateIndex {
        assert!(a.into_usize() < self.alphabet.size(), "symbol index out of range");
        self.transitions[q.into_usize() * self.alphabet.size() + a.into_usize()]
    }

    /// Returns the successor of `q` on `symbol`, or `None` if `symbol` does not belong to the
    /// alphabet or `q` does not exist.
    pub fn successor_by_symbol(&self, q: StateIndex, symbol: &S) -> Option<StateIndex> {
        if q.into_usize() >= self.size() {
            return None;
        }
        let a = self.alphabet.index_of(symbol)?;
        Some(self.successor(q, a))
    }

    /// Runs `word` from the state `origin` and returns the state that is reached. If the word
    /// contains a symbol that is not in the alphabet, `None` is returned.
    pub fn run_from<'a, W>(&self, origin: StateIndex, word: W) -> Option<StateIndex>
    where
        W: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        word.into_iter()
            .try_fold(origin, |q, sym| self.successor_by_symbol(q, sym))
    }

    /// Runs `word` from the initial state, see [`Self::run_from`].
    pub fn run<'a, W>(&self, word: W) -> Option<StateIndex>
    where
        W: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        self.run_from(self.initial, word)
    }

    /// Returns true if `word` is accepted. Words containing symbols outside of the alphabet
    /// are never accepted.
    pub fn accepts<'a, W>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        self.run(word).is_some_and(|q| self.is_accepting(q))
    }

    /// Translates a sequence of symbol indices into the corresponding symbols.
    pub fn symbols_of(&self, word: &[SymbolIndex]) -> Vec<S> {
        word.iter()
            .map(|a| self.alphabet.symbol_unchecked(*a).clone())
            .collect()
    }

    /// Returns a string representation of the transition table. The initial state is marked
    /// with `->` and accepting states with `*`.
    pub fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.symbols().map(|s| s.to_string())),
        );
        for q in self.state_indices() {
            let mut row = vec![self.decorated_label(q)];
            for a in self.alphabet.indices() {
                row.push(self.label(self.successor(q, a)).to_string());
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    fn decorated_label(&self, q: StateIndex) -> String {
        format!(
            "{}{}{}",
            if q == self.initial { "->" } else { "" },
            if self.is_accepting(q) { "*" } else { "" },
            self.label(q)
        )
    }

    pub(crate) fn label(&self, q: StateIndex) -> &Q {
        &self.states[q.into_usize()]
    }
}

impl<Q: Label, S: Label> PartialEq for Dfa<Q, S> {
    fn eq(&self, other: &Self) -> bool {
        self.states.iter().eq(other.states.iter())
            && self.alphabet == other.alphabet
            && self.initial == other.initial
            && self.accepting == other.accepting
            && self.transitions == other.transitions
    }
}
impl<Q: Label, S: Label> Eq for Dfa<Q, S> {}

impl<Q: Label, S: Label> Debug for Dfa<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DFA with initial state {:?} and accepting states {{{}}}\n{}",
            self.initial_label(),
            self.accepting_labels().map(|q| format!("{q:?}")).join(", "),
            self.transition_table()
        )
    }
}

impl<Q: Label, S: Label> Display for Dfa<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.transition_table())
    }
}
