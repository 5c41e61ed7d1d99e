use bit_set::BitSet;
use itertools::Itertools;
use tracing::trace;

use crate::{
    alphabet::Alphabet,
    error::MalformedAutomaton,
    id::{ScalarIdType, StateIndex, SymbolIndex},
    math::OrderedSet,
    Label,
};

use super::Dfa;

/// Helper struct for the construction of a [`Dfa`] from raw enumerations. It collects the
/// declared states, symbols, initial and accepting states as well as the transition entries
/// and validates all of them at once in [`DfaBuilder::build`].
///
/// Each transition entry carries a list of target states, which mirrors input models where a
/// cell of the transition table may name several targets. Only entries with exactly one target
/// describe a deterministic transition, see [`DfaBuilder::with_transition_targets`].
///
/// # Example
/// ```
/// use automata_min::{Dfa, MalformedAutomaton};
///
/// let missing = Dfa::builder()
///     .with_states([0, 1])
///     .with_alphabet(['a'])
///     .with_initial(0)
///     .with_accepting([1])
///     .with_transitions([(0, 'a', 1)])
///     .build();
/// assert!(matches!(missing, Err(MalformedAutomaton::MissingTransition { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct DfaBuilder<Q: Label, S: Label> {
    states: Vec<Q>,
    symbols: Vec<S>,
    initial: Option<Q>,
    accepting: Vec<Q>,
    transitions: Vec<(Q, S, Vec<Q>)>,
}

impl<Q: Label, S: Label> Default for DfaBuilder<Q, S> {
    fn default() -> Self {
        Self {
            states: vec![],
            symbols: vec![],
            initial: None,
            accepting: vec![],
            transitions: vec![],
        }
    }
}

impl<Q: Label, S: Label> DfaBuilder<Q, S> {
    /// Declares the given states, in order. Can be called repeatedly.
    pub fn with_states<I: IntoIterator<Item = Q>>(mut self, states: I) -> Self {
        self.states.extend(states);
        self
    }

    /// Declares the given alphabet symbols, in order. Can be called repeatedly.
    pub fn with_alphabet<I: IntoIterator<Item = S>>(mut self, symbols: I) -> Self {
        self.symbols.extend(symbols);
        self
    }

    /// Sets the initial state, overwriting a previously set one.
    pub fn with_initial(mut self, initial: Q) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Marks the given states as accepting. Repetitions are harmless.
    pub fn with_accepting<I: IntoIterator<Item = Q>>(mut self, accepting: I) -> Self {
        self.accepting.extend(accepting);
        self
    }

    /// Adds a single deterministic transition from `from` on `symbol` to `to`.
    pub fn with_transition(self, from: Q, symbol: S, to: Q) -> Self {
        self.with_transition_targets(from, symbol, [to])
    }

    /// Adds a list of `(from, symbol, to)` transitions.
    pub fn with_transitions<I: IntoIterator<Item = (Q, S, Q)>>(self, transitions: I) -> Self {
        transitions
            .into_iter()
            .fold(self, |acc, (from, symbol, to)| acc.with_transition(from, symbol, to))
    }

    /// Adds a raw transition entry that lists an arbitrary number of targets for the pair
    /// `(from, symbol)`. An empty list declares nothing, a list with more than one distinct
    /// target makes the pair non-deterministic and [`DfaBuilder::build`] rejects it.
    pub fn with_transition_targets<I: IntoIterator<Item = Q>>(
        mut self,
        from: Q,
        symbol: S,
        targets: I,
    ) -> Self {
        self.transitions
            .push((from, symbol, targets.into_iter().collect()));
        self
    }

    /// Validates the collected parts and produces a [`Dfa`]. Fails with a
    /// [`MalformedAutomaton`] if
    /// - no state is declared, or some state is declared twice,
    /// - the alphabet is empty or contains duplicates,
    /// - the initial state is missing or not declared,
    /// - no accepting state is given, or an accepting state is not declared,
    /// - a transition mentions an undeclared state or symbol,
    /// - some pair of state and symbol has no target or more than one distinct target.
    pub fn build(self) -> Result<Dfa<Q, S>, MalformedAutomaton> {
        if self.states.is_empty() {
            return Err(MalformedAutomaton::NoStates);
        }
        let mut states = OrderedSet::default();
        for q in self.states {
            if states.contains(&q) {
                return Err(MalformedAutomaton::DuplicateState(format!("{q:?}")));
            }
            states.insert(q);
        }
        let alphabet = Alphabet::new(self.symbols)?;
        let lookup = |q: &Q| states.get_index_of(q).map(StateIndex::from_usize);

        let initial = match self.initial {
            None => return Err(MalformedAutomaton::MissingInitialState),
            Some(q) => lookup(&q)
                .ok_or_else(|| MalformedAutomaton::UnknownInitialState(format!("{q:?}")))?,
        };

        if self.accepting.is_empty() {
            return Err(MalformedAutomaton::NoAcceptingStates);
        }
        let mut accepting = BitSet::with_capacity(states.len());
        for q in &self.accepting {
            let idx = lookup(q)
                .ok_or_else(|| MalformedAutomaton::UnknownAcceptingState(format!("{q:?}")))?;
            accepting.insert(idx.into_usize());
        }

        let width = alphabet.size();
        let mut cells: Vec<Vec<StateIndex>> = vec![vec![]; states.len() * width];
        for (from, symbol, targets) in &self.transitions {
            let q = lookup(from)
                .ok_or_else(|| MalformedAutomaton::UnknownState(format!("{from:?}")))?;
            let a = alphabet
                .index_of(symbol)
                .ok_or_else(|| MalformedAutomaton::UnknownSymbol(format!("{symbol:?}")))?;
            let cell = &mut cells[q.into_usize() * width + a.into_usize()];
            for target in targets {
                let p = lookup(target)
                    .ok_or_else(|| MalformedAutomaton::UnknownState(format!("{target:?}")))?;
                if !cell.contains(&p) {
                    cell.push(p);
                }
            }
        }

        let mut transitions = Vec::with_capacity(cells.len());
        for (position, cell) in cells.into_iter().enumerate() {
            let state = || format!("{:?}", states[position / width]);
            let symbol = || {
                let a = SymbolIndex::from_usize(position % width);
                format!("{:?}", alphabet.symbol_unchecked(a))
            };
            match cell.as_slice() {
                [target] => transitions.push(*target),
                [] => {
                    return Err(MalformedAutomaton::MissingTransition {
                        state: state(),
                        symbol: symbol(),
                    })
                }
                targets => {
                    return Err(MalformedAutomaton::NonDeterministic {
                        state: state(),
                        symbol: symbol(),
                        targets: targets
                            .iter()
                            .map(|p| format!("{:?}", states[p.into_usize()]))
                            .collect_vec(),
                    })
                }
            }
        }

        trace!(
            "built DFA with {} states over {} symbols",
            states.len(),
            alphabet.size()
        );
        Ok(Dfa::from_parts(states, alphabet, initial, accepting, transitions))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dfa, MalformedAutomaton};

    use super::DfaBuilder;

    fn two_states() -> DfaBuilder<&'static str, char> {
        Dfa::builder()
            .with_states(["p", "q"])
            .with_alphabet(['0', '1'])
            .with_initial("p")
            .with_accepting(["q"])
    }

    #[test]
    fn builds_total_deterministic_dfa() {
        let dfa = two_states()
            .with_transitions([
                ("p", '0', "q"),
                ("p", '1', "p"),
                ("q", '0', "q"),
                ("q", '1', "p"),
            ])
            .with_accepting(["q"])
            .build()
            .unwrap();
        assert_eq!(dfa.size(), 2);
        assert_eq!(dfa.successor(0, 0), 1);
        assert_eq!(dfa.successor(1, 1), 0);
        assert_eq!(dfa.accepting_labels().collect::<Vec<_>>(), vec![&"q"]);
    }

    #[test]
    fn missing_transition_is_rejected() {
        let result = two_states()
            .with_transitions([("p", '0', "q"), ("p", '1', "p"), ("q", '0', "q")])
            .build();
        assert_eq!(
            result,
            Err(MalformedAutomaton::MissingTransition {
                state: "\"q\"".into(),
                symbol: "'1'".into()
            })
        );
    }

    #[test]
    fn conflicting_transitions_are_rejected() {
        let result = two_states()
            .with_transitions([
                ("p", '0', "q"),
                ("p", '0', "p"),
                ("p", '1', "p"),
                ("q", '0', "q"),
                ("q", '1', "p"),
            ])
            .build();
        assert_eq!(
            result,
            Err(MalformedAutomaton::NonDeterministic {
                state: "\"p\"".into(),
                symbol: "'0'".into(),
                targets: vec!["\"q\"".into(), "\"p\"".into()],
            })
        );
    }

    #[test]
    fn target_lists_must_be_singletons() {
        let base = two_states()
            .with_transitions([("p", '1', "p"), ("q", '0', "q"), ("q", '1', "p")]);

        let several = base.clone().with_transition_targets("p", '0', ["p", "q"]).build();
        assert!(matches!(
            several,
            Err(MalformedAutomaton::NonDeterministic { .. })
        ));

        let none = base.clone().with_transition_targets("p", '0', []).build();
        assert!(matches!(
            none,
            Err(MalformedAutomaton::MissingTransition { .. })
        ));

        let repeated = base
            .with_transition("p", '0', "q")
            .with_transition("p", '0', "q")
            .build();
        assert!(repeated.is_ok());
    }

    #[test]
    fn structural_errors() {
        let total = [("p", '0', "p"), ("p", '1', "p"), ("q", '0', "q"), ("q", '1', "q")];

        assert_eq!(
            DfaBuilder::<&str, char>::default().build(),
            Err(MalformedAutomaton::NoStates)
        );
        assert_eq!(
            two_states().with_states(["p"]).build(),
            Err(MalformedAutomaton::DuplicateState("\"p\"".into()))
        );
        assert_eq!(
            Dfa::<&str, char>::builder()
                .with_states(["p"])
                .with_initial("p")
                .with_accepting(["p"])
                .build(),
            Err(MalformedAutomaton::EmptyAlphabet)
        );
        assert_eq!(
            Dfa::builder()
                .with_states(["p", "q"])
                .with_alphabet(['0', '1'])
                .with_accepting(["q"])
                .with_transitions(total)
                .build(),
            Err(MalformedAutomaton::MissingInitialState)
        );
        assert_eq!(
            two_states().with_initial("r").with_transitions(total).build(),
            Err(MalformedAutomaton::UnknownInitialState("\"r\"".into()))
        );
        assert_eq!(
            Dfa::builder()
                .with_states(["p", "q"])
                .with_alphabet(['0', '1'])
                .with_initial("p")
                .with_transitions(total)
                .build(),
            Err(MalformedAutomaton::NoAcceptingStates)
        );
        assert_eq!(
            two_states().with_accepting(["x"]).with_transitions(total).build(),
            Err(MalformedAutomaton::UnknownAcceptingState("\"x\"".into()))
        );
        assert_eq!(
            two_states()
                .with_transitions(total)
                .with_transition("p", '0', "z")
                .build(),
            Err(MalformedAutomaton::UnknownState("\"z\"".into()))
        );
        assert_eq!(
            two_states()
                .with_transitions(total)
                .with_transition("z", '0', "p")
                .build(),
            Err(MalformedAutomaton::UnknownState("\"z\"".into()))
        );
        assert_eq!(
            two_states()
                .with_transitions(total)
                .with_transition("p", '2', "p")
                .build(),
            Err(MalformedAutomaton::UnknownSymbol("'2'".into()))
        );
    }
}
