use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::debug;

use crate::{
    id::{ScalarIdType, StateIndex, SymbolIndex},
    math::OrderedSet,
    Dfa, Label,
};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence (as symbol indices) and its state index.
pub type MinimalRepresentative = (Vec<SymbolIndex>, StateIndex);

/// Struct that can return the minimal representatives of a [`Dfa`]. A minimal representative
/// for a state `q` is the length-lexicographically minimal word with which `q` can be reached
/// from a given origin, where symbols are ordered by their position in the alphabet.
///
/// The states are produced in breadth-first order, so every state is yielded exactly once and
/// only states that are reachable from the origin are yielded at all.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a, Q: Label, S: Label> {
    dfa: &'a Dfa<Q, S>,
    seen: BitSet,
    queue: VecDeque<MinimalRepresentative>,
}

impl<'a, Q: Label, S: Label> MinimalRepresentatives<'a, Q, S> {
    /// Starts the search in `origin`.
    pub fn new(dfa: &'a Dfa<Q, S>, origin: StateIndex) -> Self {
        let mut seen = BitSet::with_capacity(dfa.size());
        seen.insert(origin.into_usize());
        let queue = [(vec![], origin)].into_iter().collect();
        Self { dfa, seen, queue }
    }
}

impl<Q: Label, S: Label> Iterator for MinimalRepresentatives<'_, Q, S> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for a in self.dfa.alphabet().indices() {
            let p = self.dfa.successor(q, a);
            if self.seen.insert(p.into_usize()) {
                let mut extended = access.clone();
                extended.push(a);
                self.queue.push_back((extended, p));
            }
        }
        Some((access, q))
    }
}

impl<Q: Label, S: Label> Dfa<Q, S> {
    /// Iterates over the minimal representatives of all states reachable from the initial state.
    ///
    /// # Example
    /// ```
    /// use automata_min::Dfa;
    ///
    /// let dfa = Dfa::builder()
    ///     .with_states([0, 1, 2])
    ///     .with_alphabet(['a', 'b'])
    ///     .with_initial(0)
    ///     .with_accepting([2])
    ///     .with_transitions([
    ///         (0, 'a', 1), (0, 'b', 0),
    ///         (1, 'a', 2), (1, 'b', 0),
    ///         (2, 'a', 2), (2, 'b', 2),
    ///     ])
    ///     .build()
    ///     .unwrap();
    /// let reps: Vec<_> = dfa.minimal_representatives().collect();
    /// assert_eq!(reps, vec![(vec![], 0), (vec![0], 1), (vec![0, 0], 2)]);
    /// ```
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_, Q, S> {
        MinimalRepresentatives::new(self, self.initial())
    }

    /// Iterates over the minimal representatives of all states reachable from `origin`.
    pub fn minimal_representatives_from(
        &self,
        origin: StateIndex,
    ) -> MinimalRepresentatives<'_, Q, S> {
        MinimalRepresentatives::new(self, origin)
    }

    /// Returns the indices of all states that are reachable from the initial state, in the
    /// order in which a breadth-first search discovers them.
    pub fn reachable_state_indices(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.minimal_representatives().map(|(_, q)| q)
    }

    /// Returns the indices of all states that are reachable from `origin`.
    pub fn reachable_state_indices_from(
        &self,
        origin: StateIndex,
    ) -> impl Iterator<Item = StateIndex> + '_ {
        self.minimal_representatives_from(origin).map(|(_, q)| q)
    }

    /// Returns the set of states reachable from the initial state.
    pub fn reachable_states(&self) -> BitSet {
        self.reachable_state_indices()
            .map(StateIndex::into_usize)
            .collect()
    }

    /// Returns true if every state is reachable from the initial state.
    pub fn is_reachable(&self) -> bool {
        self.reachable_state_indices().count() == self.size()
    }

    /// Restricts `self` to the states that are reachable from the initial state. The retained
    /// states keep their labels and their relative declaration order, so state indices may shift.
    /// The result can have no accepting state at all, which means it recognizes the empty language.
    pub fn restrict_to_reachable(&self) -> Dfa<Q, S> {
        let reachable = self.reachable_states();
        if reachable.len() == self.size() {
            return self.clone();
        }

        let mut renaming: Vec<Option<StateIndex>> = vec![None; self.size()];
        let mut states = OrderedSet::default();
        for q in reachable.iter() {
            renaming[q] = Some(StateIndex::from_usize(states.len()));
            states.insert(self.label(StateIndex::from_usize(q)).clone());
        }
        let renamed = |q: StateIndex| {
            renaming[q.into_usize()].expect("successors of reachable states are reachable")
        };

        let accepting = reachable
            .iter()
            .filter(|q| self.accepting.contains(*q))
            .map(|q| renamed(StateIndex::from_usize(q)).into_usize())
            .collect();
        let transitions = reachable
            .iter()
            .flat_map(|q| {
                self.alphabet()
                    .indices()
                    .map(move |a| self.successor(StateIndex::from_usize(q), a))
            })
            .map(renamed)
            .collect();

        debug!(
            "discarding {} unreachable states, {} remain",
            self.size() - states.len(),
            states.len()
        );
        Dfa::from_parts(
            states,
            self.alphabet().clone(),
            renamed(self.initial()),
            accepting,
            transitions,
        )
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::Dfa;

    fn with_unreachable_state() -> Dfa<char, char> {
        Dfa::builder()
            .with_states(['A', 'D', 'B', 'C'])
            .with_alphabet(['0', '1'])
            .with_initial('A')
            .with_accepting(['C', 'D'])
            .with_transitions([
                ('A', '0', 'B'),
                ('A', '1', 'A'),
                ('B', '0', 'C'),
                ('B', '1', 'A'),
                ('C', '0', 'C'),
                ('C', '1', 'C'),
                ('D', '0', 'A'),
                ('D', '1', 'C'),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn reachable_states() {
        let dfa = with_unreachable_state();
        assert_eq!(dfa.reachable_state_indices().collect_vec(), vec![0, 2, 3]);
        assert_eq!(dfa.reachable_state_indices_from(3).collect_vec(), vec![3]);
        assert_eq!(dfa.reachable_state_indices_from(1).collect_vec(), vec![1, 0, 3, 2]);
        assert!(!dfa.is_reachable());
    }

    #[test]
    fn minimal_representatives_reach_their_state() {
        let dfa = with_unreachable_state();
        for (word, q) in dfa.minimal_representatives() {
            let symbols = dfa.symbols_of(&word);
            assert_eq!(dfa.run(&symbols), Some(q));
        }
        assert_eq!(
            dfa.minimal_representatives().collect_vec(),
            vec![(vec![], 0), (vec![0], 2), (vec![0, 0], 3)]
        );
    }

    #[test_log::test]
    fn restriction_drops_unreachable_states() {
        let dfa = with_unreachable_state();
        let restricted = dfa.restrict_to_reachable();
        assert_eq!(restricted.size(), 3);
        assert_eq!(restricted.state_labels().collect_vec(), vec![&'A', &'B', &'C']);
        assert_eq!(restricted.state_index(&'D'), None);
        assert_eq!(restricted.accepting_labels().collect_vec(), vec![&'C']);
        assert_eq!(restricted.initial_label(), &'A');
        assert!(restricted.is_reachable());
        assert_eq!(restricted.restrict_to_reachable(), restricted);

        for word in [&['0', '0'][..], &['1', '0', '1'][..], &['0', '1', '0', '0'][..]] {
            assert_eq!(dfa.accepts(word), restricted.accepts(word));
        }
    }

    #[test]
    fn restriction_may_leave_no_accepting_state() {
        let dfa = Dfa::builder()
            .with_states(["s", "dead", "goal"])
            .with_alphabet(['x'])
            .with_initial("s")
            .with_accepting(["goal"])
            .with_transitions([
                ("s", 'x', "dead"),
                ("dead", 'x', "s"),
                ("goal", 'x', "goal"),
            ])
            .build()
            .unwrap();
        let restricted = dfa.restrict_to_reachable();
        assert_eq!(restricted.size(), 2);
        assert_eq!(restricted.accepting_states().count(), 0);
    }
}
