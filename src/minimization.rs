/// The dense block-index representation of a partition of the states.
pub mod partition;

/// Moore's iterative refinement, the default refinement algorithm.
pub mod moore;

/// Hopcroft's worklist-based refinement.
pub mod hopcroft;

mod quotient;
pub use quotient::MinimizedDfa;

use tracing::debug;

use crate::{error::InternalConsistencyFailure, Dfa, Label};

use self::partition::Partition;

/// Selects the algorithm that computes the coarsest stable partition. Both produce the same
/// partition, they only differ in running time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RefinementAlgorithm {
    /// Refines all blocks simultaneously by the successor-block signature of each state, until
    /// a round produces no split. Takes `O(n^2 k)` in the worst case.
    #[default]
    Moore,
    /// Splits blocks with respect to splitter blocks from a worklist. Takes `O(k n log n)`.
    Hopcroft,
}

/// Determines which member of a class of equivalent states lends its label to the state
/// representing the class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Representative {
    /// The member that was declared first.
    #[default]
    FirstInserted,
    /// The member whose label is the least one according to [`Ord`].
    Least,
}

/// Configuration of a minimization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MinimizeOptions {
    /// The refinement algorithm to use.
    pub algorithm: RefinementAlgorithm,
    /// How representatives of classes are chosen.
    pub representative: Representative,
}

impl MinimizeOptions {
    /// Sets the refinement algorithm.
    pub fn with_algorithm(mut self, algorithm: RefinementAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the way in which representatives are chosen.
    pub fn with_representative(mut self, representative: Representative) -> Self {
        self.representative = representative;
        self
    }
}

impl<Q: Label, S: Label> Dfa<Q, S> {
    /// Computes the partition of the states of `self` into classes of equivalent states, i.e.
    /// states that accept precisely the same words. Unreachable states are partitioned as well,
    /// see [`Dfa::restrict_to_reachable`] for removing them first.
    pub fn equivalence_partition(&self, algorithm: RefinementAlgorithm) -> Partition {
        match algorithm {
            RefinementAlgorithm::Moore => moore::moore_partition_refinement(self),
            RefinementAlgorithm::Hopcroft => hopcroft::hopcroft_partition_refinement(self),
        }
    }

    /// Returns the unique (up to the naming of states) minimal DFA that accepts the same language
    /// as `self`, using the default [`MinimizeOptions`]. Unreachable states are discarded first,
    /// then equivalent states are merged by partition refinement.
    ///
    /// # Example
    /// ```
    /// use automata_min::Dfa;
    ///
    /// // "b" and "c" both accept every non-empty word, so they are merged
    /// let dfa = Dfa::builder()
    ///     .with_states(["a", "b", "c"])
    ///     .with_alphabet(['0', '1'])
    ///     .with_initial("a")
    ///     .with_accepting(["b", "c"])
    ///     .with_transitions([
    ///         ("a", '0', "b"), ("a", '1', "c"),
    ///         ("b", '0', "c"), ("b", '1', "b"),
    ///         ("c", '0', "b"), ("c", '1', "c"),
    ///     ])
    ///     .build()
    ///     .unwrap();
    /// let min = dfa.minimize().unwrap();
    /// assert_eq!(min.size(), 2);
    /// assert_eq!(min.class_members(1), Some(&["b", "c"][..]));
    /// assert!(min.accepts(&['1', '0']));
    /// ```
    pub fn minimize(&self) -> Result<MinimizedDfa<Q, S>, InternalConsistencyFailure> {
        self.minimize_with(MinimizeOptions::default())
    }

    /// Minimizes `self` with the given `options`, see [`Dfa::minimize`].
    pub fn minimize_with(
        &self,
        options: MinimizeOptions,
    ) -> Result<MinimizedDfa<Q, S>, InternalConsistencyFailure> {
        let reachable = self.restrict_to_reachable();
        debug!(
            "minimizing DFA with {} states ({} reachable) using {:?}",
            self.size(),
            reachable.size(),
            options.algorithm
        );
        let partition = reachable.equivalence_partition(options.algorithm);
        let minimized = quotient::build_quotient(&reachable, &partition, options.representative)?;
        debug!("minimized DFA has {} states", minimized.size());
        Ok(minimized)
    }

    /// Returns true if `self` is minimal, that is every state is reachable and no two states
    /// are equivalent.
    pub fn is_minimal(&self) -> bool {
        self.is_reachable()
            && self.equivalence_partition(RefinementAlgorithm::default()).size() == self.size()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    #[cfg(feature = "random")]
    use crate::random::generate_random_dfa;

    #[cfg(feature = "random")]
    fn all_words<S: Clone>(symbols: &[S], max_len: usize) -> Vec<Vec<S>> {
        let mut words = vec![vec![]];
        let mut frontier = vec![vec![]];
        for _ in 0..max_len {
            frontier = frontier
                .into_iter()
                .flat_map(|w: Vec<S>| {
                    symbols.iter().map(move |s| {
                        let mut extended = w.clone();
                        extended.push(s.clone());
                        extended
                    })
                })
                .collect();
            words.extend(frontier.iter().cloned());
        }
        words
    }

    fn textbook() -> Dfa<char, char> {
        Dfa::builder()
            .with_states(['A', 'B', 'C', 'D'])
            .with_alphabet(['0', '1'])
            .with_initial('A')
            .with_accepting(['C'])
            .with_transitions([
                ('A', '0', 'B'),
                ('A', '1', 'A'),
                ('B', '0', 'A'),
                ('B', '1', 'C'),
                ('C', '0', 'D'),
                ('C', '1', 'C'),
                ('D', '0', 'D'),
                ('D', '1', 'D'),
            ])
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn pairwise_distinguishable_states_stay_apart() {
        let dfa = textbook();
        let min = dfa.minimize().unwrap();
        assert_eq!(min.size(), 4);
        assert_eq!(min.merged_classes().count(), 0);
        assert_eq!(min.dfa(), &dfa);
        assert!(dfa.is_minimal());
    }

    #[test_log::test]
    fn equivalent_states_are_merged() {
        // q1 and q2 are both rejecting and move to the same states on every symbol
        let dfa = Dfa::builder()
            .with_states(["q0", "q1", "q2", "q3"])
            .with_alphabet(['a', 'b'])
            .with_initial("q0")
            .with_accepting(["q3"])
            .with_transitions([
                ("q0", 'a', "q1"),
                ("q0", 'b', "q2"),
                ("q1", 'a', "q3"),
                ("q1", 'b', "q0"),
                ("q2", 'a', "q3"),
                ("q2", 'b', "q0"),
                ("q3", 'a', "q3"),
                ("q3", 'b', "q3"),
            ])
            .build()
            .unwrap();
        let min = dfa.minimize().unwrap();
        assert_eq!(min.size(), dfa.size() - 1);
        assert_eq!(min.class_of(&"q1"), min.class_of(&"q2"));
        assert_eq!(min.class_members(1), Some(&["q1", "q2"][..]));
        assert_eq!(min.state_labels().collect_vec(), vec![&"q0", &"q1", &"q3"]);
        assert!(!dfa.is_minimal());
        assert!(min.is_minimal());
    }

    #[test_log::test]
    fn unreachable_states_are_excluded() {
        for accepting in [true, false] {
            let mut builder = Dfa::builder()
                .with_states(['A', 'B', 'C', 'D'])
                .with_alphabet(['0', '1'])
                .with_initial('A')
                .with_accepting(['C'])
                .with_transitions([
                    ('A', '0', 'B'),
                    ('A', '1', 'A'),
                    ('B', '0', 'A'),
                    ('B', '1', 'C'),
                    ('C', '0', 'C'),
                    ('C', '1', 'C'),
                    ('D', '0', 'A'),
                    ('D', '1', 'B'),
                ]);
            if accepting {
                builder = builder.with_accepting(['D']);
            }
            let min = builder.build().unwrap().minimize().unwrap();
            assert_eq!(min.class_of(&'D'), None);
            assert!(min.state_labels().all(|q| *q != 'D'));
            assert_eq!(min.size(), 3);
        }
    }

    #[test]
    fn empty_language_yields_single_rejecting_state() {
        let dfa = Dfa::builder()
            .with_states([0, 1, 2])
            .with_alphabet(['a', 'b'])
            .with_initial(0)
            .with_accepting([2])
            .with_transitions([
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 0),
                (1, 'b', 1),
                (2, 'a', 2),
                (2, 'b', 0),
            ])
            .build()
            .unwrap();
        let min = dfa.minimize().unwrap();
        assert_eq!(min.size(), 1);
        assert_eq!(min.accepting_states().count(), 0);
        assert_eq!(min.successor(0, 0), 0);
        assert_eq!(min.successor(0, 1), 0);
    }

    #[cfg(feature = "random")]
    #[test]
    fn minimization_is_deterministic() {
        for seed in 0..20 {
            let dfa = generate_random_dfa(2, 12, seed);
            let first = dfa.minimize().unwrap();
            let second = dfa.minimize().unwrap();
            assert_eq!(first, second);
        }
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn random_dfas_preserve_language() {
        for seed in 0..40 {
            let dfa = generate_random_dfa(2, 10, seed);
            let min = dfa.minimize().unwrap();
            for word in all_words(&['a', 'b'], 7) {
                assert_eq!(
                    dfa.accepts(&word),
                    min.accepts(&word),
                    "seed {seed} disagrees on {word:?}"
                );
            }
            assert!(min.equivalent(&dfa).unwrap());
        }
    }

    #[cfg(feature = "random")]
    #[test]
    fn minimization_is_idempotent_and_minimal() {
        for seed in 0..40 {
            let dfa = generate_random_dfa(3, 15, seed);
            let once = dfa.minimize().unwrap();
            let twice = once.minimize().unwrap();
            assert_eq!(once.size(), twice.size());
            assert_eq!(once.alphabet(), twice.alphabet());
            assert!(once.equivalent(twice.dfa()).unwrap());
            assert!(once.is_minimal());
            assert!(twice.merged_classes().next().is_none());
        }
    }

    #[cfg(feature = "random")]
    #[test]
    fn refinement_algorithms_agree() {
        let hopcroft = MinimizeOptions::default().with_algorithm(RefinementAlgorithm::Hopcroft);
        for seed in 0..60 {
            let dfa = generate_random_dfa(3, 20, seed);
            assert_eq!(
                dfa.equivalence_partition(RefinementAlgorithm::Moore),
                dfa.equivalence_partition(RefinementAlgorithm::Hopcroft),
            );
            assert_eq!(dfa.minimize().unwrap(), dfa.minimize_with(hopcroft).unwrap());
        }
    }

    #[test]
    fn representatives_can_be_least_labels() {
        let dfa = Dfa::builder()
            .with_states(["z", "y", "x"])
            .with_alphabet(['a'])
            .with_initial("z")
            .with_accepting(["y", "x"])
            .with_transitions([("z", 'a', "y"), ("y", 'a', "x"), ("x", 'a', "y")])
            .build()
            .unwrap();
        let options = MinimizeOptions::default().with_representative(Representative::Least);
        let min = dfa.minimize_with(options).unwrap();
        assert_eq!(min.state_labels().collect_vec(), vec![&"z", &"x"]);
        assert_eq!(min.initial_label(), &"z");
        assert_eq!(min.accepting_labels().collect_vec(), vec![&"x"]);
    }
}
