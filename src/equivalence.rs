use std::collections::VecDeque;

use thiserror::Error;

use crate::{
    id::{ScalarIdType, StateIndex, SymbolIndex},
    math::Set,
    Dfa, Label,
};

/// Returned when two automata that are compared do not share the same set of symbols.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("automata are defined over different alphabets")]
pub struct AlphabetMismatch;

impl<Q: Label, S: Label> Dfa<Q, S> {
    /// Searches the product of `self` (started in `left`) and `other` (started in `right`) in
    /// breadth-first order for a pair of states that disagree on acceptance. `translation`
    /// maps symbol indices of `self` to those of `other`.
    fn product_witness<P: Label>(
        &self,
        left: StateIndex,
        other: &Dfa<P, S>,
        right: StateIndex,
        translation: &[SymbolIndex],
    ) -> Option<Vec<S>> {
        let mut seen: Set<(StateIndex, StateIndex)> = Set::default();
        seen.insert((left, right));
        let mut queue = VecDeque::from([(vec![], left, right)]);

        while let Some((word, q, p)) = queue.pop_front() {
            if self.is_accepting(q) != other.is_accepting(p) {
                return Some(self.symbols_of(&word));
            }
            for a in self.alphabet().indices() {
                let successors = (
                    self.successor(q, a),
                    other.successor(p, translation[a.into_usize()]),
                );
                if seen.insert(successors) {
                    let mut extended = word.clone();
                    extended.push(a);
                    queue.push_back((extended, successors.0, successors.1));
                }
            }
        }
        None
    }

    /// Returns a shortest word that is accepted by exactly one of `self` and `other`, or `None`
    /// if both accept the same language. Among all shortest words, the one that is least with
    /// respect to the symbol order of `self` is returned. Fails if the two automata are not
    /// defined over the same symbols (in any order).
    pub fn witness_inequivalence<P: Label>(
        &self,
        other: &Dfa<P, S>,
    ) -> Result<Option<Vec<S>>, AlphabetMismatch> {
        if !self.alphabet().same_symbols(other.alphabet()) {
            return Err(AlphabetMismatch);
        }
        let translation: Vec<SymbolIndex> = self
            .alphabet()
            .symbols()
            .map(|sym| other.alphabet().index_of(sym).ok_or(AlphabetMismatch))
            .collect::<Result<_, _>>()?;
        Ok(self.product_witness(self.initial(), other, other.initial(), &translation))
    }

    /// Checks whether `self` and `other` accept the same language.
    pub fn equivalent<P: Label>(&self, other: &Dfa<P, S>) -> Result<bool, AlphabetMismatch> {
        self.witness_inequivalence(other).map(|witness| witness.is_none())
    }

    /// Attempts to separate the state `left` from the state `right` by finding a shortest word
    /// that is accepted from exactly one of them. Returns `None` if the states are equivalent.
    ///
    /// # Example
    /// ```
    /// use automata_min::Dfa;
    ///
    /// let dfa = Dfa::builder()
    ///     .with_states(["p", "q", "r"])
    ///     .with_alphabet(['a'])
    ///     .with_initial("p")
    ///     .with_accepting(["r"])
    ///     .with_transitions([("p", 'a', "q"), ("q", 'a', "r"), ("r", 'a', "r")])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(dfa.separate(0, 1), Some(vec!['a']));
    /// assert_eq!(dfa.separate(1, 1), None);
    /// ```
    pub fn separate(&self, left: StateIndex, right: StateIndex) -> Option<Vec<S>> {
        if left == right {
            return None;
        }
        let identity: Vec<SymbolIndex> = self.alphabet().indices().collect();
        self.product_witness(left, self, right, &identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ends_with_b(order: [char; 2]) -> Dfa<&'static str, char> {
        Dfa::builder()
            .with_states(["other", "seen_b"])
            .with_alphabet(order)
            .with_initial("other")
            .with_accepting(["seen_b"])
            .with_transitions([
                ("other", 'a', "other"),
                ("other", 'b', "seen_b"),
                ("seen_b", 'a', "other"),
                ("seen_b", 'b', "seen_b"),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn equivalence_ignores_symbol_order() {
        let left = ends_with_b(['a', 'b']);
        let right = ends_with_b(['b', 'a']);
        assert_eq!(left.equivalent(&right), Ok(true));
        assert_eq!(right.witness_inequivalence(&left), Ok(None));
    }

    #[test]
    fn witness_is_shortest() {
        let left = ends_with_b(['a', 'b']);
        let contains_b = Dfa::builder()
            .with_states([0, 1])
            .with_alphabet(['a', 'b'])
            .with_initial(0)
            .with_accepting([1])
            .with_transitions([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 1)])
            .build()
            .unwrap();
        assert_eq!(left.witness_inequivalence(&contains_b), Ok(Some(vec!['b', 'a'])));
        assert_eq!(left.equivalent(&contains_b), Ok(false));
    }

    #[test]
    fn mismatching_alphabets() {
        let left = ends_with_b(['a', 'b']);
        let other = Dfa::builder()
            .with_states([0])
            .with_alphabet(['a', 'c'])
            .with_initial(0)
            .with_accepting([0])
            .with_transitions([(0, 'a', 0), (0, 'c', 0)])
            .build()
            .unwrap();
        assert_eq!(left.equivalent(&other), Err(AlphabetMismatch));
    }

    #[test]
    fn separating_states() {
        let dfa = ends_with_b(['a', 'b']);
        assert_eq!(dfa.separate(0, 1), Some(vec![]));
        assert_eq!(dfa.separate(0, 0), None);
    }
}
