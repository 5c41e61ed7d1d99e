use std::{fmt::Display, ops::Deref};

use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    error::InternalConsistencyFailure,
    id::{ScalarIdType, StateIndex},
    math::OrderedSet,
    Dfa, Label,
};

use super::{partition::Partition, Representative};

/// The result of minimizing a [`Dfa`]. Every state of the minimized automaton stands for one
/// class of equivalent states of the (reachable part of the) original automaton, and is labelled
/// with a representative member of that class.
///
/// The minimized automaton is available through [`Deref`], so all methods of [`Dfa`] can be
/// called directly. In addition, the members of each class can be inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct MinimizedDfa<Q: Label, S: Label> {
    dfa: Dfa<Q, S>,
    classes: Vec<Vec<Q>>,
}

impl<Q: Label, S: Label> MinimizedDfa<Q, S> {
    /// Gives a reference to the minimized automaton.
    pub fn dfa(&self) -> &Dfa<Q, S> {
        &self.dfa
    }

    /// Consumes `self` and returns the minimized automaton.
    pub fn into_dfa(self) -> Dfa<Q, S> {
        self.dfa
    }

    /// The members of every class, indexed by the state of the minimized automaton that
    /// represents the class. Members are listed in their original declaration order.
    pub fn classes(&self) -> &[Vec<Q>] {
        &self.classes
    }

    /// Returns the members of the class that is represented by the state `q`.
    pub fn class_members(&self, q: StateIndex) -> Option<&[Q]> {
        self.classes.get(q.into_usize()).map(Vec::as_slice)
    }

    /// Finds the state of the minimized automaton whose class contains the original state
    /// labelled `label`. Returns `None` for states that were discarded as unreachable.
    pub fn class_of(&self, label: &Q) -> Option<StateIndex> {
        self.classes
            .iter()
            .position(|members| members.contains(label))
            .map(StateIndex::from_usize)
    }

    /// Iterates over the classes that merge more than one original state, together with the
    /// state that represents them.
    pub fn merged_classes(&self) -> impl Iterator<Item = (StateIndex, &[Q])> + '_ {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, members)| members.len() > 1)
            .map(|(i, members)| (StateIndex::from_usize(i), members.as_slice()))
    }
}

impl<Q: Label, S: Label> Deref for MinimizedDfa<Q, S> {
    type Target = Dfa<Q, S>;
    fn deref(&self) -> &Self::Target {
        &self.dfa
    }
}

impl<Q: Label, S: Label> std::fmt::Debug for MinimizedDfa<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self.dfa)?;
        for (q, members) in self.merged_classes() {
            writeln!(
                f,
                "{:?} merged from {{{}}}",
                self.dfa.label(q),
                members.iter().map(|m| format!("{m:?}")).join(", ")
            )?;
        }
        Ok(())
    }
}

impl<Q: Label, S: Label> Display for MinimizedDfa<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dfa)
    }
}

/// Collapses every block of `partition` into a single state. `dfa` must only contain
/// reachable states and `partition` must be a fixed point of refinement, which is verified:
/// a block whose members disagree on acceptance or on the successor block for some symbol
/// yields an [`InternalConsistencyFailure`].
pub(crate) fn build_quotient<Q: Label, S: Label>(
    dfa: &Dfa<Q, S>,
    partition: &Partition,
    representative: Representative,
) -> Result<MinimizedDfa<Q, S>, InternalConsistencyFailure> {
    if partition.domain_size() != dfa.size() {
        return Err(InternalConsistencyFailure::DomainMismatch {
            partitioned: partition.domain_size(),
            states: dfa.size(),
        });
    }
    let blocks = partition.blocks();
    let k = dfa.alphabet().size();

    let mut states = OrderedSet::default();
    let mut accepting = BitSet::with_capacity(blocks.len());
    let mut transitions = Vec::with_capacity(blocks.len() * k);
    for (b, block) in blocks.iter().enumerate() {
        let leader = *block
            .first()
            .expect("blocks of a partition are never empty");
        let chosen = match representative {
            Representative::FirstInserted => leader,
            Representative::Least => *block
                .iter()
                .min_by_key(|q| dfa.label(**q))
                .expect("blocks of a partition are never empty"),
        };
        let shown = || format!("{:?}", dfa.label(chosen));

        if !block
            .iter()
            .map(|q| dfa.is_accepting(*q))
            .all_equal()
        {
            return Err(InternalConsistencyFailure::MixedAcceptance {
                representative: shown(),
            });
        }
        if dfa.is_accepting(leader) {
            accepting.insert(b);
        }

        for a in dfa.alphabet().indices() {
            let target = partition.block_of(dfa.successor(leader, a));
            if block
                .iter()
                .any(|q| partition.block_of(dfa.successor(*q, a)) != target)
            {
                return Err(InternalConsistencyFailure::SuccessorMismatch {
                    representative: shown(),
                    symbol: format!("{:?}", dfa.alphabet().symbol_unchecked(a)),
                });
            }
            transitions.push(target);
        }
        states.insert(dfa.label(chosen).clone());
    }

    let classes = blocks
        .iter()
        .map(|block| block.iter().map(|q| dfa.label(*q).clone()).collect())
        .collect();
    Ok(MinimizedDfa {
        dfa: Dfa::from_parts(
            states,
            dfa.alphabet().clone(),
            partition.block_of(dfa.initial()),
            accepting,
            transitions,
        ),
        classes,
    })
}
