use itertools::Itertools;
use tracing::{debug, trace};

use crate::{Dfa, Label};

use super::partition::Partition;

/// Computes the coarsest partition of the states of `dfa` that is compatible with acceptance
/// and closed under transitions, using Moore's iterative refinement.
///
/// Starting from the split into accepting and rejecting states, every round assigns each state
/// the signature consisting of its current block together with the blocks of its successors for
/// all symbols (in alphabet order). States with equal signatures stay together, all others are
/// split apart. Because the own block is part of the signature, every round yields a refinement
/// of the previous partition and the process stops as soon as a round leaves the (canonically
/// numbered) block array unchanged. This happens after at most `dfa.size()` rounds.
///
/// The result only depends on how states are grouped, never on the iteration order of any hash
/// based structure, so repeated runs produce identical partitions.
pub fn moore_partition_refinement<Q: Label, S: Label>(dfa: &Dfa<Q, S>) -> Partition {
    let mut current = Partition::by_acceptance(dfa);
    let mut rounds = 0usize;

    loop {
        rounds += 1;
        let next = Partition::from_keys(dfa.state_indices().map(|q| {
            std::iter::once(current.block_of(q))
                .chain(
                    dfa.alphabet()
                        .indices()
                        .map(|a| current.block_of(dfa.successor(q, a))),
                )
                .collect_vec()
        }));
        trace!(
            "refinement round {rounds}: {} -> {} blocks",
            current.size(),
            next.size()
        );
        debug_assert!(next.is_refinement_of(&current));

        if next == current {
            break;
        }
        current = next;
    }

    debug!(
        "moore refinement reached fixed point with {} blocks after {rounds} rounds",
        current.size()
    );
    current
}

/// Signature of a state, used in tests to inspect the fixed point.
#[cfg(test)]
pub(crate) fn signature<Q: Label, S: Label>(
    dfa: &Dfa<Q, S>,
    partition: &Partition,
    q: crate::id::StateIndex,
) -> Vec<super::partition::BlockIndex> {
    dfa.alphabet()
        .indices()
        .map(|a| partition.block_of(dfa.successor(q, a)))
        .collect()
}
