use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{
    id::{ScalarIdType, StateIndex},
    Dfa, Label,
};

use super::partition::Partition;

/// Computes the same partition as [`super::moore::moore_partition_refinement`], but uses
/// Hopcroft's worklist algorithm, which runs in `O(k n log n)` for `n` states and `k` symbols.
///
/// The algorithm keeps a worklist of splitter blocks. For a splitter `B` and a symbol `a`, every
/// block that contains both states with an `a`-successor in `B` and states without one is split.
/// If the split block is still waiting in the worklist, both halves are scheduled, otherwise it
/// suffices to schedule the smaller half.
///
/// Block numbers are assigned in whatever order splits happen, so the result is renumbered
/// canonically at the end.
pub fn hopcroft_partition_refinement<Q: Label, S: Label>(dfa: &Dfa<Q, S>) -> Partition {
    let n = dfa.size();
    let k = dfa.alphabet().size();

    // preimages[p * k + a] holds all q with q -a-> p
    let mut preimages: Vec<Vec<StateIndex>> = vec![vec![]; n * k];
    for q in dfa.state_indices() {
        for a in dfa.alphabet().indices() {
            let p = dfa.successor(q, a);
            preimages[p.into_usize() * k + a.into_usize()].push(q);
        }
    }

    let initial = Partition::by_acceptance(dfa);
    let mut blocks: Vec<Vec<StateIndex>> = initial.blocks();
    let mut find: Vec<usize> = initial.as_slice().iter().map(|b| b.into_usize()).collect();
    let mut worklist: VecDeque<usize> = (0..blocks.len()).collect();
    let mut in_worklist = vec![true; blocks.len()];
    let mut splits = 0usize;

    while let Some(splitter) = worklist.pop_front() {
        in_worklist[splitter] = false;
        let splitter_states = blocks[splitter].clone();

        for a in dfa.alphabet().indices() {
            // group the predecessors by their block, keeping the order in which blocks are hit
            let mut hit_blocks: Vec<usize> = vec![];
            let mut hits: Vec<Vec<StateIndex>> = vec![vec![]; blocks.len()];
            for p in &splitter_states {
                for q in &preimages[p.into_usize() * k + a.into_usize()] {
                    let b = find[q.into_usize()];
                    if hits[b].is_empty() {
                        hit_blocks.push(b);
                    }
                    hits[b].push(*q);
                }
            }

            for b in hit_blocks {
                let hit = std::mem::take(&mut hits[b]);
                if hit.len() == blocks[b].len() {
                    continue;
                }
                let hit_set: BitSet = hit.iter().map(|q| q.into_usize()).collect();
                let rest = blocks[b]
                    .iter()
                    .copied()
                    .filter(|q| !hit_set.contains(q.into_usize()))
                    .collect();

                let fresh = blocks.len();
                for q in &hit {
                    find[q.into_usize()] = fresh;
                }
                blocks[b] = rest;
                blocks.push(hit);
                splits += 1;
                trace!("split block {b} on symbol {a}, new block {fresh}");

                if in_worklist[b] {
                    worklist.push_back(fresh);
                    in_worklist.push(true);
                } else if blocks[fresh].len() <= blocks[b].len() {
                    worklist.push_back(fresh);
                    in_worklist.push(true);
                } else {
                    worklist.push_back(b);
                    in_worklist[b] = true;
                    in_worklist.push(false);
                }
            }
        }
    }

    let partition = Partition::from_keys(find);
    debug!(
        "hopcroft refinement finished with {} blocks after {splits} splits",
        partition.size()
    );
    partition
}
