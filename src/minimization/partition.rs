use std::hash::Hash;

use itertools::Itertools;

use crate::{
    id::{DefaultIdType, ScalarIdType, StateIndex},
    math::Map,
    Dfa, Label,
};

/// Index of a block (equivalence class) inside a [`Partition`].
pub type BlockIndex = DefaultIdType;

/// A partition of the states of an automaton into disjoint, non-empty blocks. It is stored as
/// a plain array that maps every state index to the index of its block.
///
/// Block indices are always canonical: blocks are numbered in the order in which their first
/// member appears in the state order. Two partitions that group the states in the same way are
/// therefore represented by identical arrays, which makes the fixed point check of partition
/// refinement a simple comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    block_of: Vec<BlockIndex>,
    size: usize,
}

impl Partition {
    /// Builds the partition in which two states share a block iff they have the same key. The
    /// `i`-th key belongs to the state with index `i`.
    pub fn from_keys<K, I>(keys: I) -> Self
    where
        K: Hash + Eq,
        I: IntoIterator<Item = K>,
    {
        let mut numbering: Map<K, BlockIndex> = Map::default();
        let block_of = keys
            .into_iter()
            .map(|key| {
                let next = BlockIndex::from_usize(numbering.len());
                *numbering.entry(key).or_insert(next)
            })
            .collect();
        Self {
            block_of,
            size: numbering.len(),
        }
    }

    /// The initial partition used by refinement: accepting and rejecting states. If one of
    /// the two groups is empty, the partition consists of a single block.
    pub fn by_acceptance<Q: Label, S: Label>(dfa: &Dfa<Q, S>) -> Self {
        Self::from_keys(dfa.state_indices().map(|q| dfa.is_accepting(q)))
    }

    /// Returns the number of blocks.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of states that are partitioned.
    pub fn domain_size(&self) -> usize {
        self.block_of.len()
    }

    /// Returns the block that contains the state `q`. Panics if `q` is out of range.
    pub fn block_of(&self, q: StateIndex) -> BlockIndex {
        self.block_of[q.into_usize()]
    }

    /// Gives the underlying array which maps states to blocks.
    pub fn as_slice(&self) -> &[BlockIndex] {
        &self.block_of
    }

    /// Returns the members of every block. Blocks are listed by their index and members by
    /// their state index, both in increasing order.
    pub fn blocks(&self) -> Vec<Vec<StateIndex>> {
        let mut blocks = vec![vec![]; self.size];
        for (q, b) in self.block_of.iter().enumerate() {
            blocks[b.into_usize()].push(StateIndex::from_usize(q));
        }
        blocks
    }

    /// Returns true if every block of `self` is contained in some block of `other`.
    pub fn is_refinement_of(&self, other: &Partition) -> bool {
        self.domain_size() == other.domain_size()
            && self
                .blocks()
                .iter()
                .all(|block| block.iter().map(|q| other.block_of(*q)).all_equal())
    }
}
