use bit_set::BitSet;
use tracing::debug;

use crate::{
    alphabet::Alphabet,
    id::{DefaultIdType, ScalarIdType, StateIndex},
    math::OrderedSet,
    Dfa,
};

/// Generates a random [`Dfa`] with `size` states over the first `symbols` letters of the latin
/// alphabet. States are labelled `0..size` and state `0` is initial. The algorithm is as follows:
/// 1. Create `size` states.
/// 2. For each state and each symbol draw a target state uniformly at random.
/// 3. Color every state accepting with probability one half. If no state ended up accepting,
///    a randomly drawn state is made accepting.
///
/// Depending on the drawn transitions, some states may be unreachable. The generator is seeded,
/// so equal arguments always produce equal automata.
pub fn generate_random_dfa(symbols: usize, size: usize, seed: u64) -> Dfa<DefaultIdType, char> {
    assert!(size > 0, "a DFA needs at least one state");
    let mut rng = fastrand::Rng::with_seed(seed);
    let alphabet = Alphabet::of_size(symbols);

    let states: OrderedSet<DefaultIdType> = (0..size).map(DefaultIdType::from_usize).collect();
    let transitions = (0..size * symbols)
        .map(|_| StateIndex::from_usize(rng.usize(..size)))
        .collect();

    let mut accepting: BitSet = (0..size).filter(|_| rng.bool()).collect();
    if accepting.is_empty() {
        accepting.insert(rng.usize(..size));
    }

    debug!(
        "generated random DFA with {size} states, {} of which are accepting",
        accepting.len()
    );
    Dfa::from_parts(states, alphabet, 0, accepting, transitions)
}

/// Works as [`generate_random_dfa`], but keeps only the reachable part of the drawn automaton.
pub fn generate_random_reachable_dfa(
    symbols: usize,
    size: usize,
    seed: u64,
) -> Dfa<DefaultIdType, char> {
    generate_random_dfa(symbols, size, seed).restrict_to_reachable()
}
