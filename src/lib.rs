//! Library for minimizing deterministic finite automata (DFA) in Rust.
//!
//! A [`Dfa`] consists of a non-empty collection of states, an [`Alphabet`], an initial state, a set of accepting states and a total transition function, which assigns to every state and symbol precisely one successor. States and symbols can be labelled with arbitrary values (see [`Label`]), internally they are interned into dense integer indices in the order of their declaration, so that all algorithms work on plain arrays.
//!
//! Minimization is a pipeline of pure stages, each of which owns its output:
//! - The [`DfaBuilder`] validates raw enumerations of states, symbols, initial and accepting states together with a list of transition entries, and rejects anything that does not describe a total, deterministic automaton with a [`MalformedAutomaton`] error.
//! - [`Dfa::restrict_to_reachable`] discards all states which can not be reached from the initial state.
//! - Partition refinement ([`minimization::moore`] or [`minimization::hopcroft`]) computes the coarsest [`minimization::partition::Partition`] of the remaining states such that two states share a block iff they accept the same words, which is the Myhill-Nerode equivalence.
//! - Finally, each block is collapsed into a single state, yielding a [`MinimizedDfa`] that remembers which original states were merged. If a block turns out to be inconsistent, an [`InternalConsistencyFailure`] is returned instead.
//!
//! All of this is wrapped in [`Dfa::minimize`] and [`Dfa::minimize_with`]. Automata can also be read from a simple textual description, see the [`std::str::FromStr`] implementation of [`Dfa`].
//!
//! ```
//! use automata_min::prelude::*;
//!
//! let dfa: Dfa<String, String> = "
//!     states: q0, q1, q2, q3
//!     alphabet: a, b
//!     initial: q0
//!     accepting: q2
//!     q0, a -> q1
//!     q0, b -> q1
//!     q1, a -> q2
//!     q1, b -> q2
//!     q2, a -> q2
//!     q2, b -> q2
//!     q3, a -> q2
//!     q3, b -> q0
//! ".parse()?;
//! let minimized = dfa.minimize()?;
//! assert_eq!(minimized.size(), 3);
//! assert_eq!(minimized.class_of(&"q3".to_string()), None);
//! # Ok::<(), automata_min::Error>(())
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_min::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::Alphabet,
        automaton::{Dfa, DfaBuilder},
        equivalence::AlphabetMismatch,
        error::{Error, InternalConsistencyFailure, MalformedAutomaton, ParseError},
        id::{StateIndex, SymbolIndex},
        minimization::{
            partition::Partition, MinimizeOptions, MinimizedDfa, RefinementAlgorithm,
            Representative,
        },
        Label,
    };
}

/// This module contains some definitions of collection types which are used throughout the crate.
pub mod math;

/// Integer types used to index states and symbols.
pub mod id;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

/// Defines the [`Dfa`] type and its validating builder.
pub mod automaton;
pub use automaton::{Dfa, DfaBuilder};

/// Computes reachable states and minimal access words.
pub mod reachable;

/// Decides language equivalence of automata and separates states.
pub mod equivalence;

/// Contains the partition refinement algorithms and the construction of the minimized automaton.
pub mod minimization;
pub use minimization::{MinimizeOptions, MinimizedDfa, RefinementAlgorithm, Representative};

/// Errors that can occur while building, parsing or minimizing an automaton.
pub mod error;
pub use error::{Error, InternalConsistencyFailure, MalformedAutomaton, ParseError};

mod parse;

/// Implements the generation of random automata. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;

/// A label is any type that can be used to name states or symbols. Labels need to be comparable
/// and hashable for interning, [`Debug`] is used in error messages and [`Display`] when rendering
/// transition tables.
pub trait Label: Clone + Eq + Ord + Hash + Debug + Display {}

impl<T: Clone + Eq + Ord + Hash + Debug + Display> Label for T {}
