/// Contains the [`Dfa`] type itself, together with its run semantics and the rendering of
/// its transition table.
mod dfa;
pub use dfa::Dfa;

/// Validating construction of a [`Dfa`] from raw enumerations of its parts.
mod builder;
pub use builder::DfaBuilder;
