use thiserror::Error;

/// Structural violations detected while assembling a [`crate::Dfa`] from raw parts.
/// Labels are carried in their `Debug` rendering so that the error does not depend
/// on the label types of the automaton.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum MalformedAutomaton {
    #[error("automaton has no states")]
    NoStates,
    #[error("alphabet is empty")]
    EmptyAlphabet,
    #[error("state {0} is declared more than once")]
    DuplicateState(String),
    #[error("symbol {0} is declared more than once")]
    DuplicateSymbol(String),
    #[error("no initial state was given")]
    MissingInitialState,
    #[error("initial state {0} is not a declared state")]
    UnknownInitialState(String),
    #[error("no accepting states were given")]
    NoAcceptingStates,
    #[error("accepting state {0} is not a declared state")]
    UnknownAcceptingState(String),
    #[error("transition references undeclared state {0}")]
    UnknownState(String),
    #[error("transition references undeclared symbol {0}")]
    UnknownSymbol(String),
    #[error("state {state} has no transition on symbol {symbol}")]
    MissingTransition { state: String, symbol: String },
    #[error("state {state} has conflicting transitions on symbol {symbol}: {targets:?}")]
    NonDeterministic {
        state: String,
        symbol: String,
        targets: Vec<String>,
    },
}

/// Raised when the quotient construction observes a class whose members do not agree
/// on acceptance or on their successor classes. This can only happen if partition
/// refinement did not reach its fixed point and is never silently repaired.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum InternalConsistencyFailure {
    #[error("class of {representative} mixes accepting and rejecting states")]
    MixedAcceptance { representative: String },
    #[error("members of the class of {representative} disagree on the successor class for symbol {symbol}")]
    SuccessorMismatch {
        representative: String,
        symbol: String,
    },
    #[error("partition covers {partitioned} states, but the automaton has {states}")]
    DomainMismatch { partitioned: usize, states: usize },
}

/// Abstracts the types of errors that can occur when parsing an automaton description.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("missing `{0}:` directive")]
    MissingDirective(&'static str),
    #[error("directive `{0}:` appears more than once")]
    RepeatedDirective(String),
    #[error("unknown directive `{directive}` in line {line}")]
    UnknownDirective { line: usize, directive: String },
    #[error("initial directive must name exactly one state, found {0:?}")]
    AmbiguousInitialState(Vec<String>),
    #[error("malformed line {line}: `{content}`")]
    MalformedLine { line: usize, content: String },
}

/// Umbrella error for the whole pipeline, from text to minimized automaton.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("could not parse automaton description: {0}")]
    Parse(#[from] ParseError),
    #[error("malformed automaton: {0}")]
    Malformed(#[from] MalformedAutomaton),
    #[error("internal consistency failure: {0}")]
    Inconsistent(#[from] InternalConsistencyFailure),
}
