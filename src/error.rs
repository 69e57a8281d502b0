//! Error types.
use thiserror::Error;

use crate::El;

/// A sequence of values that is not a permutation, or a config that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value {value} occurs more than once")]
    Duplicate { value: El },

    #[error("value {value} is outside of {min}..={max}")]
    OutOfRange { value: El, min: El, max: El },

    #[error("value {value} is outside of the domain of a permutation of length {len}")]
    OutOfDomain { value: El, len: usize },

    #[error("invalid config with base {base} and max index {max_index}")]
    InvalidConfig { base: El, max_index: El },
}

/// Failure to convert between permutations and their string encodings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("character {0:?} is not in 0-9A-Z")]
    InvalidChar(char),

    #[error("value {0} has no character encoding")]
    ValueOutOfRange(El),

    #[error("cycle opened at position {pos} is not closed")]
    UnterminatedCycle { pos: usize },

    #[error("nested cycle at position {pos}")]
    NestedCycle { pos: usize },

    #[error("value {value} is repeated within a cycle")]
    RepeatedInCycle { value: El },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Composition of permutations on different domains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArityError {
    #[error("cannot compose permutations of length {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("cannot compose permutations with base {left} and {right}")]
    BaseMismatch { left: El, right: El },
}

/// Any error produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Arity(#[from] ArityError),
}
