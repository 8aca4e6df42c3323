//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the nested-list shape.
/// A build either succeeds completely or fails with one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed input at item {index} ({value:?}): {reason}")]
    MalformedInput {
        /// Zero-based position of the offending item
        index: usize,
        value: String,
        reason: MalformedReason,
    },
}

/// Why a depth sequence was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("first item has depth {depth}, expected 0")]
    NonZeroStart { depth: usize },

    #[error("depth {depth} skips a level after depth {previous}")]
    DepthJump { depth: usize, previous: usize },

    #[error("depth {depth} exceeds configured maximum {max}")]
    TooDeep { depth: usize, max: usize },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
