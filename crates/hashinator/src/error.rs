//! Error types for the hashinator.

use thiserror::Error;

/// Result type alias for the hashinator.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a caller breaks the hashinator's contract.
///
/// None of these are retryable: a valid key and a positive partition count
/// always produce an index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Partition count outside `1..=u32::MAX`.
    #[error("invalid partition count {0}: must be between 1 and {max}", max = u32::MAX)]
    InvalidPartitionCount(i64),

    /// Type code or name outside the supported key types.
    #[error("unsupported key type: {0}")]
    UnsupportedType(String),

    /// Text that does not parse as a value of the requested key type.
    #[error("invalid {key_type} key: {reason}")]
    InvalidKey { key_type: String, reason: String },

    /// Harness configuration rejected before a run.
    #[error("invalid conformance config: {0}")]
    Config(String),
}
