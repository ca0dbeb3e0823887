//! Error types.

use thiserror::Error;

/// Errors raised while loading volumes and driving shader state.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// Dimension triplet is missing or contains a zero.
    #[error("invalid volume header: {0}")]
    InvalidHeader(String),

    /// Payload length does not match the declared dimensions.
    /// Both values are counted in samples.
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Byte stream ends in the middle of a 16-bit sample.
    #[error("{len} bytes do not hold a whole number of 16-bit samples")]
    TruncatedSample { len: usize },

    /// Backend could not build or link the program.
    #[error("shader program '{program}' failed to compile: {reason}")]
    CompilationFailure { program: String, reason: String },

    /// Every transfer function slot is already filled.
    #[error("all {0} transfer function slots are filled")]
    CapacityExceeded(usize),

    /// Caller broke the parameter contract (out of range steps, bad slot index, wrong uniform type).
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// Program has not finished compiling yet.
    #[error("shader program '{0}' is not ready for drawing")]
    NotReady(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, VolumeError>;
