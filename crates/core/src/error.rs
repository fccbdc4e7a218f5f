//! Error types for yespower evaluation

use thiserror::Error;

/// Failure of a yespower evaluation
///
/// No digest is produced on any of these; callers must not use output
/// buffers after an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Rejected cost parameters (N, r, or derived size)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The scratch region could not be allocated
    #[error("out of memory: failed to allocate {bytes} bytes of scratch")]
    OutOfMemory { bytes: usize },

    /// An internal consistency check failed
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
