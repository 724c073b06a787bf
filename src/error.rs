use thiserror::Error;

/// Errors raised when building or feeding a [`VolumeMeter`](crate::VolumeMeter).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeterError {
    /// Buffer capacity must be strictly positive.
    #[error("invalid capacity {0}: buffer capacity must be greater than zero")]
    InvalidCapacity(i64),

    /// Sample slice handed to `load` does not match the buffer length.
    #[error("expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The sample buffer could not be allocated.
    #[error("cannot allocate a buffer of {capacity} samples")]
    Allocation { capacity: usize },

    #[error("invalid clip threshold {0}: must be a finite value in [0, 1]")]
    InvalidClipThreshold(f32),

    /// Malformed configuration text.
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for MeterError {
    fn from(err: serde_json::Error) -> Self {
        MeterError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MeterError>;
