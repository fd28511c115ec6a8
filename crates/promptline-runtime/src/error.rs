#![forbid(unsafe_code)]

//! Errors crossing the executor boundary.
//!
//! Nothing in the session itself is fatal: invalid motions clamp, empty
//! submissions are ignored, and authentication failures are notices.
//! Only the external executor produces a real error value, and the
//! session renders it and carries on.

/// An error from the external command executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The executor is not ready or has gone away.
    Unavailable,
    /// The executor rejected the command line.
    Failed(String),
}

impl ExecutorError {
    /// Convenience constructor for the `Failed` variant.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl core::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "command executor is not available"),
            Self::Failed(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ExecutorError {}
