//! Error types for fault queue operations.

use crate::AllocError;

/// Fault queue errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The queue's initial storage could not be allocated.
    #[error("Fault queue cannot be created")]
    CreationFailed(#[source] AllocError),
}

impl QueueError {
    /// Whether the jig can continue after this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, QueueError::CreationFailed(_))
    }
}

/// Result type for fault queue operations.
pub type QueueResult<T> = Result<T, QueueError>;
