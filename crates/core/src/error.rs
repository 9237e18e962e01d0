// Central Error Type for the Queue Engine

use thiserror::Error;

/// Engine-level error type
///
/// Only construction and enqueue fail synchronously. Per-item processing
/// failures stay inside the worker and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Configuration error: a worker is required")]
    MissingWorker,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Queue full: capacity {capacity} reached")]
    Full { capacity: usize },

    #[error("Queue closed: shutdown already initiated")]
    Closed,

    #[error("No Tokio runtime available to spawn workers")]
    NoRuntime,
}

impl QueueError {
    /// True for the recoverable capacity condition (caller may retry)
    pub fn is_full(&self) -> bool {
        matches!(self, QueueError::Full { .. })
    }
}

/// Result type alias using QueueError
pub type Result<T> = std::result::Result<T, QueueError>;
