// Domain Layer - Message capability and queue configuration

pub mod message;
pub mod queue;

// Re-exports
pub use message::{JsonMessage, Message, QueuedMessage};
pub use queue::{QueueConfig, DEFAULT_BUFFER_SIZE, DEFAULT_WORKER_COUNT};
