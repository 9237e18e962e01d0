// Port Layer - Interfaces for pluggable collaborators

pub mod receiver;
pub mod worker;

// Re-exports
pub use receiver::MessageReceiver;
pub use worker::{BoxError, MessageHandler, Worker};
