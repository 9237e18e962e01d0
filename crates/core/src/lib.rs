// Taskq Core - Queue engine, capabilities & failure isolation
// NO transport or I/O dependencies: producers and workers plug in via ports

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{HandlerWorker, QueueBuilder, TaskQueue, WorkerStats};
pub use domain::{JsonMessage, Message, QueueConfig, QueuedMessage};
pub use error::{QueueError, Result};
pub use port::{BoxError, MessageHandler, MessageReceiver, Worker};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
