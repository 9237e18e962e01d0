// Application Layer - Queue engine and worker run loops

pub mod queue;
pub mod worker;

// Re-exports
pub use queue::{QueueBuilder, TaskQueue};
pub use worker::{execute_guarded_async, HandlerWorker, PanicGuardResult, WorkerStats};
