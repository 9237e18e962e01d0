// QueueBuilder - construction-time options

use super::TaskQueue;
use crate::domain::QueueConfig;
use crate::error::{QueueError, Result};
use crate::port::Worker;
use std::sync::Arc;

/// Collects queue options and validates them in `build`
///
/// # Example
/// ```text
/// let queue = TaskQueue::builder()
///     .worker(HandlerWorker::new(MyHandler))
///     .worker_count(2)
///     .buffer_size(100)
///     .build()?;
/// ```
///
/// A worker is mandatory; every other option has a default.
#[derive(Default)]
pub struct QueueBuilder {
    worker: Option<Arc<dyn Worker>>,
    config: QueueConfig,
}

impl QueueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worker<W: Worker>(mut self, worker: W) -> Self {
        self.worker = Some(Arc::new(worker));
        self
    }

    /// Like `worker`, but the caller keeps a handle (e.g. to read stats)
    pub fn shared_worker<W: Worker>(mut self, worker: Arc<W>) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Workers launched per `start` call; zero means the default
    pub fn worker_count(mut self, count: usize) -> Self {
        self.config.worker_count = count;
        self
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    /// Replace all numeric options at once; later setters still override
    pub fn config(mut self, config: QueueConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<TaskQueue> {
        let worker = self.worker.ok_or(QueueError::MissingWorker)?;
        let config = self.config.normalized();
        config.validate()?;
        Ok(TaskQueue::new(config, worker))
    }
}

impl std::fmt::Debug for QueueBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueBuilder")
            .field("has_worker", &self.worker.is_some())
            .field("config", &self.config)
            .finish()
    }
}
