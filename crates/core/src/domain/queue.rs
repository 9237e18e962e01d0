// Queue Configuration Domain Model

use crate::error::{QueueError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

/// Workers launched per `start` call when unset (or set to zero)
pub const DEFAULT_WORKER_COUNT: usize = 1;

/// Buffer capacity when unset
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// Queue configuration
///
/// Resolved once at construction; the engine never changes it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Workers launched by each `start` call
    pub worker_count: usize,
    /// Capacity of the bounded buffer
    pub buffer_size: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl QueueConfig {
    pub fn new(worker_count: usize, buffer_size: usize) -> Self {
        Self {
            worker_count,
            buffer_size,
        }
    }

    /// A zero worker count falls back to the default instead of failing
    pub fn normalized(self) -> Self {
        Self {
            worker_count: if self.worker_count == 0 {
                DEFAULT_WORKER_COUNT
            } else {
                self.worker_count
            },
            ..self
        }
    }

    /// Validate buffer bounds
    ///
    /// The buffer must hold at least one item and stay within the channel's
    /// permit limit.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(QueueError::Config("buffer size must be positive".to_string()));
        }
        if self.buffer_size > Semaphore::MAX_PERMITS {
            return Err(QueueError::Config(format!(
                "buffer size {} exceeds maximum {}",
                self.buffer_size,
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }
}
