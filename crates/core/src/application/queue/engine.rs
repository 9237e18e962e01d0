// TaskQueue - the queue engine

use super::live::LiveWorker;
use super::QueueBuilder;
use crate::application::worker::{execute_guarded_async, PanicGuardResult};
use crate::domain::{Message, QueueConfig, QueuedMessage};
use crate::error::{QueueError, Result};
use crate::port::{MessageReceiver, Worker};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, Instrument};

/// Bounded in-process task queue drained by a growable pool of workers
///
/// Lifecycle: `build` -> `start` (any number of times, each adds
/// `worker_count` workers) -> `shutdown` -> `wait`.
///
/// All methods take `&self`; share the queue between producers with `Arc`.
pub struct TaskQueue {
    config: QueueConfig,
    worker: Arc<dyn Worker>,
    /// Intake side. `None` once shutdown has closed it.
    sender: Mutex<Option<mpsc::Sender<Message>>>,
    receiver: MessageReceiver,
    /// Messages sent but not yet received
    resident: Arc<AtomicUsize>,
    live: Arc<watch::Sender<usize>>,
    stopped: AtomicBool,
    next_worker_id: AtomicUsize,
}

impl TaskQueue {
    pub fn builder() -> QueueBuilder {
        QueueBuilder::new()
    }

    /// Expects a normalized, validated config (see `QueueBuilder::build`)
    pub(super) fn new(config: QueueConfig, worker: Arc<dyn Worker>) -> Self {
        let (tx, rx) = mpsc::channel(config.buffer_size);
        let resident = Arc::new(AtomicUsize::new(0));
        let (live, _) = watch::channel(0usize);

        debug!(
            worker_count = config.worker_count,
            buffer_size = config.buffer_size,
            "Queue created"
        );

        Self {
            config,
            worker,
            sender: Mutex::new(Some(tx)),
            receiver: MessageReceiver::new(rx, Arc::clone(&resident)),
            resident,
            live: Arc::new(live),
            stopped: AtomicBool::new(false),
            next_worker_id: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> QueueConfig {
        self.config
    }

    /// Enqueue a message without blocking
    ///
    /// # Errors
    /// - `QueueError::Full` if the buffer is at capacity right now
    /// - `QueueError::Closed` once `shutdown` has been called
    pub fn queue<M: QueuedMessage>(&self, message: M) -> Result<()> {
        self.queue_boxed(Box::new(message))
    }

    /// Enqueue an already boxed message
    #[allow(clippy::let_and_return)]
    pub fn queue_boxed(&self, message: Message) -> Result<()> {
        let guard = lock(&self.sender);
        let Some(sender) = guard.as_ref() else {
            return Err(QueueError::Closed);
        };

        // Bound to a local so the permit borrow ends before the guard drops
        let result = match sender.try_reserve() {
            Ok(permit) => {
                // Count before the message is visible to any worker
                self.resident.fetch_add(1, Ordering::AcqRel);
                permit.send(message);
                Ok(())
            }
            Err(TrySendError::Full(())) => {
                debug!(capacity = self.config.buffer_size, "Queue full, message rejected");
                Err(QueueError::Full {
                    capacity: self.config.buffer_size,
                })
            }
            Err(TrySendError::Closed(())) => Err(QueueError::Closed),
        };
        result
    }

    /// Launch `worker_count` more workers on the shared buffer
    ///
    /// Additive: two calls with a count of 2 leave 4 workers running.
    /// Workers launched after `shutdown` drain what is left and exit.
    ///
    /// # Errors
    /// - `QueueError::NoRuntime` when called outside a Tokio runtime
    pub fn start(&self) -> Result<()> {
        let runtime = Handle::try_current().map_err(|_| QueueError::NoRuntime)?;

        for _ in 0..self.config.worker_count {
            let worker_id = self.next_worker_id.fetch_add(1, Ordering::Relaxed);
            let worker = Arc::clone(&self.worker);
            let receiver = self.receiver.clone();
            let live = LiveWorker::enter(&self.live);

            runtime.spawn(
                async move {
                    debug!("Worker started");
                    // Outer boundary for run loops that let a panic escape
                    if let PanicGuardResult::Panicked(panic_msg) =
                        execute_guarded_async(worker.run(receiver)).await
                    {
                        error!(panic_msg = %panic_msg, "Worker run loop panicked and exited");
                    }
                    debug!("Worker stopped");
                    drop(live);
                }
                .instrument(tracing::debug_span!("worker", worker_id)),
            );
        }

        info!(
            launched = self.config.worker_count,
            workers = self.workers(),
            "Workers started"
        );
        Ok(())
    }

    /// Close intake; workers exit once the buffer is drained
    ///
    /// Idempotent: only the first call has any effect.
    pub fn shutdown(&self) {
        if self
            .stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Shutdown already initiated");
            return;
        }

        // Dropping the only sender closes the channel exactly once
        drop(lock(&self.sender).take());
        info!(pending = self.usage(), "Queue intake closed, draining");
    }

    pub fn is_shutdown(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Wait until every launched worker has returned
    ///
    /// Only guaranteed to return after `shutdown`: without it, idle workers
    /// stay parked on the open buffer and this waits indefinitely.
    pub async fn wait(&self) {
        let mut live = self.live.subscribe();
        // The sender lives in `self`, so the channel cannot close under us
        let _ = live.wait_for(|count| *count == 0).await;
        debug!("All workers exited");
    }

    /// Live worker executions
    pub fn workers(&self) -> usize {
        *self.live.borrow()
    }

    /// Buffer capacity, fixed at construction
    pub fn capacity(&self) -> usize {
        self.config.buffer_size
    }

    /// Messages currently waiting in the buffer
    pub fn usage(&self) -> usize {
        self.resident
            .load(Ordering::Acquire)
            .min(self.config.buffer_size)
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("config", &self.config)
            .field("workers", &self.workers())
            .field("usage", &self.usage())
            .field("shutdown", &self.is_shutdown())
            .finish()
    }
}

/// The guarded data is valid even if a holder panicked
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
