// Worker - Handler-driven run loop with per-item failure isolation

mod panic_guard;

pub use panic_guard::{execute_guarded_async, PanicGuardResult};

use crate::domain::Message;
use crate::port::{MessageHandler, MessageReceiver, Worker};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Outcome counters of a `HandlerWorker`, summed over all of its executions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    pub succeeded: u64,
    pub failed: u64,
    pub panicked: u64,
}

impl WorkerStats {
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed + self.panicked
    }
}

/// Adapts a `MessageHandler` into a `Worker`
///
/// Every `handle` call runs inside the panic guard: a returned error or a
/// panic is logged and counted, then the loop moves on to the next message.
/// The loop ends only when the buffer is closed and drained.
pub struct HandlerWorker<H> {
    handler: H,
    succeeded: AtomicU64,
    failed: AtomicU64,
    panicked: AtomicU64,
}

impl<H: MessageHandler> HandlerWorker<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            succeeded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn stats(&self) -> WorkerStats {
        WorkerStats {
            succeeded: self.succeeded.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            panicked: self.panicked.load(Ordering::Acquire),
        }
    }

    /// Process one message; never unwinds
    async fn process(&self, message: Message) {
        // The call itself sits inside the async block so a panic raised
        // before the handler's first await is caught too
        let result = execute_guarded_async(async { self.handler.handle(message).await }).await;

        match result {
            PanicGuardResult::Success(Ok(())) => {
                self.succeeded.fetch_add(1, Ordering::AcqRel);
            }
            PanicGuardResult::Success(Err(e)) => {
                warn!(error = %e, "Message processing failed");
                self.failed.fetch_add(1, Ordering::AcqRel);
            }
            PanicGuardResult::Panicked(_) => {
                self.panicked.fetch_add(1, Ordering::AcqRel);
            }
        }
    }
}

#[async_trait]
impl<H: MessageHandler> Worker for HandlerWorker<H> {
    async fn run(&self, receiver: MessageReceiver) {
        debug!("Worker run loop started");
        while let Some(message) = receiver.recv().await {
            self.process(message).await;
        }
        debug!("Worker run loop finished: buffer closed and drained");
    }
}
