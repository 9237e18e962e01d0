// Worker Port - consumer capabilities plugged into the queue engine

use super::MessageReceiver;
use crate::domain::Message;
use async_trait::async_trait;

/// Error type for per-item processing failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Worker trait
///
/// `run` drains the shared buffer and returns only when `recv` yields `None`
/// (intake closed and buffer empty). A conforming implementation absorbs every
/// per-item failure, panics included, and keeps looping.
///
/// Implementations:
/// - HandlerWorker: wraps a `MessageHandler` with panic isolation
#[async_trait]
pub trait Worker: Send + Sync + 'static {
    async fn run(&self, receiver: MessageReceiver);
}

/// Per-item processing logic
///
/// Errors and panics raised here are contained by `HandlerWorker`.
#[async_trait]
pub trait MessageHandler: Send + Sync + 'static {
    async fn handle(&self, message: Message) -> Result<(), BoxError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock handler behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Always succeed
        Success,
        /// Always fail with message
        Fail(String),
        /// Panic when the payload matches these bytes, succeed otherwise
        PanicOn(Vec<u8>),
    }

    /// Mock Message Handler for testing
    pub struct MockHandler {
        behavior: MockBehavior,
        call_count: AtomicUsize,
        seen: Mutex<Vec<Vec<u8>>>,
    }

    impl MockHandler {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                call_count: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }
        pub fn new_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(message.into()))
        }
        pub fn new_panic_on(payload: impl Into<Vec<u8>>) -> Self {
            Self::new(MockBehavior::PanicOn(payload.into()))
        }
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
        /// Payloads handled so far, in call order
        pub fn seen(&self) -> Vec<Vec<u8>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageHandler for MockHandler {
        async fn handle(&self, message: Message) -> Result<(), BoxError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            let bytes = message.to_bytes();
            self.seen.lock().unwrap().push(bytes.clone());

            match &self.behavior {
                MockBehavior::Success => Ok(()),
                MockBehavior::Fail(msg) => Err(msg.clone().into()),
                MockBehavior::PanicOn(trigger) => {
                    if bytes == *trigger {
                        panic!("mock panic on {}", String::from_utf8_lossy(&bytes));
                    }
                    Ok(())
                }
            }
        }
    }

    /// Worker that drains the buffer without doing anything
    #[derive(Debug, Default)]
    pub struct IdleWorker;

    #[async_trait]
    impl Worker for IdleWorker {
        async fn run(&self, receiver: MessageReceiver) {
            while receiver.recv().await.is_some() {}
        }
    }
}
