// Receive-only view of the queue buffer

use crate::domain::Message;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Shared, receive-only handle on the buffer
///
/// Every worker gets a clone. Each message is handed to exactly one caller of
/// `recv`; a single caller sees messages in FIFO order.
#[derive(Clone)]
pub struct MessageReceiver {
    rx: Arc<Mutex<mpsc::Receiver<Message>>>,
    resident: Arc<AtomicUsize>,
}

impl MessageReceiver {
    /// `resident` must be incremented by the producer before the message
    /// becomes visible on the channel.
    pub(crate) fn new(rx: mpsc::Receiver<Message>, resident: Arc<AtomicUsize>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
            resident,
        }
    }

    /// Wait for the next message
    ///
    /// Returns `None` only once intake is closed and the buffer is drained.
    pub async fn recv(&self) -> Option<Message> {
        let message = self.rx.lock().await.recv().await;
        if message.is_some() {
            self.resident.fetch_sub(1, Ordering::AcqRel);
        }
        message
    }
}

impl std::fmt::Debug for MessageReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageReceiver")
            .field("resident", &self.resident.load(Ordering::Acquire))
            .finish()
    }
}
