//! Message handler used by the daemon

use async_trait::async_trait;
use taskq_core::{BoxError, Message, MessageHandler, QueuedMessage};
use tracing::info;

/// Logs each line it receives; blank lines are rejected
pub struct LogHandler;

#[async_trait]
impl MessageHandler for LogHandler {
    async fn handle(&self, message: Message) -> Result<(), BoxError> {
        let bytes = message.to_bytes();
        let text = String::from_utf8_lossy(&bytes);
        if text.trim().is_empty() {
            return Err("blank message".into());
        }
        info!(len = bytes.len(), text = %text, "Processed message");
        Ok(())
    }
}
