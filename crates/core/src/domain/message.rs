// Queued Message Domain Model

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A unit of work accepted by the queue
///
/// The only requirement is conversion to bytes. The engine takes ownership at
/// enqueue time and never mutates the message.
pub trait QueuedMessage: Send + Sync + 'static {
    fn to_bytes(&self) -> Vec<u8>;
}

/// Message as carried by the buffer
pub type Message = Box<dyn QueuedMessage>;

impl std::fmt::Debug for dyn QueuedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedMessage")
            .field("len", &self.to_bytes().len())
            .finish()
    }
}

impl QueuedMessage for Vec<u8> {
    fn to_bytes(&self) -> Vec<u8> {
        self.clone()
    }
}

impl QueuedMessage for String {
    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl QueuedMessage for &'static str {
    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// JSON payload, encoded once at construction so `to_bytes` cannot fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonMessage {
    bytes: Vec<u8>,
}

impl JsonMessage {
    pub fn new<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            bytes: serde_json::to_vec(value)?,
        })
    }

    /// Decode the payload back into a typed value
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.bytes)
    }
}

impl QueuedMessage for JsonMessage {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}
