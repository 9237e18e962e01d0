//! Environment configuration for the daemon

use taskq_core::QueueConfig;
use tracing::warn;

pub const WORKER_COUNT_VAR: &str = "TASKQ_WORKER_COUNT";
pub const BUFFER_SIZE_VAR: &str = "TASKQ_BUFFER_SIZE";

/// Load queue configuration from the process environment
pub fn load() -> QueueConfig {
    load_from(|key| std::env::var(key).ok())
}

/// Load queue configuration through `lookup`
///
/// Unset or unparsable values keep their defaults.
pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> QueueConfig {
    let defaults = QueueConfig::default();
    QueueConfig {
        worker_count: parse_or(&lookup, WORKER_COUNT_VAR, defaults.worker_count),
        buffer_size: parse_or(&lookup, BUFFER_SIZE_VAR, defaults.buffer_size),
    }
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default, "Invalid value, using default");
            default
        }),
    }
}
