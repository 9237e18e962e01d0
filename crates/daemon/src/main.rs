//! Taskq Daemon - Main Entry Point
//! Feeds stdin lines through the worker pool until EOF or Ctrl+C

mod config;
mod handler;

use anyhow::Result;
use handler::LogHandler;
use std::sync::Arc;
use std::time::Duration;
use taskq_core::{HandlerWorker, TaskQueue};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backoff before retrying an enqueue rejected by a full buffer
const FULL_QUEUE_RETRY_DELAY: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("TASKQ_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("taskq=info,taskq_core=info"))?;

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Taskq v{} starting...", VERSION);

    // 2. Load configuration
    let queue_config = config::load();
    info!(
        worker_count = queue_config.worker_count,
        buffer_size = queue_config.buffer_size,
        "Configuration loaded"
    );

    // 3. Build and start the queue
    let worker = Arc::new(HandlerWorker::new(LogHandler));
    let queue = TaskQueue::builder()
        .shared_worker(Arc::clone(&worker))
        .config(queue_config)
        .build()?;
    queue.start()?;

    info!("System ready. Reading messages from stdin (Ctrl+C to stop)");

    // 4. Produce until EOF or shutdown signal
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => enqueue_with_retry(&queue, line).await?,
                None => {
                    info!("Input closed");
                    break;
                }
            },
            _ = &mut ctrl_c => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    // 5. Graceful shutdown: close intake, let workers drain
    queue.shutdown();
    queue.wait().await;

    let stats = worker.stats();
    info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        panicked = stats.panicked,
        "Shutdown complete."
    );

    Ok(())
}

/// The queue never blocks producers; a full buffer is retried here
async fn enqueue_with_retry(queue: &TaskQueue, line: String) -> Result<()> {
    let mut warned = false;
    loop {
        match queue.queue(line.clone()) {
            Ok(()) => return Ok(()),
            Err(e) if e.is_full() => {
                if !warned {
                    warn!(usage = queue.usage(), "Queue full, retrying");
                    warned = true;
                }
                tokio::time::sleep(FULL_QUEUE_RETRY_DELAY).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
