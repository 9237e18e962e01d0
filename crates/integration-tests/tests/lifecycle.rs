//! Queue lifecycle - construction, start, shutdown, wait & introspection

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taskq_core::port::worker::mocks::{IdleWorker, MockHandler};
use taskq_core::{
    BoxError, HandlerWorker, JsonMessage, Message, MessageHandler, QueueConfig, QueueError,
    QueuedMessage, TaskQueue,
};

const SETTLE: Duration = Duration::from_millis(20);

#[test]
fn test_new_queue_requires_worker() {
    let result = TaskQueue::builder().build();
    assert!(matches!(result, Err(QueueError::MissingWorker)));

    let queue = TaskQueue::builder().worker(IdleWorker).build();
    assert!(queue.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_worker_num_is_additive() {
    let queue = TaskQueue::builder()
        .worker(IdleWorker)
        .worker_count(2)
        .build()
        .unwrap();

    queue.start().unwrap();
    queue.start().unwrap();
    tokio::time::sleep(SETTLE).await;
    assert_eq!(queue.workers(), 4);

    queue.shutdown();
    queue.wait().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_once() {
    let queue = TaskQueue::builder()
        .worker(IdleWorker)
        .worker_count(2)
        .build()
        .unwrap();

    queue.start().unwrap();
    tokio::time::sleep(SETTLE).await;
    assert_eq!(queue.workers(), 2);

    queue.shutdown();
    // Second call must be a silent no-op
    queue.shutdown();
    queue.wait().await;
    assert_eq!(queue.workers(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_worker_status() {
    let worker = Arc::new(HandlerWorker::new(MockHandler::new_success()));
    let queue = TaskQueue::builder()
        .shared_worker(Arc::clone(&worker))
        .worker_count(2)
        .buffer_size(100)
        .build()
        .unwrap();

    for _ in 0..4 {
        queue.queue("foobar").unwrap();
    }
    assert_eq!(queue.capacity(), 100);
    assert_eq!(queue.usage(), 4);

    queue.start().unwrap();
    tokio::time::sleep(SETTLE).await;
    assert_eq!(queue.workers(), 2);

    queue.shutdown();
    queue.wait().await;
    assert_eq!(queue.workers(), 0);
    assert_eq!(queue.usage(), 0);
    assert_eq!(queue.capacity(), 100);
    assert_eq!(worker.stats().succeeded, 4);
}

#[test]
fn test_full_queue_rejects() {
    let queue = TaskQueue::builder()
        .worker(IdleWorker)
        .buffer_size(3)
        .build()
        .unwrap();

    for i in 0..3 {
        queue.queue(format!("item-{}", i)).unwrap();
    }
    assert_eq!(queue.usage(), queue.capacity());

    let err = queue.queue("overflow").unwrap_err();
    assert!(err.is_full());
    assert_eq!(queue.usage(), 3);
}

#[tokio::test]
async fn test_closed_queue_rejects_enqueue() {
    let queue = TaskQueue::builder().worker(IdleWorker).build().unwrap();
    queue.start().unwrap();
    queue.shutdown();

    assert_eq!(queue.queue("late").unwrap_err(), QueueError::Closed);
    queue.wait().await;
}

#[tokio::test]
async fn test_builder_accepts_config_document() {
    let config: QueueConfig =
        serde_json::from_str(r#"{"worker_count": 3, "buffer_size": 7}"#).unwrap();
    let queue = TaskQueue::builder()
        .worker(IdleWorker)
        .config(config)
        .build()
        .unwrap();

    assert_eq!(queue.capacity(), 7);
    queue.start().unwrap();
    assert_eq!(queue.workers(), 3);
    queue.shutdown();
    queue.wait().await;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Thumbnail {
    path: String,
    width: u32,
}

#[derive(Default)]
struct ThumbnailHandler {
    done: Mutex<Vec<Thumbnail>>,
}

#[async_trait::async_trait]
impl MessageHandler for ThumbnailHandler {
    async fn handle(&self, message: Message) -> Result<(), BoxError> {
        let job: Thumbnail = serde_json::from_slice(&message.to_bytes())?;
        self.done.lock().unwrap().push(job);
        Ok(())
    }
}

#[tokio::test]
async fn test_json_messages_reach_handler() {
    let worker = Arc::new(HandlerWorker::new(ThumbnailHandler::default()));
    let queue = TaskQueue::builder()
        .shared_worker(Arc::clone(&worker))
        .build()
        .unwrap();

    let job = Thumbnail {
        path: "a.png".to_string(),
        width: 128,
    };
    queue.queue(JsonMessage::new(&job).unwrap()).unwrap();
    // Not JSON: the handler fails on it, the loop carries on
    queue.queue("garbage").unwrap();

    queue.start().unwrap();
    queue.shutdown();
    queue.wait().await;

    assert_eq!(*worker.handler().done.lock().unwrap(), vec![job]);
    assert_eq!(worker.stats().failed, 1);
}
