// Live worker bookkeeping

use std::sync::Arc;
use tokio::sync::watch;

/// Registration of one running worker execution
///
/// Increments the live count on creation and decrements it on drop, so the
/// count stays right whether the run loop returns, panics or is dropped
/// unpolled by a runtime shutting down.
pub(crate) struct LiveWorker {
    live: Arc<watch::Sender<usize>>,
}

impl LiveWorker {
    pub(crate) fn enter(live: &Arc<watch::Sender<usize>>) -> Self {
        live.send_modify(|count| *count += 1);
        Self {
            live: Arc::clone(live),
        }
    }
}

impl Drop for LiveWorker {
    fn drop(&mut self) {
        self.live
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}
