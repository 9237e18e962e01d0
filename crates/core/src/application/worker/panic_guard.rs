// Panic isolation for worker safety
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::error;

/// Result of a panic-guarded execution
#[derive(Debug)]
pub enum PanicGuardResult<T> {
    /// Execution completed (the value may itself be an error)
    Success(T),
    /// Execution panicked
    Panicked(String),
}

impl<T> PanicGuardResult<T> {
    pub fn is_panicked(&self) -> bool {
        matches!(self, PanicGuardResult::Panicked(_))
    }
}

/// Drive a future to completion with panic isolation
///
/// A panic raised while polling `future` is caught, logged and returned as
/// `PanicGuardResult::Panicked`. Nothing unwinds past this call.
///
/// # Example
/// ```text
/// let result = execute_guarded_async(async {
///     handler.handle(message).await
/// }).await;
///
/// if let PanicGuardResult::Panicked(msg) = result {
///     // message dropped, loop continues
/// }
/// ```
pub async fn execute_guarded_async<F, T>(future: F) -> PanicGuardResult<T>
where
    F: Future<Output = T>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => PanicGuardResult::Success(result),
        Err(panic_info) => {
            let panic_msg = panic_message(panic_info.as_ref());
            error!(panic_msg = %panic_msg, "Worker task panicked");
            PanicGuardResult::Panicked(panic_msg)
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_passes_value_through() {
        let result = execute_guarded_async(async { 42 }).await;
        assert!(matches!(result, PanicGuardResult::Success(42)));
    }

    #[tokio::test]
    async fn test_static_str_panic_is_caught() {
        let result: PanicGuardResult<()> = execute_guarded_async(async {
            panic!("boom");
        })
        .await;
        assert!(matches!(result, PanicGuardResult::Panicked(ref m) if m == "boom"));
    }

    #[tokio::test]
    async fn test_formatted_panic_after_await_is_caught() {
        let result: PanicGuardResult<()> = execute_guarded_async(async {
            tokio::task::yield_now().await;
            panic!("item {} failed", 7);
        })
        .await;
        assert!(result.is_panicked());
        assert!(matches!(result, PanicGuardResult::Panicked(ref m) if m == "item 7 failed"));
    }

    #[tokio::test]
    async fn test_non_string_payload() {
        let result: PanicGuardResult<()> = execute_guarded_async(async {
            std::panic::panic_any(13_u32);
        })
        .await;
        assert!(matches!(result, PanicGuardResult::Panicked(ref m) if m == "Unknown panic"));
    }
}
