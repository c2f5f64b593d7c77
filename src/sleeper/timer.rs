use std::future::Future;
use std::time::Duration;

use super::AsyncSleeper;
use crate::error::Interrupted;

/// Pauses with [`tokio::time::sleep`].
///
/// Cancellation happens by dropping the trier's future, so this sleeper never
/// reports an interruption itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl AsyncSleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = Result<(), Interrupted>> + Send {
        async move {
            if !duration.is_zero() {
                tokio::time::sleep(duration).await;
            }
            Ok(())
        }
    }
}
