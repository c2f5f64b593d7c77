//! Delay mechanisms that pause between two attempts.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Interrupted;

/// Blocks the current thread for a real, interruptible amount of time.
pub mod interruptible;
pub use interruptible::{InterruptibleSleeper, Interrupter};

/// Returns immediately without pausing.
pub mod nodelay;
pub use nodelay::NoDelay;

/// Records each requested pause without waiting.
pub mod recording;
pub use recording::RecordingSleeper;

/// Blocks the current thread with [`std::thread::sleep`].
pub mod thread;
pub use thread::ThreadSleeper;

/// Pauses on the tokio timer.
pub mod timer;
pub use timer::TokioSleeper;

/// Pauses the calling thread between two attempts.
pub trait Sleeper {
    /// Blocks for `duration`, or fails if the pause is interrupted.
    fn sleep(&self, duration: Duration) -> Result<(), Interrupted>;
}

/// Pauses the calling task between two attempts.
pub trait AsyncSleeper {
    /// Waits for `duration`, or fails if the pause is interrupted.
    fn sleep(&self, duration: Duration) -> impl Future<Output = Result<(), Interrupted>> + Send;
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        Sleeper::sleep(*self, duration)
    }
}

impl<S: Sleeper + ?Sized> Sleeper for Arc<S> {
    fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        Sleeper::sleep(&**self, duration)
    }
}

impl<S: AsyncSleeper + Sync + ?Sized> AsyncSleeper for &S {
    fn sleep(&self, duration: Duration) -> impl Future<Output = Result<(), Interrupted>> + Send {
        AsyncSleeper::sleep(*self, duration)
    }
}

impl<S: AsyncSleeper + Send + Sync + ?Sized> AsyncSleeper for Arc<S> {
    fn sleep(&self, duration: Duration) -> impl Future<Output = Result<(), Interrupted>> + Send {
        AsyncSleeper::sleep(&**self, duration)
    }
}
