use std::time::Duration;

use super::Sleeper;
use crate::error::Interrupted;

/// Pauses with [`std::thread::sleep`]. Zero-length pauses are skipped.
///
/// A plain thread sleep cannot be interrupted, so this sleeper never fails.
/// Use [`InterruptibleSleeper`](super::InterruptibleSleeper) when another
/// thread must be able to stop a waiting trier.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
        Ok(())
    }
}
