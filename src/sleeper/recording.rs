use std::future::{self, Future};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::{AsyncSleeper, Sleeper};
use crate::error::Interrupted;

/// A sleeper that never waits but remembers every pause it was asked for.
///
/// Handy in tests: pass `&recorder` to the trier and inspect it afterwards.
///
/// ```
/// use std::time::Duration;
/// use trier::{Kind, RecordingSleeper, Trier};
///
/// let recorder = RecordingSleeper::new();
/// let trier = Trier::times(3)
///     .unwrap()
///     .with_interval(Duration::from_secs(1))
///     .with_sleeper(&recorder)
///     .ignoring([Kind::matching("any", |_: &&str| true)]);
/// let result = trier.try_to_run(|| Err("never works"));
///
/// assert!(result.unwrap_err().is_limit_exceeded());
/// assert_eq!(recorder.pauses(), vec![Duration::from_secs(1); 2]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pause requested so far, in order.
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of pauses requested so far.
    pub fn count(&self) -> usize {
        self.pauses.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Sum of all pauses requested so far.
    pub fn total(&self) -> Duration {
        self.pauses.lock().unwrap_or_else(PoisonError::into_inner).iter().sum()
    }

    fn record(&self, duration: Duration) {
        self.pauses.lock().unwrap_or_else(PoisonError::into_inner).push(duration);
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        self.record(duration);
        Ok(())
    }
}

impl AsyncSleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = Result<(), Interrupted>> + Send {
        self.record(duration);
        future::ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_pauses_in_order() {
        let recorder = RecordingSleeper::new();
        Sleeper::sleep(&recorder, Duration::from_millis(10)).unwrap();
        Sleeper::sleep(&recorder, Duration::from_millis(20)).unwrap();

        assert_eq!(recorder.count(), 2);
        assert_eq!(recorder.pauses(), vec![Duration::from_millis(10), Duration::from_millis(20)]);
        assert_eq!(recorder.total(), Duration::from_millis(30));
    }
}
