use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::warn;

use super::Sleeper;
use crate::error::Interrupted;

#[derive(Debug, Default)]
struct Signal {
    interrupted: Mutex<bool>,
    wakeup: Condvar,
}

/// A real pause that another thread can cut short.
///
/// An interruption is consumed by the pause it aborts. If nobody is pausing
/// when [`Interrupter::interrupt`] is called, the next pause fails at once.
///
/// ```
/// use std::time::Duration;
/// use trier::{CounterBased, InterruptibleSleeper, Kind, Trier};
///
/// let sleeper = InterruptibleSleeper::new();
/// let interrupter = sleeper.interrupter();
/// let trier = Trier::new(CounterBased::new(5).unwrap().with_sleeper(sleeper).with_interval(Duration::from_secs(60)))
///     .ignoring([Kind::matching("any", |_: &&str| true)]);
///
/// interrupter.interrupt();
/// let result = trier.try_to_run(|| Err("still down"));
/// assert!(result.unwrap_err().is_interrupted());
/// ```
#[derive(Debug, Default, Clone)]
pub struct InterruptibleSleeper {
    signal: Arc<Signal>,
}

/// Handle that interrupts the pauses of an [`InterruptibleSleeper`].
#[derive(Debug, Clone)]
pub struct Interrupter {
    signal: Arc<Signal>,
}

impl InterruptibleSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that can interrupt this sleeper from another thread.
    pub fn interrupter(&self) -> Interrupter {
        Interrupter {
            signal: Arc::clone(&self.signal),
        }
    }
}

impl Interrupter {
    /// Interrupts the current pause, or the next one if none is running.
    pub fn interrupt(&self) {
        *self.signal.interrupted.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.signal.wakeup.notify_all();
    }
}

impl Sleeper for InterruptibleSleeper {
    fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        // `None` when the pause outlasts what `Instant` can represent: wait for an interrupt only.
        let deadline = Instant::now().checked_add(duration);
        let mut interrupted = self.signal.interrupted.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if *interrupted {
                *interrupted = false;
                warn!("pause of {duration:?} was interrupted");
                return Err(Interrupted);
            }
            // Spurious wakeups loop back and re-check both the flag and the deadline.
            interrupted = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    match self.signal.wakeup.wait_timeout(interrupted, deadline - now) {
                        Ok((guard, _)) => guard,
                        Err(poisoned) => poisoned.into_inner().0,
                    }
                }
                None => self.signal.wakeup.wait(interrupted).unwrap_or_else(PoisonError::into_inner),
            };
        }
    }
}
