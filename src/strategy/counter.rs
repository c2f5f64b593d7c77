use std::time::Duration;

use log::{debug, trace, warn};

use super::Strategy;
use crate::error::{ConfigError, LimitExceeded, TryError};
use crate::policy::{Acceptance, Tolerance};
use crate::sleeper::{Sleeper, ThreadSleeper};

/// Pause between two attempts when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Attempts an action at most `attempts` times, pausing `interval` between
/// two attempts.
///
/// No pause follows the final attempt. Each run is independent, so one
/// `CounterBased` can serve any number of calls.
#[derive(Debug, Clone)]
pub struct CounterBased<S = ThreadSleeper> {
    attempts: u32,
    interval: Duration,
    sleeper: S,
}

impl CounterBased {
    /// Create a new [`CounterBased`] allowing `attempts` attempts, pausing
    /// [`DEFAULT_INTERVAL`] on the current thread between them.
    pub fn new(attempts: u32) -> Result<Self, ConfigError> {
        if attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(CounterBased {
            attempts,
            interval: DEFAULT_INTERVAL,
            sleeper: ThreadSleeper,
        })
    }
}

impl<S> CounterBased<S> {
    /// Replaces the pause between attempts.
    pub fn with_interval(self, interval: Duration) -> Self {
        CounterBased { interval, ..self }
    }

    /// Replaces the delay mechanism used between attempts.
    pub fn with_sleeper<S2>(self, sleeper: S2) -> CounterBased<S2> {
        CounterBased {
            attempts: self.attempts,
            interval: self.interval,
            sleeper,
        }
    }

    /// The maximum number of attempts.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The pause between attempts.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The sleeper that performs the pauses.
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Whether another attempt follows `attempt` (1-based).
    pub(crate) fn has_next(&self, attempt: u32) -> bool {
        attempt < self.attempts
    }

    pub(crate) fn give_up<E>(&self, description: &str, last_failure: Option<E>) -> TryError<E> {
        warn!(
            "limit exceeded after {} attempts to perform {description} (last attempt {})",
            self.attempts,
            if last_failure.is_some() { "failed" } else { "was rejected" },
        );
        TryError::LimitExceeded(LimitExceeded::new(self.attempts, description, last_failure))
    }
}

/// What a single attempt ended with.
pub(crate) enum Outcome<T, E> {
    Accepted(T),
    Rejected,
    Tolerated(E),
    Fatal(E),
}

impl<T, E> Outcome<T, E> {
    pub(crate) fn classify(
        result: Result<T, E>,
        tolerance: &impl Tolerance<E>,
        acceptance: &impl Acceptance<T>,
    ) -> Self {
        match result {
            Ok(value) if acceptance.rejects(&value) => Outcome::Rejected,
            Ok(value) => Outcome::Accepted(value),
            Err(error) if tolerance.tolerates(&error) => Outcome::Tolerated(error),
            Err(error) => Outcome::Fatal(error),
        }
    }
}

impl<S: Sleeper> Strategy for CounterBased<S> {
    fn run<T, E, A>(
        &self,
        mut action: A,
        tolerance: &impl Tolerance<E>,
        acceptance: &impl Acceptance<T>,
        description: &str,
    ) -> Result<T, TryError<E>>
    where
        A: FnMut() -> Result<T, E>,
    {
        let mut last_failure = None;

        for attempt in 1..=self.attempts {
            trace!("attempt {attempt}/{} of {description}", self.attempts);
            match Outcome::classify(action(), tolerance, acceptance) {
                Outcome::Accepted(value) => {
                    if attempt > 1 {
                        debug!("{description} succeeded on attempt {attempt}/{}", self.attempts);
                    }
                    return Ok(value);
                }
                Outcome::Rejected => trace!("attempt {attempt} of {description} produced an unacceptable result"),
                Outcome::Tolerated(error) => {
                    debug!("attempt {attempt} of {description} failed with a tolerated error");
                    last_failure = Some(error);
                }
                Outcome::Fatal(error) => return Err(TryError::Failed(error)),
            }

            if self.has_next(attempt) {
                self.sleeper.sleep(self.interval)?;
            }
        }

        Err(self.give_up(description, last_failure))
    }
}
