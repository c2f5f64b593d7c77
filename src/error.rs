//! Errors reported by the triers.
use std::error::Error as StdError;

use thiserror::Error;

/// The dynamic error type that [`Kind::of`](crate::policy::Kind::of) can match by type.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A trier was built with an invalid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The attempt limit must allow at least one attempt.
    #[error("attempt limit must be at least 1")]
    ZeroAttempts,
}

/// A pause between two attempts was interrupted.
///
/// Never tolerated: an interrupted pause always ends the attempt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("interrupted while pausing between attempts")]
pub struct Interrupted;

/// The attempt budget ran out before the action produced an acceptable result.
#[derive(Debug, Error)]
#[error("limit exceeded after {attempts} attempts to perform action {action}")]
pub struct LimitExceeded<E> {
    attempts: u32,
    action: String,
    #[source]
    last_failure: Option<E>,
}

impl<E> LimitExceeded<E> {
    pub(crate) fn new(attempts: u32, action: impl Into<String>, last_failure: Option<E>) -> Self {
        Self {
            attempts,
            action: action.into(),
            last_failure,
        }
    }

    /// Number of attempts that were made.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Description of the action that was tried.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The last tolerated failure, if any attempt failed at all.
    ///
    /// Rejected results are not failures: when every attempt produced an
    /// unacceptable value this is `None`.
    pub fn last_failure(&self) -> Option<&E> {
        self.last_failure.as_ref()
    }

    /// Consumes the error, returning the last tolerated failure.
    pub fn into_last_failure(self) -> Option<E> {
        self.last_failure
    }
}

/// Why a retried action did not produce a value.
#[derive(Debug, Error)]
pub enum TryError<E> {
    /// The action failed with an error that is not tolerated. Retries stopped at once.
    #[error("action failed with an untolerated error: {0}")]
    Failed(E),

    /// Every attempt failed or produced an unacceptable result.
    #[error(transparent)]
    LimitExceeded(LimitExceeded<E>),

    /// A pause between attempts was interrupted.
    #[error("retrying stopped: {0}")]
    Interrupted(#[from] Interrupted),
}

impl<E> TryError<E> {
    /// The untolerated error the action failed with, if that is what ended the sequence.
    pub fn into_failure(self) -> Option<E> {
        match self {
            TryError::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` if the attempt budget ran out.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, TryError::LimitExceeded(_))
    }

    /// Returns `true` if a pause was interrupted.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, TryError::Interrupted(_))
    }
}

/// Returns `true` if a boxed error is an interruption or was caused by one,
/// such as the error of a nested trier whose pause was interrupted.
pub(crate) fn is_interruption(error: &BoxError) -> bool {
    let error: &(dyn StdError + 'static) = &**error;
    std::iter::successors(Some(error), |&error| error.source()).any(|error| error.is::<Interrupted>())
}
