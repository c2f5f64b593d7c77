//! Strategies that run the attempt loop of a [`Trier`](crate::Trier).
use crate::error::TryError;
use crate::policy::{Acceptance, Tolerance};

/// Retries up to a fixed number of attempts with a fixed pause in between.
pub mod counter;
pub use counter::{CounterBased, DEFAULT_INTERVAL};

/// Runs an action until it yields an acceptable value, fails with an
/// untolerated error, or the strategy gives up.
///
/// Further strategies (time-bounded, backoff) are sibling implementations.
pub trait Strategy {
    /// Runs the attempt loop for `action`.
    ///
    /// `description` names the action in the error reported when the
    /// strategy gives up.
    fn run<T, E, A>(
        &self,
        action: A,
        tolerance: &impl Tolerance<E>,
        acceptance: &impl Acceptance<T>,
        description: &str,
    ) -> Result<T, TryError<E>>
    where
        A: FnMut() -> Result<T, E>;
}
