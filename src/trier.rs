//! The [`Trier`] builder: a strategy plus the failures and results it tolerates.
use std::time::Duration;

use crate::error::ConfigError;
use crate::policy::{Ignoring, Kind, ResultFilter, Unset};
use crate::strategy::CounterBased;

/// Retries actions with a [`Strategy`](crate::Strategy), tolerating the
/// failure kinds `K` and rejecting results according to `P`.
///
/// Each slot is set once. The setters exist only while the slot is
/// [`Unset`], so setting either slot twice does not compile:
///
/// ```compile_fail
/// use trier::{Kind, Trier};
///
/// let trier = Trier::times(3)
///     .unwrap()
///     .ignoring([Kind::of::<std::io::Error>()])
///     .ignoring([Kind::of::<std::fmt::Error>()]);
/// ```
///
/// ```compile_fail
/// use trier::Trier;
///
/// let trier = Trier::times(3)
///     .unwrap()
///     .ignoring_result_when(|n: &u32| *n == 0)
///     .succeed_only_when(|n: &u32| *n > 10);
/// ```
///
/// A fully built `Trier` is never mutated, so it can be shared between
/// threads and reused for any number of calls.
///
/// ```
/// use std::time::Duration;
/// use trier::{BoxError, Kind, Trier};
///
/// let trier = Trier::times(3)
///     .unwrap()
///     .with_interval(Duration::from_millis(1))
///     .ignoring([Kind::of::<std::io::Error>()])
///     .succeed_only_when(|n: &u32| *n >= 2);
///
/// let mut reads = 0;
/// let value = trier
///     .try_to_get(|| -> Result<u32, BoxError> {
///         reads += 1;
///         Ok(reads)
///     })
///     .unwrap();
/// assert_eq!(value, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Trier<S, K = Unset, P = Unset> {
    pub(crate) strategy: S,
    pub(crate) tolerated: K,
    pub(crate) filter: P,
}

impl Trier<CounterBased> {
    /// A trier making at most `attempts` attempts, pausing
    /// [`DEFAULT_INTERVAL`](crate::DEFAULT_INTERVAL) on the current thread
    /// between them.
    pub fn times(attempts: u32) -> Result<Self, ConfigError> {
        CounterBased::new(attempts).map(Trier::new)
    }
}

impl<S> Trier<S> {
    /// A trier running `strategy` that tolerates no failure and accepts every result.
    pub fn new(strategy: S) -> Self {
        Trier {
            strategy,
            tolerated: Unset,
            filter: Unset,
        }
    }
}

impl<S, K, P> Trier<S, K, P> {
    /// The strategy that runs the attempts.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// The tolerated failure kinds, or [`Unset`] if none were given.
    pub fn tolerated(&self) -> &K {
        &self.tolerated
    }
}

impl<S, P> Trier<S, Unset, P> {
    /// Retry when the action fails with an error matching one of `kinds`.
    ///
    /// Any other error ends the call at once.
    pub fn ignoring<E>(self, kinds: impl IntoIterator<Item = Kind<E>>) -> Trier<S, Ignoring<E>, P> {
        Trier {
            strategy: self.strategy,
            tolerated: Ignoring::new(kinds),
            filter: self.filter,
        }
    }
}

impl<S, K> Trier<S, K, Unset> {
    /// Discard the produced value and retry when `predicate` holds.
    pub fn ignoring_result_when<F>(self, predicate: F) -> Trier<S, K, ResultFilter<F>> {
        Trier {
            strategy: self.strategy,
            tolerated: self.tolerated,
            filter: ResultFilter::ignoring_when(predicate),
        }
    }

    /// Accept a produced value only when `predicate` holds; retry otherwise.
    pub fn succeed_only_when<F>(self, predicate: F) -> Trier<S, K, ResultFilter<F>> {
        Trier {
            strategy: self.strategy,
            tolerated: self.tolerated,
            filter: ResultFilter::succeeding_when(predicate),
        }
    }
}

impl<Sl, K, P> Trier<CounterBased<Sl>, K, P> {
    /// Sets the pause between two attempts.
    pub fn with_interval(self, interval: Duration) -> Self {
        Trier {
            strategy: self.strategy.with_interval(interval),
            ..self
        }
    }

    /// Replaces the delay mechanism used between attempts.
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Trier<CounterBased<S2>, K, P> {
        Trier {
            strategy: self.strategy.with_sleeper(sleeper),
            tolerated: self.tolerated,
            filter: self.filter,
        }
    }
}
