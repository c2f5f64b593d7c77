//! Asynchronous invocation of retried actions.
//!
//! Same attempt loop as [`sync`](crate::sync), for actions returning futures.
//! The pause awaits an [`AsyncSleeper`] instead of blocking the thread, and
//! dropping the returned future abandons the remaining attempts.
use std::any::type_name;
use std::future::Future;

use log::{debug, trace};

use crate::error::TryError;
use crate::policy::{Acceptance, Tolerance, Unset};
use crate::sleeper::AsyncSleeper;
use crate::strategy::CounterBased;
use crate::strategy::counter::Outcome;
use crate::trier::Trier;

/// The asynchronous counterpart of [`Strategy`](crate::Strategy).
pub trait AsyncStrategy {
    /// Runs the attempt loop for the futures made by `action`.
    fn run_async<T, E, A, F>(
        &self,
        action: A,
        tolerance: &impl Tolerance<E>,
        acceptance: &impl Acceptance<T>,
        description: &str,
    ) -> impl Future<Output = Result<T, TryError<E>>>
    where
        A: FnMut() -> F,
        F: Future<Output = Result<T, E>>;
}

impl<S: AsyncSleeper> AsyncStrategy for CounterBased<S> {
    async fn run_async<T, E, A, F>(
        &self,
        mut action: A,
        tolerance: &impl Tolerance<E>,
        acceptance: &impl Acceptance<T>,
        description: &str,
    ) -> Result<T, TryError<E>>
    where
        A: FnMut() -> F,
        F: Future<Output = Result<T, E>>,
    {
        let attempts = self.attempts();
        let mut last_failure = None;

        for attempt in 1..=attempts {
            trace!("attempt {attempt}/{attempts} of {description}");
            // Invoke the factory to obtain a new Future for this attempt.
            match Outcome::classify(action().await, tolerance, acceptance) {
                Outcome::Accepted(value) => {
                    if attempt > 1 {
                        debug!("{description} succeeded on attempt {attempt}/{attempts}");
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
                AsyncSleeper::sleep(self.sleeper(), self.interval()).await?;
            }
        }

        Err(self.give_up(description, last_failure))
    }
}

impl<S: AsyncStrategy, K, P> Trier<S, K, P> {
    /// Run an asynchronous action that produces no value until it returns `Ok`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::time::Duration;
    /// use trier::{Kind, TokioSleeper, Trier};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let trier = Trier::times(3)
    ///     .unwrap()
    ///     .with_sleeper(TokioSleeper)
    ///     .with_interval(Duration::from_millis(1))
    ///     .ignoring([Kind::matching("busy", |e: &&str| *e == "busy")]);
    ///
    /// let calls = Arc::new(AtomicU32::new(0));
    /// let result = trier
    ///     .try_to_run_async(|| {
    ///         let calls = calls.clone();
    ///         async move {
    ///             if calls.fetch_add(1, Ordering::SeqCst) == 0 { Err("busy") } else { Ok(()) }
    ///         }
    ///     })
    ///     .await;
    ///
    /// assert!(result.is_ok());
    /// assert_eq!(calls.load(Ordering::SeqCst), 2);
    /// # }
    /// ```
    pub async fn try_to_run_async<E, A, F>(&self, action: A) -> Result<(), TryError<E>>
    where
        K: Tolerance<E>,
        A: FnMut() -> F,
        F: Future<Output = Result<(), E>>,
    {
        self.strategy.run_async(action, &self.tolerated, &Unset, type_name::<A>()).await
    }

    /// Run an asynchronous producer until it yields a value the result filter accepts.
    pub async fn try_to_get_async<T, E, A, F>(&self, action: A) -> Result<T, TryError<E>>
    where
        K: Tolerance<E>,
        P: Acceptance<T>,
        A: FnMut() -> F,
        F: Future<Output = Result<T, E>>,
    {
        self.strategy.run_async(action, &self.tolerated, &self.filter, type_name::<A>()).await
    }

    /// Run an asynchronous consumer of `arg` until it returns `Ok`.
    ///
    /// Each attempt receives its own clone of `arg`.
    pub async fn try_to_accept_async<X, E, A, F>(&self, mut action: A, arg: X) -> Result<(), TryError<E>>
    where
        K: Tolerance<E>,
        X: Clone,
        A: FnMut(X) -> F,
        F: Future<Output = Result<(), E>>,
    {
        self.strategy
            .run_async(|| action(arg.clone()), &self.tolerated, &Unset, type_name::<A>())
            .await
    }

    /// Run an asynchronous function of `arg` until it yields a value the result filter accepts.
    ///
    /// Each attempt receives its own clone of `arg`.
    pub async fn try_to_apply_async<X, T, E, A, F>(&self, mut action: A, arg: X) -> Result<T, TryError<E>>
    where
        K: Tolerance<E>,
        P: Acceptance<T>,
        X: Clone,
        A: FnMut(X) -> F,
        F: Future<Output = Result<T, E>>,
    {
        self.strategy
            .run_async(|| action(arg.clone()), &self.tolerated, &self.filter, type_name::<A>())
            .await
    }
}
