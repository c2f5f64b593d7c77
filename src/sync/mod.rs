//! Blocking invocation of retried actions.
//!
//! Four shapes are offered, differing only in whether the action takes an
//! argument and whether it produces a value the result filter checks. They
//! all share the strategy's attempt loop.
use std::any::type_name;

use crate::error::TryError;
use crate::policy::{Acceptance, Tolerance, Unset};
use crate::strategy::Strategy;
use crate::trier::Trier;

impl<S: Strategy, K, P> Trier<S, K, P> {
    /// Run an action that produces no value until it returns `Ok`.
    ///
    /// The result filter does not apply: any `Ok(())` ends the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use trier::{Kind, Trier};
    ///
    /// let trier = Trier::times(3)
    ///     .unwrap()
    ///     .with_interval(Duration::from_millis(1))
    ///     .ignoring([Kind::matching("busy", |e: &&str| *e == "busy")]);
    ///
    /// let mut replies = vec![Ok(()), Err("busy")];
    /// assert!(trier.try_to_run(|| replies.pop().unwrap()).is_ok());
    /// ```
    pub fn try_to_run<E, A>(&self, action: A) -> Result<(), TryError<E>>
    where
        K: Tolerance<E>,
        A: FnMut() -> Result<(), E>,
    {
        self.strategy.run(action, &self.tolerated, &Unset, type_name::<A>())
    }

    /// Run a producer until it returns a value the result filter accepts.
    pub fn try_to_get<T, E, A>(&self, action: A) -> Result<T, TryError<E>>
    where
        K: Tolerance<E>,
        P: Acceptance<T>,
        A: FnMut() -> Result<T, E>,
    {
        self.strategy.run(action, &self.tolerated, &self.filter, type_name::<A>())
    }

    /// Run a consumer of `arg` until it returns `Ok`. Every attempt sees the same argument.
    pub fn try_to_accept<X, E, A>(&self, mut action: A, arg: X) -> Result<(), TryError<E>>
    where
        K: Tolerance<E>,
        A: FnMut(&X) -> Result<(), E>,
    {
        self.strategy.run(|| action(&arg), &self.tolerated, &Unset, type_name::<A>())
    }

    /// Run a function of `arg` until it returns a value the result filter accepts.
    pub fn try_to_apply<X, T, E, A>(&self, mut action: A, arg: X) -> Result<T, TryError<E>>
    where
        K: Tolerance<E>,
        P: Acceptance<T>,
        A: FnMut(&X) -> Result<T, E>,
    {
        self.strategy.run(|| action(&arg), &self.tolerated, &self.filter, type_name::<A>())
    }
}
