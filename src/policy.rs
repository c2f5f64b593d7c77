//! Which failures a trier tolerates and which results it rejects.
use std::any::type_name;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::error::{BoxError, is_interruption};

/// A configuration slot that has not been set.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unset;

/// Decides whether a failed attempt may be retried.
pub trait Tolerance<E> {
    fn tolerates(&self, error: &E) -> bool;
}

/// Decides whether a produced value must be discarded and the attempt retried.
pub trait Acceptance<T> {
    fn rejects(&self, value: &T) -> bool;
}

impl<E> Tolerance<E> for Unset {
    fn tolerates(&self, _error: &E) -> bool {
        false
    }
}

impl<T> Acceptance<T> for Unset {
    fn rejects(&self, _value: &T) -> bool {
        false
    }
}

/// A named category of failure.
///
/// ```
/// use trier::{BoxError, Kind};
///
/// #[derive(Debug)]
/// struct NetworkError;
/// impl std::fmt::Display for NetworkError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("network error")
///     }
/// }
/// impl std::error::Error for NetworkError {}
///
/// let kind = Kind::of::<NetworkError>();
/// assert!(kind.matches(&BoxError::from(NetworkError)));
/// assert!(!kind.matches(&BoxError::from("something else")));
/// ```
pub struct Kind<E> {
    name: Cow<'static, str>,
    test: Box<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E> Kind<E> {
    /// A kind made of every error for which `test` holds.
    pub fn matching(name: impl Into<Cow<'static, str>>, test: impl Fn(&E) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            test: Box::new(test),
        }
    }

    /// The label used to describe this kind.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if `error` belongs to this kind.
    pub fn matches(&self, error: &E) -> bool {
        (self.test)(error)
    }
}

impl Kind<BoxError> {
    /// Boxed errors whose concrete type is `T`.
    ///
    /// Interruptions never match, even as `Kind::of::<Interrupted>()`.
    pub fn of<T: StdError + 'static>() -> Self {
        Self::matching(type_name::<T>(), |error: &BoxError| error.is::<T>() && !is_interruption(error))
    }

    /// Every boxed error except interruptions.
    pub fn any() -> Self {
        Self::matching("any", |error: &BoxError| !is_interruption(error))
    }
}

impl<E> fmt::Debug for Kind<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Kind").field(&self.name).finish()
    }
}

/// The failure kinds a trier swallows and retries.
#[derive(Debug)]
pub struct Ignoring<E> {
    kinds: Vec<Kind<E>>,
}

impl<E> Ignoring<E> {
    pub(crate) fn new(kinds: impl IntoIterator<Item = Kind<E>>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// The tolerated kinds, in the order they were given.
    pub fn kinds(&self) -> &[Kind<E>] {
        &self.kinds
    }
}

impl<E> Tolerance<E> for Ignoring<E> {
    fn tolerates(&self, error: &E) -> bool {
        self.kinds.iter().any(|kind| kind.matches(error))
    }
}

/// Rejects produced values according to a predicate.
pub struct ResultFilter<F> {
    predicate: F,
    reject_when: bool,
}

impl<F> ResultFilter<F> {
    /// Rejects values for which `predicate` holds.
    pub(crate) fn ignoring_when(predicate: F) -> Self {
        Self {
            predicate,
            reject_when: true,
        }
    }

    /// Rejects values for which `predicate` does not hold.
    pub(crate) fn succeeding_when(predicate: F) -> Self {
        Self {
            predicate,
            reject_when: false,
        }
    }
}

impl<T, F: Fn(&T) -> bool> Acceptance<T> for ResultFilter<F> {
    fn rejects(&self, value: &T) -> bool {
        (self.predicate)(value) == self.reject_when
    }
}

impl<F> fmt::Debug for ResultFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultFilter")
            .field("reject_when", &self.reject_when)
            .finish_non_exhaustive()
    }
}
