//! # Trier
//!
//! A small retry primitive for Rust: run an action until it succeeds, produces
//! an acceptable result, or a bounded number of attempts is exhausted.
//!
//! `trier` masks transient failures (flaky calls, eventual-consistency
//! polling) behind a simple call-and-retry contract. A [`Trier`] pairs a
//! retry [`Strategy`] with two optional filters:
//!
//! - the failure [`Kind`]s it tolerates: any other error ends the call at once;
//! - a predicate over produced values: rejected values are discarded and the
//!   action is tried again.
//!
//! The provided strategy, [`CounterBased`], makes at most N attempts with a
//! fixed pause between them. The pause goes through a [`Sleeper`], so tests
//! can substitute [`NoDelay`] or [`RecordingSleeper`] and never wait.
//!
//! ## Features
//!
//! - Blocking retries through the `sync` module
//! - Asynchronous retries through the `unsync` module
//! - Interruptible pauses with [`InterruptibleSleeper`]
//!
//! ## Usage Examples
//!
//! ### Synchronous Usage
//!
//! ```rust
//! use std::time::Duration;
//! use trier::{BoxError, Kind, Trier};
//!
//! #[derive(Debug)]
//! struct NetworkError;
//! impl std::fmt::Display for NetworkError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("network error")
//!     }
//! }
//! impl std::error::Error for NetworkError {}
//!
//! let trier = Trier::times(3)?
//!     .with_interval(Duration::from_millis(10))
//!     .ignoring([Kind::of::<NetworkError>()]);
//!
//! let mut attempts = 0;
//! let reply = trier.try_to_get(|| -> Result<&'static str, BoxError> {
//!     attempts += 1;
//!     if attempts < 3 { Err(NetworkError.into()) } else { Ok("pong") }
//! });
//!
//! assert_eq!(reply.map_err(|err| err.to_string())?, "pong");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Polling Until A Result Is Acceptable
//!
//! ```rust
//! use trier::{NoDelay, Trier, TryError};
//!
//! let trier = Trier::times(5)
//!     .unwrap()
//!     .with_sleeper(NoDelay)
//!     .succeed_only_when(|status: &&str| *status == "ready");
//!
//! let err = trier.try_to_get(|| Ok::<_, std::io::Error>("pending")).unwrap_err();
//! match err {
//!     // no attempt failed, so there is no cause
//!     TryError::LimitExceeded(err) => assert!(err.last_failure().is_none()),
//!     other => panic!("{other}"),
//! }
//! ```
//!
//! ## Acknowledgment
//! The design follows the `Trier` / `CounterBasedTrier` classes of the Java
//! library `ru.stqa.trier`.
pub mod error;
pub mod policy;
pub mod sleeper;
pub mod strategy;
pub mod sync;
pub mod trier;
pub mod unsync;

pub use error::{BoxError, ConfigError, Interrupted, LimitExceeded, TryError};
pub use policy::{Acceptance, Ignoring, Kind, ResultFilter, Tolerance, Unset};
pub use sleeper::{
    AsyncSleeper, InterruptibleSleeper, Interrupter, NoDelay, RecordingSleeper, Sleeper, ThreadSleeper, TokioSleeper,
};
pub use strategy::{CounterBased, DEFAULT_INTERVAL, Strategy};
pub use trier::Trier;
pub use unsync::AsyncStrategy;
