//! Drives the public API the way a caller would: a flaky remote service that
//! sometimes times out, sometimes refuses credentials and sometimes answers
//! with data that is not ready yet.
//!
//! For all cases, we test if the operation:
//!   1) is good at the first shot;
//!   2) recovered from transient failures after retrying;
//!   3) failed fatally, with no retry;
//!   4) gave up after exhausting its attempts;
//!   5) was interrupted while pausing.

use std::cell::Cell;
use std::sync::Once;
use std::thread;
use std::time::{Duration, Instant};

use log::LevelFilter;
use simple_logger::SimpleLogger;
use thiserror::Error;
use trier::{BoxError, InterruptibleSleeper, Kind, RecordingSleeper, Trier, TryError};

#[derive(Debug, Clone, Error, PartialEq)]
enum ServiceError {
    #[error("request timed out")]
    Timeout,
    #[error("wrong credentials")]
    WrongCredentials,
}

#[derive(Debug, Error)]
#[error("connection reset")]
struct ConnectionReset;

/// A fake remote service answering from a script of replies.
struct Service {
    replies: Vec<Result<u32, ServiceError>>,
    calls: Cell<usize>,
}

impl Service {
    fn new(replies: Vec<Result<u32, ServiceError>>) -> Self {
        Self { replies, calls: Cell::new(0) }
    }

    fn query(&self) -> Result<u32, ServiceError> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        self.replies[call.min(self.replies.len() - 1)].clone()
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

fn init_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = SimpleLogger::new().with_level(LevelFilter::Trace).init();
    });
}

fn timeouts() -> Kind<ServiceError> {
    Kind::matching("timeout", |error: &ServiceError| *error == ServiceError::Timeout)
}

#[test]
fn service_scenarios() {
    init_logger();
    let recorder = RecordingSleeper::new();
    let trier = Trier::times(4)
        .unwrap()
        .with_interval(Duration::from_millis(100))
        .with_sleeper(&recorder)
        .ignoring([timeouts()]);

    let case_name = "1) Good at the first shot";
    let service = Service::new(vec![Ok(7)]);
    assert_eq!(trier.try_to_get(|| service.query()).unwrap(), 7, "In '{case_name}'");
    assert_eq!(service.calls(), 1, "In '{case_name}'");
    assert_eq!(recorder.count(), 0, "In '{case_name}'");

    let case_name = "2) Recovered from timeouts on the 3rd attempt";
    let service = Service::new(vec![Err(ServiceError::Timeout), Err(ServiceError::Timeout), Ok(7)]);
    assert_eq!(trier.try_to_get(|| service.query()).unwrap(), 7, "In '{case_name}'");
    assert_eq!(service.calls(), 3, "In '{case_name}'");
    assert_eq!(recorder.count(), 2, "In '{case_name}'");

    let case_name = "3) Failed fatally at the first shot";
    let service = Service::new(vec![Err(ServiceError::WrongCredentials), Ok(7)]);
    let err = trier.try_to_get(|| service.query()).unwrap_err();
    assert_eq!(err.into_failure(), Some(ServiceError::WrongCredentials), "In '{case_name}'");
    assert_eq!(service.calls(), 1, "In '{case_name}'");
    assert_eq!(recorder.count(), 2, "In '{case_name}'");

    let case_name = "4) Gave up after exceeding 4 attempts";
    let service = Service::new(vec![Err(ServiceError::Timeout)]);
    match trier.try_to_get(|| service.query()) {
        Err(TryError::LimitExceeded(err)) => {
            assert_eq!(err.attempts(), 4, "In '{case_name}'");
            assert_eq!(err.last_failure(), Some(&ServiceError::Timeout), "In '{case_name}'");
            assert_eq!(
                std::error::Error::source(&err).map(|source| source.to_string()),
                Some("request timed out".to_string()),
                "In '{case_name}'"
            );
        }
        other => panic!("In '{case_name}': unexpected {other:?}"),
    }
    assert_eq!(service.calls(), 4, "In '{case_name}'");
    assert_eq!(recorder.count(), 5, "In '{case_name}'");
    assert_eq!(recorder.total(), Duration::from_millis(500), "In '{case_name}'");
}

#[test]
fn polling_for_readiness() {
    init_logger();
    let recorder = RecordingSleeper::new();
    let trier = Trier::times(5)
        .unwrap()
        .with_sleeper(&recorder)
        .ignoring([timeouts()])
        .succeed_only_when(|rows: &u32| *rows >= 10);

    let service = Service::new(vec![Ok(0), Err(ServiceError::Timeout), Ok(4), Ok(12)]);
    assert_eq!(trier.try_to_apply(|service: &&Service| service.query(), &service).unwrap(), 12);
    assert_eq!(recorder.count(), 3);

    // a rejected value after a timeout does not hide the timeout
    let service = Service::new(vec![Err(ServiceError::Timeout), Ok(0)]);
    match trier.try_to_get(|| service.query()) {
        Err(TryError::LimitExceeded(err)) => assert_eq!(err.last_failure(), Some(&ServiceError::Timeout)),
        other => panic!("unexpected {other:?}"),
    }

    // only rejected values: there is no cause at all
    let service = Service::new(vec![Ok(1)]);
    match trier.try_to_get(|| service.query()) {
        Err(TryError::LimitExceeded(err)) => assert!(err.last_failure().is_none()),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn network_errors_with_real_pauses() {
    init_logger();
    let trier = Trier::times(3)
        .unwrap()
        .with_interval(Duration::from_millis(10))
        .ignoring([Kind::of::<ConnectionReset>()]);
    let attempts = Cell::new(0);

    let start = Instant::now();
    let result = trier.try_to_run(|| -> Result<(), BoxError> {
        attempts.set(attempts.get() + 1);
        if attempts.get() < 3 { Err(ConnectionReset.into()) } else { Ok(()) }
    });

    assert!(result.is_ok());
    assert_eq!(attempts.get(), 3);
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn interrupted_while_pausing() {
    init_logger();
    let sleeper = InterruptibleSleeper::new();
    let interrupter = sleeper.interrupter();
    let trier = Trier::times(10)
        .unwrap()
        .with_interval(Duration::from_secs(30))
        .with_sleeper(sleeper)
        .ignoring([Kind::any()]);

    let waker = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        interrupter.interrupt();
    });

    let attempts = Cell::new(0);
    let start = Instant::now();
    let result = trier.try_to_run(|| -> Result<(), BoxError> {
        attempts.set(attempts.get() + 1);
        Err(ConnectionReset.into())
    });

    assert!(matches!(result, Err(TryError::Interrupted(_))));
    assert_eq!(attempts.get(), 1);
    assert!(start.elapsed() < Duration::from_secs(30));
    waker.join().unwrap();
}

#[test]
fn nested_interruption_is_never_tolerated() {
    init_logger();
    let sleeper = InterruptibleSleeper::new();
    sleeper.interrupter().interrupt();
    let inner = Trier::times(3)
        .unwrap()
        .with_sleeper(sleeper)
        .ignoring([Kind::matching("reset", |_: &ConnectionReset| true)]);
    let recorder = RecordingSleeper::new();
    let outer = Trier::times(3).unwrap().with_sleeper(&recorder).ignoring([Kind::any()]);

    let outer_attempts = Cell::new(0);
    let result = outer.try_to_run(|| -> Result<(), BoxError> {
        outer_attempts.set(outer_attempts.get() + 1);
        inner.try_to_run(|| Err(ConnectionReset))?;
        Ok(())
    });

    // the boxed inner error is an interruption: even `Kind::any()` lets it through
    let failure = result.unwrap_err().into_failure().unwrap();
    assert!(matches!(failure.downcast_ref::<TryError<ConnectionReset>>(), Some(TryError::Interrupted(_))));
    assert_eq!(outer_attempts.get(), 1);
    assert_eq!(recorder.count(), 0);
}
