use std::future::{self, Future};
use std::time::Duration;

use super::{AsyncSleeper, Sleeper};
use crate::error::Interrupted;

/// Each retry happens immediately without any delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Sleeper for NoDelay {
    fn sleep(&self, _duration: Duration) -> Result<(), Interrupted> {
        Ok(())
    }
}

impl AsyncSleeper for NoDelay {
    fn sleep(&self, _duration: Duration) -> impl Future<Output = Result<(), Interrupted>> + Send {
        future::ready(Ok(()))
    }
}
