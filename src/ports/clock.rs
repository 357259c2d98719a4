//! Injectable time sources.
//!
//! Time-dependent logic (subscription expiry, poll pacing) takes these
//! ports instead of calling the system clock, so tests can run with a
//! fixed clock and an instant delay.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Asynchronous sleeping.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
