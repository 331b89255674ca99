//! Time source used to stamp records and measure traced operations

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::time::Duration;

/// Replaceable "current time" provider.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::{Clock, ManualClock};
/// use chrono::{TimeZone, Utc};
/// use std::time::Duration;
///
/// let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap());
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now().timestamp_subsec_millis(), 250);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let Ok(delta) = chrono::Duration::from_std(by) else {
            return;
        };
        let mut now = self.now.lock();
        if let Some(moved) = now.checked_add_signed(delta) {
            *now = moved;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
