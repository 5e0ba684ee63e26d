//! Time source used by validation and id generation.
//!
//! # Responsibility
//! - Provide "today" at day granularity for date rules.
//! - Provide a millisecond timestamp for id generation.

use chrono::{Local, NaiveDate};

/// Source of the current date and time.
pub trait Clock {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
    /// Current Unix epoch milliseconds.
    fn now_millis(&self) -> i64;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Clock pinned to one date, used by tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
    now_millis: i64,
}

impl FixedClock {
    /// Pins the clock to midnight UTC of `today`.
    pub fn new(today: NaiveDate) -> Self {
        let now_millis = today
            .and_hms_opt(0, 0, 0)
            .map_or(0, |midnight| midnight.and_utc().timestamp_millis());
        Self { today, now_millis }
    }

    /// Pins the clock to `today` with an explicit timestamp.
    pub fn with_millis(today: NaiveDate, now_millis: i64) -> Self {
        Self { today, now_millis }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.now_millis
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
