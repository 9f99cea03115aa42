//! Source of "today"
//!
//! The grid never reads the wall clock itself; callers pass the date in,
//! usually through a [`Clock`] held by the chart.

use chrono::{Local, NaiveDate};

/// Supplies the current local date
pub trait Clock: Send + Sync {
    /// Today's date, midnight-normalized
    fn today(&self) -> NaiveDate;
}

/// Wall-clock backed [`Clock`] using the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// [`Clock`] pinned to a fixed date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
