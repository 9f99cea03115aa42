//! View configuration and navigation
//!
//! [`ViewConfig`] holds the selected [`ViewMode`] and the Monday-aligned
//! start date. Every change produces a new value; a rejected change leaves
//! the current configuration as it was.

use crate::error::CalendarError;
use crate::grid::{add_days, add_months, grid_origin, week_start, CalendarGrid};
use crate::mode::{SlotUnit, ViewMode};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Inclusive date range covered by the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range
    #[inline]
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Start midnight as epoch milliseconds, in request form
    #[must_use]
    pub fn start_millis(&self) -> String {
        midnight_millis(self.start).to_string()
    }

    /// End midnight as epoch milliseconds, in request form
    #[must_use]
    pub fn end_millis(&self) -> String {
        midnight_millis(self.end).to_string()
    }

    /// Title shown above the chart, `M/D/YYYY - M/D/YYYY`
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%-m/%-d/%Y"),
            self.end.format("%-m/%-d/%Y")
        )
    }

    /// Number of days covered
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Local midnight of `date` expressed on the UTC epoch scale
fn midnight_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Jump to the week containing today
    Today,
    /// Step back: the configured shift, or one slot in month/quarter views
    Previous,
    /// Step forward: the configured shift, or one slot in month/quarter views
    Next,
    /// Shift by a number of days (negative = back)
    By(i64),
    /// Jump to the week containing a date
    To(NaiveDate),
}

/// Selected view mode and start date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewConfig {
    mode: ViewMode,
    start_date: NaiveDate,
}

impl ViewConfig {
    /// Create a configuration; `start_date` is moved to its Monday
    #[must_use]
    pub fn new(mode: ViewMode, start_date: NaiveDate) -> Self {
        Self {
            mode,
            start_date: week_start(start_date),
        }
    }

    /// Selected mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Monday-aligned start date
    #[inline]
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Same start date, different mode
    #[must_use]
    pub fn with_mode(&self, mode: ViewMode) -> Self {
        Self {
            mode,
            start_date: self.start_date,
        }
    }

    /// Same mode, different start date (re-aligned to Monday)
    #[must_use]
    pub fn with_start_date(&self, start_date: NaiveDate) -> Self {
        Self::new(self.mode.clone(), start_date)
    }

    /// Apply a navigation command
    ///
    /// `shift_days` is the step used by [`Navigation::Previous`] and
    /// [`Navigation::Next`] in fixed-length views. Month and quarter views
    /// step by one slot from the grid origin instead.
    ///
    /// # Errors
    /// Returns [`CalendarError::OutOfRange`] if the target date cannot be
    /// represented.
    pub fn navigate(
        &self,
        navigation: Navigation,
        today: NaiveDate,
        shift_days: u32,
    ) -> Result<Self, CalendarError> {
        let shift = i64::from(shift_days);
        let target = match navigation {
            Navigation::Today => today,
            Navigation::To(date) => date,
            Navigation::Previous => self.step(-1, shift)?,
            Navigation::Next => self.step(1, shift)?,
            Navigation::By(days) => add_days(self.start_date, days)?,
        };
        Ok(self.with_start_date(target))
    }

    /// Start date one step forward (`direction = 1`) or back (`-1`)
    fn step(&self, direction: i64, shift_days: i64) -> Result<NaiveDate, CalendarError> {
        match self.mode.unit() {
            SlotUnit::Days(_) => add_days(self.start_date, direction * shift_days),
            unit @ SlotUnit::Months(months) => {
                let origin = grid_origin(self.start_date, unit)?;
                let first = add_months(origin, direction * i64::from(months))?;
                // the Monday of the 1st may fall in the previous month
                let to_monday = (7 - i64::from(first.weekday().num_days_from_monday())) % 7;
                add_days(first, to_monday)
            }
        }
    }

    /// Jump to a date given as `YYYY-MM-DD`
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidDate`] when the text is not a valid
    /// calendar date.
    pub fn navigate_to_str(&self, text: &str) -> Result<Self, CalendarError> {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| CalendarError::InvalidDate(text.to_string()))?;
        Ok(self.with_start_date(date))
    }

    /// Generate the grid for this configuration
    ///
    /// # Errors
    /// See [`CalendarGrid::generate`].
    pub fn grid(&self, today: NaiveDate) -> Result<CalendarGrid, CalendarError> {
        CalendarGrid::generate(self.start_date, &self.mode, today)
    }

    /// Date range the grid covers
    ///
    /// # Errors
    /// See [`CalendarGrid::generate`].
    pub fn date_range(&self) -> Result<DateRange, CalendarError> {
        Ok(self.grid(self.start_date)?.date_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_date_is_monday_aligned() {
        let view = ViewConfig::new(ViewMode::week(), date(2026, 10, 17));
        assert_eq!(view.start_date(), date(2026, 10, 12));
    }

    #[test]
    fn navigation_shifts_and_realigns() {
        let today = date(2026, 10, 15);
        let view = ViewConfig::new(ViewMode::day(), date(2026, 10, 12));

        let next = view.navigate(Navigation::Next, today, 7).unwrap();
        assert_eq!(next.start_date(), date(2026, 10, 19));

        let back = view.navigate(Navigation::Previous, today, 7).unwrap();
        assert_eq!(back.start_date(), date(2026, 10, 5));

        let nudged = view.navigate(Navigation::By(3), today, 7).unwrap();
        assert_eq!(nudged.start_date(), date(2026, 10, 12));

        let jumped = view.navigate(Navigation::To(date(2027, 1, 1)), today, 7).unwrap();
        assert_eq!(jumped.start_date(), date(2026, 12, 28));

        let home = jumped.navigate(Navigation::Today, today, 7).unwrap();
        assert_eq!(home.start_date(), date(2026, 10, 12));
    }

    #[test]
    fn month_views_step_by_whole_slots() {
        let today = date(2026, 10, 14);
        let months = ViewConfig::new(ViewMode::month(), today);

        let next = months.navigate(Navigation::Next, today, 7).unwrap();
        let range = next.date_range().unwrap();
        assert_eq!(range, DateRange::new(date(2026, 11, 1), date(2027, 10, 31)));

        let back = months.navigate(Navigation::Previous, today, 7).unwrap();
        assert_eq!(back.date_range().unwrap().start, date(2026, 9, 1));

        let quarters = ViewConfig::new(ViewMode::quarter(), today);
        let next = quarters.navigate(Navigation::Next, today, 7).unwrap();
        assert_eq!(
            next.date_range().unwrap(),
            DateRange::new(date(2027, 1, 1), date(2027, 12, 31))
        );
        let back = quarters.navigate(Navigation::Previous, today, 7).unwrap();
        assert_eq!(back.date_range().unwrap().start, date(2026, 7, 1));
    }

    #[test]
    fn repeated_month_steps_never_stall() {
        let today = date(2026, 10, 14);
        let mut view = ViewConfig::new(ViewMode::month(), date(2024, 1, 31));
        let mut previous = view.date_range().unwrap().start;
        for _ in 0..30 {
            view = view.navigate(Navigation::Next, today, 7).unwrap();
            let start = view.date_range().unwrap().start;
            assert_eq!(start, previous.checked_add_months(chrono::Months::new(1)).unwrap());
            previous = start;
        }
    }

    #[test]
    fn malformed_date_is_rejected() {
        let view = ViewConfig::new(ViewMode::day(), date(2026, 10, 12));
        assert!(matches!(
            view.navigate_to_str("2026-13-01"),
            Err(CalendarError::InvalidDate(_))
        ));
        assert!(matches!(
            view.navigate_to_str("not a date"),
            Err(CalendarError::InvalidDate(_))
        ));
        assert_eq!(
            view.navigate_to_str("2026-11-05").unwrap().start_date(),
            date(2026, 11, 2)
        );
    }

    #[test]
    fn date_range_follows_mode() {
        let view = ViewConfig::new(ViewMode::week(), date(2026, 10, 14));
        let range = view.date_range().unwrap();
        assert_eq!(range, DateRange::new(date(2026, 10, 12), date(2026, 12, 20)));
        assert_eq!(range.days(), 70);

        let months = view.with_mode(ViewMode::month()).date_range().unwrap();
        assert_eq!(months.start, date(2026, 10, 1));
        assert_eq!(months.end, date(2027, 9, 30));
    }

    #[test]
    fn range_millis_and_title() {
        let range = DateRange::new(date(2026, 10, 12), date(2026, 10, 25));
        assert_eq!(range.start_millis(), "1791763200000");
        assert_eq!(range.end_millis(), "1792886400000");
        assert_eq!(range.title(), "10/12/2026 - 10/25/2026");
    }
}
