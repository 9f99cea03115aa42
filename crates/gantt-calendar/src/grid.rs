//! Calendar grid generation
//!
//! Produces the ordered slots of the timeline for a start date and a view
//! mode. The start date is first moved back to the Monday of its week so
//! ranges are week-aligned whatever day the user picked.
//!
//! # Slot spans
//! - Fixed-length modes: slot `i` covers `[origin + i·size, origin + (i+1)·size − 1]`
//! - Month/quarter modes: slot `i` covers the i-th full month (or 3-month
//!   block) from the first day of the origin's month, ending on the true
//!   last day of that block
//!
//! Slots are contiguous in every mode: each slot starts the day after the
//! previous one ends.

use crate::error::CalendarError;
use crate::mode::{SlotUnit, ViewMode};
use crate::view::DateRange;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use gantt_model::SlotBounds;
use serde::Serialize;
use std::fmt;

/// Monday of the week containing `date`
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Year and month of a date, used to cluster slots under one header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    /// Calendar year
    pub year: i32,
    /// Month, 1-based
    pub month: u32,
}

impl YearMonth {
    /// Year-month of `date`
    #[inline]
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// One column of the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Position in the grid
    pub index: u32,
    /// First day covered
    pub start: NaiveDate,
    /// Last day covered (inclusive)
    pub end: NaiveDate,
    /// Short header label (`10/14`, `Oct`, `Oct-Dec`)
    pub label: String,
    /// Abbreviated weekday, day mode only
    pub day_name: Option<String>,
    /// Header cluster key
    pub group_key: YearMonth,
    /// Slot contains today
    pub is_today: bool,
    /// Slot is the Sunday closing a week, day mode only
    pub is_week_end: bool,
}

impl Slot {
    /// Whether `date` falls within the slot (inclusive)
    #[inline]
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered
    #[inline]
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Header cluster of consecutive slots sharing a [`YearMonth`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotGroup {
    /// Shared key
    pub key: YearMonth,
    /// Header label (month name)
    pub label: String,
    /// Slots in the cluster
    pub slot_count: u32,
    /// Share of the grid width, 0.0 to 1.0
    pub width_pct: f64,
}

/// Generated timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid {
    mode: ViewMode,
    origin: NaiveDate,
    range_end: NaiveDate,
    slots: Vec<Slot>,
    groups: Vec<SlotGroup>,
}

impl CalendarGrid {
    /// Generate the grid for `start_date` in `mode`
    ///
    /// `today` flags the slot containing it; pass it from a [`crate::Clock`].
    ///
    /// # Errors
    /// Returns [`CalendarError::OutOfRange`] if a slot boundary cannot be
    /// represented.
    pub fn generate(
        start_date: NaiveDate,
        mode: &ViewMode,
        today: NaiveDate,
    ) -> Result<Self, CalendarError> {
        let unit = mode.unit();
        let origin = grid_origin(start_date, unit)?;

        let slots = (0..mode.slot_count())
            .map(|index| {
                let (start, end) = slot_span(origin, unit, i64::from(index))?;
                Ok(build_slot(index, start, end, mode, today))
            })
            .collect::<Result<Vec<_>, CalendarError>>()?;

        let range_end = slots.last().map_or(origin, |s| s.end);
        let groups = group_slots(&slots, mode);

        Ok(Self {
            mode: mode.clone(),
            origin,
            range_end,
            slots,
            groups,
        })
    }

    /// View mode the grid was generated for
    #[inline]
    #[must_use]
    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Ordered slots
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Ordered header groups
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[SlotGroup] {
        &self.groups
    }

    /// Number of slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot count as used by layout
    #[inline]
    #[must_use]
    pub fn total_slots(&self) -> u32 {
        self.mode.slot_count()
    }

    /// First day of the first slot
    #[inline]
    #[must_use]
    pub fn range_start(&self) -> NaiveDate {
        self.origin
    }

    /// Last day of the last slot
    #[inline]
    #[must_use]
    pub fn range_end(&self) -> NaiveDate {
        self.range_end
    }

    /// Covered date range
    #[inline]
    #[must_use]
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.origin, self.range_end)
    }

    /// Index of the slot containing `date`
    #[must_use]
    pub fn slot_index_of(&self, date: NaiveDate) -> Option<usize> {
        self.slots.iter().position(|s| s.contains(date))
    }

    /// Index of the slot flagged as today
    #[must_use]
    pub fn today_index(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_today)
    }

    /// Calendar span of slot bounds, extrapolating past either grid edge
    ///
    /// # Errors
    /// Returns [`CalendarError::OutOfRange`] for bounds beyond chrono's range.
    pub fn date_span(&self, bounds: SlotBounds) -> Result<(NaiveDate, NaiveDate), CalendarError> {
        let unit = self.mode.unit();
        let (start, _) = slot_span(self.origin, unit, i64::from(bounds.left))?;
        let (_, end) = slot_span(self.origin, unit, i64::from(bounds.right))?;
        Ok((start, end))
    }
}

pub(crate) fn grid_origin(start_date: NaiveDate, unit: SlotUnit) -> Result<NaiveDate, CalendarError> {
    let monday = week_start(start_date);
    match unit {
        SlotUnit::Days(_) => Ok(monday),
        SlotUnit::Months(_) => {
            NaiveDate::from_ymd_opt(monday.year(), monday.month(), 1).ok_or(CalendarError::OutOfRange)
        }
    }
}

pub(crate) fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, CalendarError> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
    .ok_or(CalendarError::OutOfRange)
}

pub(crate) fn add_months(date: NaiveDate, months: i64) -> Result<NaiveDate, CalendarError> {
    let magnitude =
        Months::new(u32::try_from(months.unsigned_abs()).map_err(|_| CalendarError::OutOfRange)?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
    .ok_or(CalendarError::OutOfRange)
}

/// Inclusive span of slot `index` (may be negative or past the last slot)
fn slot_span(
    origin: NaiveDate,
    unit: SlotUnit,
    index: i64,
) -> Result<(NaiveDate, NaiveDate), CalendarError> {
    match unit {
        SlotUnit::Days(size) => {
            let size = i64::from(size);
            let start = add_days(origin, index * size)?;
            Ok((start, add_days(start, size - 1)?))
        }
        SlotUnit::Months(size) => {
            let size = i64::from(size);
            let start = add_months(origin, index * size)?;
            let next = add_months(start, size)?;
            Ok((start, add_days(next, -1)?))
        }
    }
}

fn build_slot(index: u32, start: NaiveDate, end: NaiveDate, mode: &ViewMode, today: NaiveDate) -> Slot {
    let daily = mode.is_daily();
    let label = match mode.unit() {
        SlotUnit::Days(_) => format!("{}/{}", start.month(), start.day()),
        SlotUnit::Months(1) => start.format("%b").to_string(),
        SlotUnit::Months(_) => format!("{}-{}", start.format("%b"), end.format("%b")),
    };

    Slot {
        index,
        start,
        end,
        label,
        day_name: daily.then(|| start.format("%a").to_string()),
        group_key: YearMonth::of(start),
        is_today: start <= today && today <= end,
        is_week_end: daily && start.weekday() == Weekday::Sun,
    }
}

fn group_slots(slots: &[Slot], mode: &ViewMode) -> Vec<SlotGroup> {
    let total = f64::from(mode.slot_count());
    let label_format = if mode.is_calendar_unit() { "%B %Y" } else { "%B" };

    let mut groups: Vec<SlotGroup> = Vec::new();
    for slot in slots {
        match groups.last_mut() {
            Some(group) if group.key == slot.group_key => group.slot_count += 1,
            _ => groups.push(SlotGroup {
                key: slot.group_key,
                label: slot.start.format(label_format).to_string(),
                slot_count: 1,
                width_pct: 0.0,
            }),
        }
    }
    for group in &mut groups {
        group.width_pct = f64::from(group.slot_count) / total;
    }
    groups
}
