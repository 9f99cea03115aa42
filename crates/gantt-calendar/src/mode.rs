//! View modes
//!
//! A view mode fixes the granularity (slot size) and visible span (slot
//! count) of the timeline. Modes are exchanged with view selectors as
//! `"<size>/<count>"` option values, e.g. `"7/10"`.

use crate::error::CalendarError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slot size that selects whole calendar months
pub const MONTH_SLOT_DAYS: u32 = 30;

/// Slot size that selects 3-month blocks
pub const QUARTER_SLOT_DAYS: u32 = 90;

/// How a slot's length is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotUnit {
    /// Fixed number of days
    Days(u32),
    /// Whole calendar months
    Months(u32),
}

/// Timeline granularity and span
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewMode {
    slot_size_days: u32,
    slot_count: u32,
    label: String,
}

/// Label/value pair for a view selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOption {
    /// Human-readable label
    pub label: &'static str,
    /// Option value (`"<size>/<count>"`)
    pub value: &'static str,
}

const PRESETS: [(u32, u32, &str, &str); 4] = [
    (1, 14, "View by Day", "1/14"),
    (7, 10, "View by Week", "7/10"),
    (MONTH_SLOT_DAYS, 12, "View by Month", "30/12"),
    (QUARTER_SLOT_DAYS, 4, "View by Quarter", "90/4"),
];

impl ViewMode {
    /// Create a view mode
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidInput`] when either value is zero.
    pub fn new(
        slot_size_days: u32,
        slot_count: u32,
        label: impl Into<String>,
    ) -> Result<Self, CalendarError> {
        if slot_size_days == 0 {
            return Err(CalendarError::InvalidInput(
                "slot size must be positive".to_string(),
            ));
        }
        if slot_count == 0 {
            return Err(CalendarError::InvalidInput(
                "slot count must be positive".to_string(),
            ));
        }
        Ok(Self {
            slot_size_days,
            slot_count,
            label: label.into(),
        })
    }

    fn preset(index: usize) -> Self {
        let (size, count, label, _) = PRESETS[index];
        Self {
            slot_size_days: size,
            slot_count: count,
            label: label.to_string(),
        }
    }

    /// 14 one-day slots
    #[must_use]
    pub fn day() -> Self {
        Self::preset(0)
    }

    /// 10 one-week slots
    #[must_use]
    pub fn week() -> Self {
        Self::preset(1)
    }

    /// 12 calendar-month slots
    #[must_use]
    pub fn month() -> Self {
        Self::preset(2)
    }

    /// 4 three-month slots
    #[must_use]
    pub fn quarter() -> Self {
        Self::preset(3)
    }

    /// Selector options for the presets
    #[must_use]
    pub fn options() -> Vec<ViewOption> {
        PRESETS
            .iter()
            .map(|&(_, _, label, value)| ViewOption { label, value })
            .collect()
    }

    /// Preset whose label matches, e.g. `"View by Day"`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        PRESETS
            .iter()
            .position(|&(_, _, l, _)| l == label)
            .map(Self::preset)
    }

    /// Days per slot (30 and 90 denote calendar months and quarters)
    #[inline]
    #[must_use]
    pub fn slot_size_days(&self) -> u32 {
        self.slot_size_days
    }

    /// Number of slots in the window
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    /// Display label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Option value, `"<size>/<count>"`
    #[must_use]
    pub fn value(&self) -> String {
        format!("{}/{}", self.slot_size_days, self.slot_count)
    }

    /// Slot measuring unit
    #[must_use]
    pub fn unit(&self) -> SlotUnit {
        match self.slot_size_days {
            MONTH_SLOT_DAYS => SlotUnit::Months(1),
            QUARTER_SLOT_DAYS => SlotUnit::Months(3),
            days => SlotUnit::Days(days),
        }
    }

    /// Whether slots are single days
    #[inline]
    #[must_use]
    pub fn is_daily(&self) -> bool {
        self.unit() == SlotUnit::Days(1)
    }

    /// Whether slots follow calendar months
    #[inline]
    #[must_use]
    pub fn is_calendar_unit(&self) -> bool {
        matches!(self.unit(), SlotUnit::Months(_))
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::week()
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for ViewMode {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidViewMode(value.to_string());

        let (size, count) = value.trim().split_once('/').ok_or_else(invalid)?;
        let size: u32 = size.trim().parse().map_err(|_| invalid())?;
        let count: u32 = count.trim().parse().map_err(|_| invalid())?;

        let label = PRESETS
            .iter()
            .find(|&&(s, c, _, _)| s == size && c == count)
            .map_or_else(|| format!("{size} days x {count}"), |&(_, _, l, _)| l.to_string());

        Self::new(size, count, label)
    }
}

impl TryFrom<String> for ViewMode {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ViewMode> for String {
    fn from(mode: ViewMode) -> Self {
        mode.value()
    }
}
