//! Gantt Calendar
//!
//! Turns a start date and a view mode into the ordered slot grid the chart
//! is drawn on:
//! - [`ViewMode`]: slot size and slot count, with the day/week/month/quarter presets
//! - [`CalendarGrid`]: contiguous slots plus month header groups
//! - [`ViewConfig`]: the selected mode and Monday-aligned start date, with navigation
//! - [`Clock`]: injected source of "today"
//!
//! # Example
//!
//! ```rust,ignore
//! use gantt_calendar::{CalendarGrid, ViewMode};
//! use chrono::NaiveDate;
//!
//! let wednesday = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
//! let grid = CalendarGrid::generate(wednesday, &ViewMode::day(), wednesday)?;
//!
//! assert_eq!(grid.len(), 14);
//! assert_eq!(grid.range_start(), NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod clock;
pub mod error;
pub mod grid;
pub mod mode;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CalendarError;
pub use grid::{week_start, CalendarGrid, Slot, SlotGroup, YearMonth};
pub use mode::{SlotUnit, ViewMode, ViewOption};
pub use view::{DateRange, Navigation, ViewConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
