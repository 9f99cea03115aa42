//! Gantt Core - resource allocation chart
//!
//! Ties the calendar grid, allocation layout and resource merging
//! together behind a command API:
//! - View selection and navigation over a Monday-aligned window
//! - Sequenced refreshes through a [`RecordService`]
//! - Drag to move or resize allocations, with optimistic saves
//! - TOML configuration and plain-text rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use gantt_calendar::{Navigation, SystemClock};
//! use gantt_core::{GanttChart, GanttConfig, JsonFileService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = JsonFileService::new("resources.json");
//! let mut chart = GanttChart::new(GanttConfig::new(), SystemClock)?;
//!
//! chart.refresh(&service).await?;
//! chart.navigate(Navigation::Next)?;
//! chart.refresh(&service).await?;
//!
//! for row in chart.rows() {
//!     println!("{}: {} bars", row.name, row.bar_count());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod chart;
pub mod config;
pub mod drag;
pub mod error;
pub mod render;
pub mod service;

pub use chart::{GanttChart, RefreshOutcome, RefreshTicket};
pub use config::{ChartScope, GanttConfig, DEFAULT_DATE_SHIFT_DAYS};
pub use drag::{
    DragController, DragMode, DragOutcome, DragPreview, DragSession, DragState, GridMetrics,
};
pub use error::{ConfigError, FetchError, GanttError, Result};
pub use render::{render_chart, render_header, render_row};
pub use service::{JsonFileService, RecordService};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a chart
    pub use crate::{
        ChartScope, DragMode, GanttChart, GanttConfig, GanttError, JsonFileService,
        RecordService, RefreshOutcome,
    };
    pub use gantt_calendar::{Clock, FixedClock, Navigation, SystemClock, ViewMode};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
