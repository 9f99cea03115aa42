//! Gantt Layout
//!
//! Pure functions that turn stored records into what a renderer draws:
//! - [`AllocationLayout`]: slot bounds to percentage insets, style class and colour
//! - [`merge`] / [`merge_into`]: fold a fresh fetch into the resource list
//! - [`ResourceRow`]: one resource's lanes with every bar laid out
//!
//! Nothing here mutates an [`gantt_model::Allocation`]; every layout pass
//! derives a new [`AllocationGeometry`].

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod geometry;
pub mod merge;
pub mod row;

pub use geometry::{
    layout, AllocationGeometry, AllocationLayout, Inset, LabelPadding, StyleClass,
};
pub use merge::{merge, merge_into, MergePolicy, MergeStats};
pub use row::{AllocationBar, ProjectLane, ResourceRow};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
