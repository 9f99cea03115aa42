//! Gantt Model
//!
//! Plain data records shared by every layer of the chart engine:
//! - Identifiers for resources, projects and allocations
//! - [`Resource`] rows with allocations grouped by project
//! - [`Allocation`] records expressed as signed slot-index bounds
//! - The shared colour [`palette`]
//! - Request/response shapes exchanged with the record service
//!
//! Records in this crate never carry display state. Geometry and styling are
//! derived by `gantt-layout` on every pass.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod allocation;
pub mod filter;
pub mod ids;
pub mod palette;
pub mod records;
pub mod resource;

pub use allocation::{Allocation, Effort, SlotBounds, Status};
pub use filter::FilterSet;
pub use ids::{AllocationId, ProjectId, ResourceId};
pub use palette::{Color, ColorKey, DEFAULT_COLOR};
pub use records::{AllocationChange, ChartRequest, ChartResponse};
pub use resource::{Project, Resource, Role};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
