//! Per-resource row views
//!
//! A [`ResourceRow`] is rebuilt from a [`Resource`] every time the chart is
//! rendered. It carries no state of its own.

use crate::geometry::{AllocationGeometry, AllocationLayout};
use gantt_model::{Allocation, ProjectId, Resource, ResourceId};
use serde::Serialize;

/// An allocation paired with its geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationBar {
    /// Source allocation
    pub allocation: Allocation,
    /// Computed geometry
    pub geometry: AllocationGeometry,
}

/// One project lane inside a resource row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectLane {
    /// Project of every bar in the lane
    pub project_id: ProjectId,
    /// Bars that overlap the visible window
    pub bars: Vec<AllocationBar>,
}

impl ProjectLane {
    /// Whether no bar is visible
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Render view of a resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRow {
    /// Resource id
    pub resource_id: ResourceId,
    /// Display name
    pub name: String,
    /// Default role, if any
    pub default_role: Option<String>,
    /// Lanes in the resource's project order
    pub lanes: Vec<ProjectLane>,
}

impl ResourceRow {
    /// Build the row for `resource` on a grid of `total_slots`
    ///
    /// Lanes keep the resource's project order; allocations entirely
    /// outside the window are left out.
    #[must_use]
    pub fn build(resource: &Resource, total_slots: u32, layout: &AllocationLayout) -> Self {
        let lanes = resource
            .allocations_by_project
            .iter()
            .map(|(project_id, allocations)| ProjectLane {
                project_id: project_id.clone(),
                bars: allocations
                    .iter()
                    .map(|allocation| AllocationBar {
                        allocation: allocation.clone(),
                        geometry: layout.layout(allocation, total_slots),
                    })
                    .filter(|bar| bar.geometry.visible)
                    .collect(),
            })
            .collect();

        Self {
            resource_id: resource.id.clone(),
            name: resource.name.clone(),
            default_role: resource.default_role.clone(),
            lanes,
        }
    }

    /// Number of visible bars across all lanes
    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.bars.len()).sum()
    }

    /// All visible bars, lane by lane
    pub fn bars(&self) -> impl Iterator<Item = &AllocationBar> {
        self.lanes.iter().flat_map(|lane| lane.bars.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantt_model::{SlotBounds, Status};

    #[test]
    fn lanes_follow_project_order_and_drop_hidden_bars() {
        let resource = Resource::new("r1", "Ada")
            .with_default_role("Engineer")
            .with_allocation(Allocation::new("a1", "p2", SlotBounds::new(0, 3)))
            .with_allocation(Allocation::new("a2", "p1", SlotBounds::new(-5, -1)))
            .with_allocation(
                Allocation::new("a3", "p1", SlotBounds::new(8, 12)).with_status(Status::Hold),
            );

        let row = ResourceRow::build(&resource, 10, &AllocationLayout::default());

        assert_eq!(row.name, "Ada");
        assert_eq!(row.default_role.as_deref(), Some("Engineer"));
        let projects: Vec<_> = row.lanes.iter().map(|l| l.project_id.as_str()).collect();
        assert_eq!(projects, vec!["p2", "p1"]);
        assert_eq!(row.bar_count(), 2);

        let ids: Vec<_> = row.bars().map(|b| b.allocation.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);
    }

    #[test]
    fn empty_resource_has_no_lanes() {
        let row = ResourceRow::build(&Resource::new("r1", "Ada"), 10, &AllocationLayout::default());
        assert!(row.lanes.is_empty());
        assert_eq!(row.bar_count(), 0);
    }

    #[test]
    fn lane_can_be_empty_after_filtering() {
        let resource = Resource::new("r1", "Ada")
            .with_allocation(Allocation::new("a1", "p1", SlotBounds::new(20, 22)));
        let row = ResourceRow::build(&resource, 10, &AllocationLayout::default());
        assert_eq!(row.lanes.len(), 1);
        assert!(row.lanes[0].is_empty());
    }
}
