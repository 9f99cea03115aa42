//! Record-service request and response shapes
//!
//! The transport is owned by the record service; these types only fix the
//! field names and the tolerance rules (absent lists decode as empty).

use crate::allocation::SlotBounds;
use crate::filter::FilterSet;
use crate::ids::{AllocationId, ProjectId, ResourceId};
use crate::resource::{Project, Resource, Role};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fetch request for one chart refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    /// Restrict to one resource (resource record page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<ResourceId>,
    /// Restrict to one project (project record page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Range start, epoch milliseconds as a decimal string
    pub start_time: String,
    /// Range end, epoch milliseconds as a decimal string
    pub end_time: String,
    /// Slot size of the requesting view
    pub slot_size_days: u32,
    /// Filter selection, omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSet>,
}

impl ChartRequest {
    /// Create an unscoped, unfiltered request
    #[must_use]
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>, slot_size_days: u32) -> Self {
        Self {
            resource_id: None,
            project_id: None,
            start_time: start_time.into(),
            end_time: end_time.into(),
            slot_size_days,
            filters: None,
        }
    }

    /// With resource scope
    #[inline]
    #[must_use]
    pub fn with_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    /// With project scope
    #[inline]
    #[must_use]
    pub fn with_project(mut self, id: ProjectId) -> Self {
        self.project_id = Some(id);
        self
    }

    /// With filters (an empty set is dropped)
    #[must_use]
    pub fn with_filters(mut self, filters: &FilterSet) -> Self {
        self.filters = (!filters.is_empty()).then(|| filters.clone());
        self
    }
}

/// Fetch response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    /// Resources with their allocations for the requested range
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Projects available for allocation and filtering
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Role names available for filtering
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Project of the current record page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

/// Candidate allocation change produced by a completed drag
///
/// Handed to the persistence collaborator as-is. Dates are the inclusive
/// calendar span of the proposed bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationChange {
    /// Changed allocation
    pub allocation_id: AllocationId,
    /// Resource owning the allocation
    pub resource_id: ResourceId,
    /// Project of the allocation
    pub project_id: ProjectId,
    /// Bounds before the drag
    pub previous: SlotBounds,
    /// Bounds after the drag
    pub proposed: SlotBounds,
    /// First day covered by `proposed`
    pub start_date: NaiveDate,
    /// Last day covered by `proposed`
    pub end_date: NaiveDate,
}
