//! Resources, projects and roles

use crate::allocation::Allocation;
use crate::ids::{AllocationId, ProjectId, ResourceId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A resource row of the chart
///
/// Allocations are grouped by project in the order the record service
/// returned them; each project becomes one lane of the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Record id (identity for merging)
    pub id: ResourceId,
    /// Display name
    pub name: String,
    /// Role used when allocating without an explicit one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role: Option<String>,
    /// Allocations per project
    #[serde(default)]
    pub allocations_by_project: IndexMap<ProjectId, Vec<Allocation>>,
}

impl Resource {
    /// Create a resource with no allocations
    #[must_use]
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_role: None,
            allocations_by_project: IndexMap::new(),
        }
    }

    /// With default role
    #[inline]
    #[must_use]
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = Some(role.into());
        self
    }

    /// With an allocation appended to its project's lane
    #[must_use]
    pub fn with_allocation(mut self, allocation: Allocation) -> Self {
        self.push_allocation(allocation);
        self
    }

    /// Append an allocation to its project's lane
    pub fn push_allocation(&mut self, allocation: Allocation) {
        self.allocations_by_project
            .entry(allocation.project_id.clone())
            .or_default()
            .push(allocation);
    }

    /// All allocations, lane by lane
    pub fn allocations(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations_by_project.values().flatten()
    }

    /// Total number of allocations
    #[must_use]
    pub fn allocation_count(&self) -> usize {
        self.allocations_by_project.values().map(Vec::len).sum()
    }

    /// Find an allocation by id
    #[must_use]
    pub fn find_allocation(&self, id: &AllocationId) -> Option<&Allocation> {
        self.allocations().find(|a| &a.id == id)
    }

    /// Find an allocation by id for in-place update
    pub fn find_allocation_mut(&mut self, id: &AllocationId) -> Option<&mut Allocation> {
        self.allocations_by_project
            .values_mut()
            .flatten()
            .find(|a| &a.id == id)
    }
}

/// A project known to the record service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Record id
    pub id: ProjectId,
    /// Display name
    pub name: String,
}

impl Project {
    /// Create a project
    #[must_use]
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A role name offered by the record service
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub String);
