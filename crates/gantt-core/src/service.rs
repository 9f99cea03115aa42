//! Record service seam
//!
//! The chart never talks to a backend directly. It issues a
//! [`ChartRequest`] through a [`RecordService`] and folds the
//! [`ChartResponse`] back into its state.
//!
//! [`JsonFileService`] is a local implementation backed by a JSON document,
//! used by the `gantt-chart` binary and for demos.

use crate::error::FetchError;
use async_trait::async_trait;
use gantt_model::{AllocationChange, ChartRequest, ChartResponse, FilterSet, Resource};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

/// Backend record service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Fetch resources, projects and roles for a date range
    async fn fetch(&self, request: ChartRequest) -> Result<ChartResponse, FetchError>;

    /// Persist a completed drag
    async fn save_allocation(&self, change: AllocationChange) -> Result<(), FetchError>;
}

/// Record service reading a [`ChartResponse`] JSON document
#[derive(Debug)]
pub struct JsonFileService {
    path: PathBuf,
    data: RwLock<Option<ChartResponse>>,
}

impl JsonFileService {
    /// Service for the document at `path`; the file is read on first fetch
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: RwLock::new(None),
        }
    }

    /// Service over an in-memory response
    #[must_use]
    pub fn from_response(response: ChartResponse) -> Self {
        Self {
            path: PathBuf::new(),
            data: RwLock::new(Some(response)),
        }
    }

    /// Backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<ChartResponse, FetchError> {
        let cached = self.data.read().clone();
        if let Some(data) = cached {
            return Ok(data);
        }
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Transport(format!("{}: {e}", self.path.display())))?;
        let response: ChartResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Malformed(e.to_string()))?;
        *self.data.write() = Some(response.clone());
        Ok(response)
    }
}

#[async_trait]
impl RecordService for JsonFileService {
    async fn fetch(&self, request: ChartRequest) -> Result<ChartResponse, FetchError> {
        let mut response = self.load().await?;

        if let Some(id) = &request.resource_id {
            response.resources.retain(|r| &r.id == id);
        }
        if let Some(id) = &request.project_id {
            for resource in &mut response.resources {
                resource.allocations_by_project.retain(|project, _| project == id);
            }
            response.project_id = Some(id.clone());
        }
        if let Some(filters) = &request.filters {
            apply_filters(&mut response.resources, filters);
        }

        tracing::debug!(
            "json service returned {} resources for {}..{}",
            response.resources.len(),
            request.start_time,
            request.end_time
        );
        Ok(response)
    }

    async fn save_allocation(&self, change: AllocationChange) -> Result<(), FetchError> {
        self.load().await?;
        let mut guard = self.data.write();
        let data = guard
            .as_mut()
            .ok_or_else(|| FetchError::Backend("no data loaded".into()))?;

        let allocation = data
            .resources
            .iter_mut()
            .filter(|r| r.id == change.resource_id)
            .find_map(|r| r.find_allocation_mut(&change.allocation_id))
            .ok_or_else(|| {
                FetchError::Backend(format!("allocation not found: {}", change.allocation_id))
            })?;
        allocation.set_bounds(change.proposed);
        Ok(())
    }
}

fn apply_filters(resources: &mut Vec<Resource>, filters: &FilterSet) {
    if !filters.roles.is_empty() {
        resources.retain(|r| {
            r.default_role
                .as_ref()
                .is_some_and(|role| filters.roles.contains(role))
        });
    }
    for resource in resources {
        if !filters.project_ids.is_empty() {
            resource
                .allocations_by_project
                .retain(|project, _| filters.project_ids.contains(project));
        }
        if let Some(status) = filters.status {
            for allocations in resource.allocations_by_project.values_mut() {
                allocations.retain(|a| a.status == status);
            }
            resource.allocations_by_project.retain(|_, allocations| !allocations.is_empty());
        }
    }
}
