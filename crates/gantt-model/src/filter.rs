//! Chart filters
//!
//! Filters narrow the record-service fetch to selected projects, roles and
//! an allocation status. An empty filter set means "everything".

use crate::allocation::Status;
use crate::ids::ProjectId;
use crate::resource::Project;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    /// Selected projects
    #[serde(default)]
    pub project_ids: BTreeSet<ProjectId>,
    /// Selected roles
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Status restriction (`None` = all statuses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl FilterSet {
    /// Empty filter set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no restriction is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.project_ids.is_empty() && self.roles.is_empty() && self.status.is_none()
    }

    /// Select a project; returns `false` if it was already selected
    pub fn add_project(&mut self, id: impl Into<ProjectId>) -> bool {
        self.project_ids.insert(id.into())
    }

    /// Deselect a project; returns `false` if it was not selected
    pub fn remove_project(&mut self, id: &ProjectId) -> bool {
        self.project_ids.remove(id)
    }

    /// Select a role
    pub fn add_role(&mut self, role: impl Into<String>) -> bool {
        self.roles.insert(role.into())
    }

    /// Deselect a role
    pub fn remove_role(&mut self, role: &str) -> bool {
        self.roles.remove(role)
    }

    /// Restrict to a status, or clear the restriction with `None`
    pub fn set_status(&mut self, status: Option<Status>) {
        self.status = status;
    }

    /// Projects offered by a search box
    ///
    /// Matches `text` case-insensitively against project names and leaves out
    /// projects that are already selected or have no name.
    #[must_use]
    pub fn project_options<'a>(&self, projects: &'a [Project], text: &str) -> Vec<&'a Project> {
        let needle = text.to_lowercase();
        projects
            .iter()
            .filter(|p| !p.name.is_empty())
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .filter(|p| !self.project_ids.contains(&p.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects() -> Vec<Project> {
        vec![
            Project::new("p1", "Apollo Rollout"),
            Project::new("p2", "Billing Revamp"),
            Project::new("p3", "apollo support"),
            Project::new("p4", ""),
        ]
    }

    #[test]
    fn empty_by_default() {
        let mut filters = FilterSet::new();
        assert!(filters.is_empty());

        filters.set_status(Some(Status::Hold));
        assert!(!filters.is_empty());
    }

    #[test]
    fn options_are_case_insensitive_and_exclude_selected() {
        let projects = projects();
        let mut filters = FilterSet::new();

        let names: Vec<_> = filters
            .project_options(&projects, "APOLLO")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(names, vec!["p1", "p3"]);

        assert!(filters.add_project("p1"));
        assert!(!filters.add_project("p1"));
        let names: Vec<_> = filters
            .project_options(&projects, "apollo")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(names, vec!["p3"]);
    }

    #[test]
    fn blank_search_lists_named_projects() {
        let projects = projects();
        assert_eq!(FilterSet::new().project_options(&projects, "").len(), 3);
    }

    #[test]
    fn removed_project_is_offered_again() {
        let projects = projects();
        let mut filters = FilterSet::new();
        filters.add_project("p3");
        assert_eq!(filters.project_options(&projects, "apollo").len(), 1);

        assert!(filters.remove_project(&ProjectId::new("p3")));
        assert!(!filters.remove_project(&ProjectId::new("p3")));
        assert_eq!(filters.project_options(&projects, "apollo").len(), 2);
        assert!(filters.is_empty());
    }

    #[test]
    fn roles_toggle() {
        let mut filters = FilterSet::new();
        assert!(filters.add_role("Engineer"));
        assert!(filters.remove_role("Engineer"));
        assert!(!filters.remove_role("Engineer"));
        assert!(filters.is_empty());
    }
}
