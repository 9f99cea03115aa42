//! Chart configuration
//!
//! Loaded from TOML; every field is optional and falls back to the
//! defaults below.
//!
//! ```toml
//! default_view = "1/14"
//! date_shift_days = 7
//! default_color = "Blue"
//! merge_policy = "retain_cleared"
//!
//! [label_padding]
//! left_px = 15
//! right_px = 30
//!
//! [scope]
//! kind = "resource"
//! id = "a0B5e000001"
//! ```

use crate::error::ConfigError;
use gantt_calendar::ViewMode;
use gantt_layout::{AllocationLayout, LabelPadding, MergePolicy};
use gantt_model::{ColorKey, ProjectId, ResourceId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Days moved by the previous/next navigation commands
pub const DEFAULT_DATE_SHIFT_DAYS: u32 = 7;

/// Which records the chart is showing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ChartScope {
    /// Every resource
    #[default]
    All,
    /// Opened from a resource record
    Resource(ResourceId),
    /// Opened from a project record
    Project(ProjectId),
}

impl ChartScope {
    /// Chart is scoped to a single resource
    #[inline]
    #[must_use]
    pub fn is_resource_view(&self) -> bool {
        matches!(self, Self::Resource(_))
    }

    /// Chart is scoped to a single project
    #[inline]
    #[must_use]
    pub fn is_project_view(&self) -> bool {
        matches!(self, Self::Project(_))
    }
}

/// Chart configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GanttConfig {
    /// View selected on load
    pub default_view: ViewMode,
    /// Step of the previous/next commands
    pub date_shift_days: u32,
    /// Label padding applied to every bar
    pub label_padding: LabelPadding,
    /// Colour of allocations that store none
    pub default_color: ColorKey,
    /// Treatment of resources missing from a refresh
    pub merge_policy: MergePolicy,
    /// Record scope
    pub scope: ChartScope,
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            default_view: ViewMode::default(),
            date_shift_days: DEFAULT_DATE_SHIFT_DAYS,
            label_padding: LabelPadding::default(),
            default_color: ColorKey::Blue,
            merge_policy: MergePolicy::default(),
            scope: ChartScope::default(),
        }
    }
}

impl GanttConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default view
    #[inline]
    #[must_use]
    pub fn with_default_view(mut self, view: ViewMode) -> Self {
        self.default_view = view;
        self
    }

    /// With navigation shift
    #[inline]
    #[must_use]
    pub fn with_date_shift_days(mut self, days: u32) -> Self {
        self.date_shift_days = days;
        self
    }

    /// With label padding
    #[inline]
    #[must_use]
    pub fn with_label_padding(mut self, padding: LabelPadding) -> Self {
        self.label_padding = padding;
        self
    }

    /// With default colour
    #[inline]
    #[must_use]
    pub fn with_default_color(mut self, color: ColorKey) -> Self {
        self.default_color = color;
        self
    }

    /// With merge policy
    #[inline]
    #[must_use]
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// With record scope
    #[inline]
    #[must_use]
    pub fn with_scope(mut self, scope: ChartScope) -> Self {
        self.scope = scope;
        self
    }

    /// Layout engine for this configuration
    #[must_use]
    pub fn layout(&self) -> AllocationLayout {
        AllocationLayout::new(self.label_padding).with_default_color(self.default_color.color())
    }

    /// Check values that deserialize fine but cannot be used
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for a zero navigation shift or an
    /// empty scope id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.date_shift_days == 0 {
            return Err(ConfigError::Invalid("date_shift_days must be positive".into()));
        }
        let empty_scope = match &self.scope {
            ChartScope::All => false,
            ChartScope::Resource(id) => id.as_str().is_empty(),
            ChartScope::Project(id) => id.as_str().is_empty(),
        };
        if empty_scope {
            return Err(ConfigError::Invalid("scope id must not be empty".into()));
        }
        Ok(())
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`GanttConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
