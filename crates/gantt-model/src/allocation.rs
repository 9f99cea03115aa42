//! Allocation records
//!
//! An allocation is a resource's committed or held time on a project,
//! expressed as inclusive slot-index bounds relative to the current grid.
//! Bounds may fall outside the visible window; layout clamps them.

use crate::ids::{AllocationId, ProjectId};
use crate::palette::ColorKey;
use serde::{Deserialize, Serialize};

/// Allocation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Committed time
    Active,
    /// Tentatively held time
    Hold,
    /// Resource is unavailable (leave, holiday, ...)
    Unavailable,
}

/// Effort level of an allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Effort {
    /// Light effort
    Low,
    /// Moderate effort
    Medium,
    /// Heavy effort
    High,
}

/// Inclusive slot-index bounds
///
/// Signed so that allocations starting before or ending after the visible
/// window can be represented without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotBounds {
    /// First slot covered
    pub left: i32,
    /// Last slot covered
    pub right: i32,
}

impl SlotBounds {
    /// Create bounds
    #[inline]
    #[must_use]
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Number of slots covered (0 when inverted)
    #[inline]
    #[must_use]
    pub fn span(self) -> u32 {
        u32::try_from(i64::from(self.right) - i64::from(self.left) + 1).unwrap_or(0)
    }

    /// Shift both bounds by `delta` slots (saturating)
    #[inline]
    #[must_use]
    pub const fn shifted(self, delta: i32) -> Self {
        Self {
            left: self.left.saturating_add(delta),
            right: self.right.saturating_add(delta),
        }
    }

    /// Clamp into `[0, total_slots - 1]` keeping `left <= right`
    ///
    /// `total_slots` of zero is treated as one slot.
    #[must_use]
    pub fn clamped(self, total_slots: u32) -> Self {
        let last = i32::try_from(total_slots.max(1) - 1).unwrap_or(i32::MAX);
        let left = self.left.clamp(0, last);
        let right = self.right.clamp(left, last);
        Self { left, right }
    }

    /// Whether any covered slot lies within `[0, total_slots - 1]`
    #[must_use]
    pub fn overlaps_window(self, total_slots: u32) -> bool {
        let total = i64::from(total_slots.max(1));
        self.left <= self.right && i64::from(self.right) >= 0 && i64::from(self.left) < total
    }
}

/// A single allocation of a resource to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    /// Record id
    pub id: AllocationId,
    /// Owning project
    pub project_id: ProjectId,
    /// Allocation status
    pub status: Status,
    /// Effort level, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<Effort>,
    /// Palette colour, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorKey>,
    /// First slot index (may be negative)
    pub left: i32,
    /// Last slot index (may exceed the window)
    pub right: i32,
}

impl Allocation {
    /// Create an active allocation without effort or colour
    #[must_use]
    pub fn new(
        id: impl Into<AllocationId>,
        project_id: impl Into<ProjectId>,
        bounds: SlotBounds,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            status: Status::Active,
            effort: None,
            color: None,
            left: bounds.left,
            right: bounds.right,
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// With effort
    #[inline]
    #[must_use]
    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = Some(effort);
        self
    }

    /// With colour
    #[inline]
    #[must_use]
    pub fn with_color(mut self, color: ColorKey) -> Self {
        self.color = Some(color);
        self
    }

    /// Current slot bounds
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> SlotBounds {
        SlotBounds::new(self.left, self.right)
    }

    /// Replace the slot bounds
    #[inline]
    pub fn set_bounds(&mut self, bounds: SlotBounds) {
        self.left = bounds.left;
        self.right = bounds.right;
    }
}
