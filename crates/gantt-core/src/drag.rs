//! Drag interaction state machine
//!
//! ```text
//! Idle --begin--> Dragging(mode) --end-----> Idle  (outcome)
//!                        |        --cancel--> Idle  (no outcome)
//!                        +--update--> Dragging(mode) (preview)
//! ```
//!
//! Only one session exists at a time. Previews never touch the committed
//! allocation; the caller applies the [`DragOutcome`] returned by
//! [`DragController::end`].

use gantt_model::{Allocation, AllocationId, ProjectId, SlotBounds};
use serde::Serialize;

/// What part of the bar is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DragMode {
    /// Whole bar; both bounds shift
    Move,
    /// Left handle
    ResizeLeft,
    /// Right handle
    ResizeRight,
}

impl DragMode {
    /// Bounds proposed when the pointer moved from `anchor` to `current`
    ///
    /// Resizing never inverts the bar: the dragged edge stops at the
    /// opposite one.
    #[must_use]
    pub fn propose(self, original: SlotBounds, anchor: i32, current: i32) -> SlotBounds {
        match self {
            Self::Move => original.shifted(current.saturating_sub(anchor)),
            Self::ResizeLeft => SlotBounds::new(current.min(original.right), original.right),
            Self::ResizeRight => SlotBounds::new(original.left, current.max(original.left)),
        }
    }
}

/// Observable controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress
    Idle,
    /// Gesture in progress
    Dragging(DragMode),
}

/// An in-progress gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Dragged allocation
    pub allocation_id: AllocationId,
    /// Project of the dragged allocation
    pub project_id: ProjectId,
    /// Bounds when the gesture started
    pub original: SlotBounds,
    /// Slot under the pointer at start
    pub anchor_slot: i32,
    /// Slot under the pointer now
    pub current_slot: i32,
    /// Gesture kind
    pub mode: DragMode,
}

impl DragSession {
    /// Bounds the gesture currently proposes
    #[inline]
    #[must_use]
    pub fn proposed(&self) -> SlotBounds {
        self.mode.propose(self.original, self.anchor_slot, self.current_slot)
    }
}

/// Transient bounds to draw while dragging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPreview {
    /// Dragged allocation
    pub allocation_id: AllocationId,
    /// Bounds to draw
    pub bounds: SlotBounds,
}

/// Result of a completed gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    /// Dragged allocation
    pub allocation_id: AllocationId,
    /// Project of the dragged allocation
    pub project_id: ProjectId,
    /// Gesture kind
    pub mode: DragMode,
    /// Bounds before the gesture
    pub previous: SlotBounds,
    /// Bounds after the gesture
    pub proposed: SlotBounds,
}

impl DragOutcome {
    /// Gesture ended where it started
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.previous == self.proposed
    }
}

/// Pixel geometry of the rendered grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// X coordinate of the grid's left edge
    pub origin_x: f64,
    /// Grid width in pixels
    pub width: f64,
    /// Number of slots across the width
    pub total_slots: u32,
}

impl GridMetrics {
    /// Create metrics
    #[inline]
    #[must_use]
    pub fn new(origin_x: f64, width: f64, total_slots: u32) -> Self {
        Self {
            origin_x,
            width,
            total_slots,
        }
    }

    /// Slot under pointer coordinate `x`, or `None` outside the grid
    #[must_use]
    pub fn slot_at(&self, x: f64) -> Option<i32> {
        if self.total_slots == 0 || self.width.is_nan() || self.width <= 0.0 || !x.is_finite() {
            return None;
        }
        let offset = x - self.origin_x;
        if offset < 0.0 || offset >= self.width {
            return None;
        }
        let slot_width = self.width / f64::from(self.total_slots);
        let index = (offset / slot_width).floor();
        let last = i32::try_from(self.total_slots - 1).unwrap_or(i32::MAX);
        #[allow(clippy::cast_possible_truncation)]
        Some((index as i32).min(last))
    }
}

/// Owns at most one [`DragSession`]
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Create an idle controller
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> DragState {
        self.session
            .as_ref()
            .map_or(DragState::Idle, |s| DragState::Dragging(s.mode))
    }

    /// Whether a gesture is in progress
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Active session, if any
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a gesture on `allocation` with the pointer over `slot`
    ///
    /// Returns `false` and changes nothing while another gesture is active.
    pub fn begin(&mut self, allocation: &Allocation, slot: i32, mode: DragMode) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            allocation_id: allocation.id.clone(),
            project_id: allocation.project_id.clone(),
            original: allocation.bounds(),
            anchor_slot: slot,
            current_slot: slot,
            mode,
        });
        true
    }

    /// Pointer moved over `slot`
    pub fn update(&mut self, slot: i32) -> Option<DragPreview> {
        let session = self.session.as_mut()?;
        session.current_slot = slot;
        Some(DragPreview {
            allocation_id: session.allocation_id.clone(),
            bounds: session.proposed(),
        })
    }

    /// Pointer moved to pixel `x`; leaving the grid abandons the gesture
    pub fn update_pointer(&mut self, x: f64, metrics: &GridMetrics) -> Option<DragPreview> {
        if self.session.is_none() {
            return None;
        }
        match metrics.slot_at(x) {
            Some(slot) => self.update(slot),
            None => {
                self.cancel();
                None
            }
        }
    }

    /// Release the pointer
    pub fn end(&mut self) -> Option<DragOutcome> {
        let session = self.session.take()?;
        Some(DragOutcome {
            proposed: session.proposed(),
            previous: session.original,
            allocation_id: session.allocation_id,
            project_id: session.project_id,
            mode: session.mode,
        })
    }

    /// Abandon the gesture (Escape)
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(left: i32, right: i32) -> Allocation {
        Allocation::new("a1", "p1", SlotBounds::new(left, right))
    }

    #[test]
    fn resize_left_clamps_at_right_edge() {
        let mut drag = DragController::new();
        assert!(drag.begin(&allocation(3, 7), 3, DragMode::ResizeLeft));

        let preview = drag.update(5).unwrap();
        assert_eq!(preview.bounds, SlotBounds::new(5, 7));

        let preview = drag.update(9).unwrap();
        assert_eq!(preview.bounds, SlotBounds::new(7, 7));

        let outcome = drag.end().unwrap();
        assert_eq!(outcome.previous, SlotBounds::new(3, 7));
        assert_eq!(outcome.proposed, SlotBounds::new(7, 7));
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn resize_right_clamps_at_left_edge() {
        let mut drag = DragController::new();
        drag.begin(&allocation(3, 7), 7, DragMode::ResizeRight);

        assert_eq!(drag.update(10).unwrap().bounds, SlotBounds::new(3, 10));
        assert_eq!(drag.update(0).unwrap().bounds, SlotBounds::new(3, 3));
    }

    #[test]
    fn move_shifts_both_bounds() {
        let mut drag = DragController::new();
        drag.begin(&allocation(3, 7), 4, DragMode::Move);

        assert_eq!(drag.update(1).unwrap().bounds, SlotBounds::new(0, 4));
        assert_eq!(drag.update(-2).unwrap().bounds, SlotBounds::new(-3, 1));
        let outcome = drag.end().unwrap();
        assert_eq!(outcome.proposed, SlotBounds::new(-3, 1));
        assert_eq!(outcome.mode, DragMode::Move);
    }

    #[test]
    fn second_begin_is_ignored() {
        let mut drag = DragController::new();
        assert!(drag.begin(&allocation(0, 1), 0, DragMode::Move));
        assert!(!drag.begin(&Allocation::new("a2", "p1", SlotBounds::new(5, 6)), 5, DragMode::ResizeLeft));

        assert_eq!(drag.state(), DragState::Dragging(DragMode::Move));
        assert_eq!(drag.session().unwrap().allocation_id.as_str(), "a1");
    }

    #[test]
    fn cancel_produces_no_outcome() {
        let mut drag = DragController::new();
        drag.begin(&allocation(0, 1), 0, DragMode::Move);
        drag.update(3);

        assert!(drag.cancel());
        assert!(!drag.cancel());
        assert!(drag.end().is_none());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn idle_controller_ignores_updates() {
        let mut drag = DragController::new();
        assert!(drag.update(3).is_none());
        assert!(drag.end().is_none());
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn unchanged_gesture_is_noop() {
        let mut drag = DragController::new();
        drag.begin(&allocation(2, 4), 3, DragMode::Move);
        drag.update(5);
        drag.update(3);
        assert!(drag.end().unwrap().is_noop());
    }

    #[test]
    fn pointer_is_quantized_into_slots() {
        let metrics = GridMetrics::new(100.0, 1000.0, 10);
        assert_eq!(metrics.slot_at(100.0), Some(0));
        assert_eq!(metrics.slot_at(199.9), Some(0));
        assert_eq!(metrics.slot_at(200.0), Some(1));
        assert_eq!(metrics.slot_at(1099.0), Some(9));
        assert_eq!(metrics.slot_at(99.0), None);
        assert_eq!(metrics.slot_at(1100.0), None);
        assert_eq!(GridMetrics::new(0.0, 0.0, 10).slot_at(0.0), None);
    }

    #[test]
    fn leaving_the_grid_cancels() {
        let metrics = GridMetrics::new(0.0, 700.0, 7);
        let mut drag = DragController::new();
        drag.begin(&allocation(1, 2), 1, DragMode::ResizeRight);

        let preview = drag.update_pointer(450.0, &metrics).unwrap();
        assert_eq!(preview.bounds, SlotBounds::new(1, 4));

        assert!(drag.update_pointer(-5.0, &metrics).is_none());
        assert!(!drag.is_dragging());
        assert!(drag.end().is_none());
    }

    #[test]
    fn preview_does_not_touch_the_allocation() {
        let a = allocation(3, 7);
        let mut drag = DragController::new();
        drag.begin(&a, 3, DragMode::ResizeLeft);
        drag.update(5);
        assert_eq!(a.bounds(), SlotBounds::new(3, 7));
        assert_eq!(drag.session().unwrap().original, SlotBounds::new(3, 7));
    }
}
