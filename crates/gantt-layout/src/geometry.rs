//! Allocation bar geometry
//!
//! A bar is positioned by two insets measured from opposite edges of the
//! grid, so resizing either end only changes one value:
//!
//! - `left_pct  = left / total`
//! - `right_pct = (total - (right + 1)) / total`
//!
//! Bounds are clamped into the window first, so bars that start before or
//! end after the visible range sit flush against the viewport edge.
//! Insets are fractions of the grid width (0.0 to 1.0).

use gantt_model::{Allocation, Color, Effort, Status, DEFAULT_COLOR};
use serde::{Deserialize, Serialize};

/// Default label padding from the bar's left edge
pub const LABEL_LEFT_PADDING_PX: u32 = 15;

/// Default label padding from the bar's right edge
pub const LABEL_RIGHT_PADDING_PX: u32 = 30;

/// Fixed pixel padding added to label insets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPadding {
    /// Padding from the left inset
    pub left_px: u32,
    /// Padding from the right inset
    pub right_px: u32,
}

impl Default for LabelPadding {
    fn default() -> Self {
        Self {
            left_px: LABEL_LEFT_PADDING_PX,
            right_px: LABEL_RIGHT_PADDING_PX,
        }
    }
}

/// Inset made of a grid fraction plus fixed pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Inset {
    /// Fraction of the grid width
    pub pct: f64,
    /// Extra pixels
    pub padding_px: u32,
}

impl Inset {
    /// CSS length, e.g. `calc(20% + 15px)`
    #[must_use]
    pub fn css(&self) -> String {
        format!("calc({}% + {}px)", percent(self.pct), self.padding_px)
    }
}

/// Visual class of a bar
///
/// Unavailable and Hold statuses take precedence over effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StyleClass {
    /// Resource unavailable
    Unavailable,
    /// Held, not committed
    Hold,
    /// Active, low effort
    EffortLow,
    /// Active, medium effort
    EffortMedium,
    /// Active, high effort
    EffortHigh,
    /// Active, effort not recorded
    Neutral,
}

impl StyleClass {
    /// Classify an allocation
    #[must_use]
    pub fn of(allocation: &Allocation) -> Self {
        match (allocation.status, allocation.effort) {
            (Status::Unavailable, _) => Self::Unavailable,
            (Status::Hold, _) => Self::Hold,
            (Status::Active, Some(Effort::Low)) => Self::EffortLow,
            (Status::Active, Some(Effort::Medium)) => Self::EffortMedium,
            (Status::Active, Some(Effort::High)) => Self::EffortHigh,
            (Status::Active, None) => Self::Neutral,
        }
    }

    /// Semantic flag name for renderers
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Hold => "hold",
            Self::EffortLow => "effort-low",
            Self::EffortMedium => "effort-medium",
            Self::EffortHigh => "effort-high",
            Self::Neutral => "neutral",
        }
    }
}

/// Display geometry of one allocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationGeometry {
    /// Inset from the grid's left edge
    pub left_pct: f64,
    /// Inset from the grid's right edge
    pub right_pct: f64,
    /// Label inset from the left edge
    pub label_left: Inset,
    /// Label inset from the right edge
    pub label_right: Inset,
    /// Visual class
    pub style_class: StyleClass,
    /// Explicit colour, if any
    pub color: Option<Color>,
    /// Colour used when `color` is `None`
    pub default_color: Color,
    /// Whether any part of the allocation lies inside the window
    pub visible: bool,
}

impl AllocationGeometry {
    /// Bar width as a fraction of the grid
    #[inline]
    #[must_use]
    pub fn width_pct(&self) -> f64 {
        1.0 - self.left_pct - self.right_pct
    }

    /// Colour to paint with
    #[inline]
    #[must_use]
    pub fn color_or_default(&self) -> Color {
        self.color.unwrap_or(self.default_color)
    }

    /// Inline CSS for the bar
    #[must_use]
    pub fn style(&self) -> String {
        let mut css = format!(
            "left: {}%; right: {}%",
            percent(self.left_pct),
            percent(self.right_pct)
        );
        if self.style_class != StyleClass::Unavailable {
            css.push_str(&format!("; background-color: {}", self.color_or_default()));
        }
        css
    }

    /// Inline CSS for the bar label
    #[must_use]
    pub fn label_style(&self) -> String {
        format!(
            "left: {}; right: {}",
            self.label_left.css(),
            self.label_right.css()
        )
    }
}

/// Lays allocations out on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationLayout {
    padding: LabelPadding,
    default_color: Color,
}

impl Default for AllocationLayout {
    fn default() -> Self {
        Self::new(LabelPadding::default())
    }
}

impl AllocationLayout {
    /// Create with custom label padding
    #[inline]
    #[must_use]
    pub fn new(padding: LabelPadding) -> Self {
        Self {
            padding,
            default_color: DEFAULT_COLOR,
        }
    }

    /// With the colour used for allocations that store none
    #[inline]
    #[must_use]
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    /// Label padding in use
    #[inline]
    #[must_use]
    pub fn padding(&self) -> LabelPadding {
        self.padding
    }

    /// Compute the geometry of `allocation` on a grid of `total_slots`
    ///
    /// A `total_slots` of zero is treated as a single slot.
    #[must_use]
    pub fn layout(&self, allocation: &Allocation, total_slots: u32) -> AllocationGeometry {
        let total = total_slots.max(1);
        let bounds = allocation.bounds();
        let clamped = bounds.clamped(total);

        let total_f = f64::from(total);
        let left_pct = f64::from(clamped.left) / total_f;
        let right_pct = (total_f - f64::from(clamped.right + 1)) / total_f;

        let style_class = StyleClass::of(allocation);
        let color = allocation
            .color
            .filter(|_| allocation.status != Status::Unavailable)
            .map(|key| key.color());

        AllocationGeometry {
            left_pct,
            right_pct,
            label_left: Inset {
                pct: left_pct,
                padding_px: self.padding.left_px,
            },
            label_right: Inset {
                pct: right_pct,
                padding_px: self.padding.right_px,
            },
            style_class,
            color,
            default_color: self.default_color,
            visible: bounds.overlaps_window(total),
        }
    }
}

/// Lay out with the default label padding
#[must_use]
pub fn layout(allocation: &Allocation, total_slots: u32) -> AllocationGeometry {
    AllocationLayout::default().layout(allocation, total_slots)
}

/// Fraction as a percentage string with at most four decimals
fn percent(fraction: f64) -> String {
    let text = format!("{:.4}", fraction * 100.0);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
