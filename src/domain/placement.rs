//! Percentage-space placement for draggable jersey elements
//!
//! Every positionable element (logo, name, number, team name, front text) is
//! stored in a [0,100]x[0,100] space independent of the preview's pixel size.
//! Positions are kept inside a safe interior so nothing leaves the garment
//! silhouette, and scale multipliers are clamped to their ranges.

use serde::{Deserialize, Serialize};

/// Safe interior of the template, in percent
pub const SAFE_MIN: f64 = 10.0;
pub const SAFE_MAX: f64 = 90.0;

/// Preview template viewbox (percentage x maps to x * 2, y to y * 2.8)
pub const VIEWBOX_WIDTH: f64 = 200.0;
pub const VIEWBOX_HEIGHT: f64 = 280.0;

/// Inclusive range with a fallback for non-numeric input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ScaleRange {
    /// Clamp into range; NaN falls back to the default
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

pub const LOGO_SCALE: ScaleRange = ScaleRange { min: 0.5, max: 2.0, default: 1.0 };
pub const TEXT_SCALE: ScaleRange = ScaleRange { min: 0.5, max: 2.5, default: 1.0 };
pub const OUTLINE_WIDTH: ScaleRange = ScaleRange { min: 0.0, max: 4.0, default: 0.0 };
pub const PATTERN_OPACITY: ScaleRange = ScaleRange { min: 0.0, max: 1.0, default: 0.5 };

/// Clamp one percentage coordinate into the safe interior
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        50.0
    } else {
        value.clamp(SAFE_MIN, SAFE_MAX)
    }
}

/// A point in percentage space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a position, clamped into the safe interior
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }.clamped()
    }

    /// Horizontally centred position (for elements that only move vertically)
    pub fn centered(y: f64) -> Self {
        Position::new(50.0, y)
    }

    pub fn clamped(self) -> Self {
        Position {
            x: clamp_percent(self.x),
            y: clamp_percent(self.y),
        }
    }

    pub fn is_within_safe_region(&self) -> bool {
        (SAFE_MIN..=SAFE_MAX).contains(&self.x) && (SAFE_MIN..=SAFE_MAX).contains(&self.y)
    }

    /// Convert to viewbox coordinates
    pub fn to_viewbox(&self) -> (f64, f64) {
        (
            self.x * VIEWBOX_WIDTH / 100.0,
            self.y * VIEWBOX_HEIGHT / 100.0,
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { x: 50.0, y: 50.0 }
    }
}
