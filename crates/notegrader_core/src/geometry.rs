//! Axis-aligned rectangle helpers for page marks and worksheet images.
//!
//! # Invariants
//! - `Rect::EMPTY` stands in for geometry whose position or size is missing
//!   and never intersects anything.
//! - Flat rectangles (zero width or height) still intersect what they lie in,
//!   but contribute no area.

use std::fmt::{Display, Formatter};

/// Bounding rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Zero-sized rectangle at the origin.
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns whether the rectangle has no positive extent.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Area in square page units. Zero for empty rectangles.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        f64::from(self.width) * f64::from(self.height)
    }

    /// Returns whether the two rectangles overlap.
    ///
    /// Touching edges do not count. A flat stroke inside the other rectangle
    /// does. Missing geometry never overlaps.
    pub fn intersects_with(&self, other: &Rect) -> bool {
        if *self == Rect::EMPTY || *other == Rect::EMPTY {
            return false;
        }
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[x={:.1}, y={:.1}, w={:.1}, h={:.1}]",
            self.x, self.y, self.width, self.height
        )
    }
}
