//! Geometric primitives for text region merging.
//!
//! This module provides the axis-aligned rectangle used throughout the merge
//! engine. Upstream detectors disagree on rectangle conventions (some report
//! opposite corners, some report origin plus extent), so both are accepted at
//! the boundary and normalized to a single canonical form: opposite corners
//! `(x1, y1, x2, y2)`, which stays unambiguous under merge/union.

use serde::{Deserialize, Serialize};

use crate::core::{LayoutError, LayoutResult};

/// An axis-aligned rectangle in canonical corner-pair form.
///
/// Invariants: `x2 >= x1` and `y2 >= y1`, so width and height are always
/// non-negative. Zero-area rectangles are valid (a detector may report a
/// degenerate box for a single glyph fragment).
///
/// Serializes as the `[x1, y1, x2, y2]` quadruple used by the surrounding
/// pipeline's JSON, with the invariants re-checked on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f32; 4]", try_from = "[f32; 4]")]
pub struct Rect {
    /// X-coordinate of the left edge.
    pub x1: f32,
    /// Y-coordinate of the top edge.
    pub y1: f32,
    /// X-coordinate of the right edge.
    pub x2: f32,
    /// Y-coordinate of the bottom edge.
    pub y2: f32,
}

impl Rect {
    /// Creates a rectangle from opposite corners.
    ///
    /// # Arguments
    ///
    /// * `x1` - The x-coordinate of the top-left corner.
    /// * `y1` - The y-coordinate of the top-left corner.
    /// * `x2` - The x-coordinate of the bottom-right corner.
    /// * `y2` - The y-coordinate of the bottom-right corner.
    ///
    /// # Returns
    ///
    /// A new `Rect`, or `InvalidInput` if any coordinate is non-finite or
    /// the corners are swapped (negative extent).
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> LayoutResult<Self> {
        if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
            return Err(LayoutError::invalid_input(format!(
                "rectangle coordinates must be finite, got ({x1}, {y1}, {x2}, {y2})"
            )));
        }
        if x2 < x1 || y2 < y1 {
            return Err(LayoutError::invalid_input(format!(
                "rectangle has negative extent: ({x1}, {y1}, {x2}, {y2})"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Creates a rectangle from an origin and extent.
    ///
    /// This is the boundary conversion for detectors that report
    /// `(x, y, width, height)` instead of corner pairs.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the top-left corner.
    /// * `y` - The y-coordinate of the top-left corner.
    /// * `w` - The width of the rectangle.
    /// * `h` - The height of the rectangle.
    ///
    /// # Returns
    ///
    /// A new `Rect`, or `InvalidInput` if the extent is negative or any
    /// value is non-finite.
    pub fn from_origin_extent(x: f32, y: f32, w: f32, h: f32) -> LayoutResult<Self> {
        if w < 0.0 || h < 0.0 {
            return Err(LayoutError::invalid_input(format!(
                "rectangle extent must be non-negative, got width {w}, height {h}"
            )));
        }
        Self::from_corners(x, y, x + w, y + h)
    }

    /// Returns the width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Returns the union (bounding box) of this rectangle and another.
    ///
    /// The result covers exactly the extents of both inputs; this is the
    /// geometry rule applied by every merge.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Returns the signed horizontal gap between this rectangle and another.
    ///
    /// Positive values are the empty distance between the horizontal
    /// extents; zero means the extents touch; negative values mean they
    /// overlap by that amount.
    #[inline]
    pub fn gap_x(&self, other: &Rect) -> f32 {
        (self.x1.max(other.x1)) - (self.x2.min(other.x2))
    }

    /// Returns the signed vertical gap between this rectangle and another.
    ///
    /// Same convention as [`Rect::gap_x`]: positive is separation, zero is
    /// touching, negative is overlap.
    #[inline]
    pub fn gap_y(&self, other: &Rect) -> f32 {
        (self.y1.max(other.y1)) - (self.y2.min(other.y2))
    }
}

/// Implementation of TryFrom<[f32; 4]> for Rect.
///
/// This backs the serde quadruple format and validates the corner-pair
/// invariants on the way in.
impl TryFrom<[f32; 4]> for Rect {
    type Error = LayoutError;

    fn try_from(coords: [f32; 4]) -> Result<Self, Self::Error> {
        Rect::from_corners(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.x1, rect.y1, rect.x2, rect.y2]
    }
}
