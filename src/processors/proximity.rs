//! Proximity predicate for text region merging.
//!
//! Two regions are merged when they are adjacent under a pixel threshold
//! along a merge axis. The axis encodes what kind of block the merge is
//! building: words on the same text line, stacked lines of a paragraph, or
//! any near-overlapping fragments regardless of direction.

use crate::processors::Rect;

/// The merge direction a proximity check is evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAxis {
    /// Same-line continuation: different words of one text line.
    Horizontal,
    /// Line stacking: consecutive lines of one paragraph.
    Vertical,
    /// Direction-agnostic near-overlap of bounding boxes.
    Generic,
}

/// Decides whether two rectangles are adjacent under the threshold for the
/// given merge axis.
///
/// All gap comparisons are inclusive: a pair exactly `threshold` pixels
/// apart still merges. Gaps are signed interval distances (see
/// [`Rect::gap_x`]), so overlapping extents always satisfy a gap test and
/// zero-area rectangles are handled without special cases.
///
/// # Arguments
///
/// * `a` - The first rectangle.
/// * `b` - The second rectangle.
/// * `threshold` - Maximum pixel gap under which the pair counts as adjacent.
/// * `axis` - The merge direction being evaluated.
///
/// # Returns
///
/// True if the pair should be merged along the given axis.
pub fn adjacent(a: &Rect, b: &Rect, threshold: f32, axis: MergeAxis) -> bool {
    match axis {
        // Same text line: vertical extents must be within the threshold of
        // touching, and the horizontal extents within the (generous) same
        // threshold so unrelated columns do not chain together.
        MergeAxis::Horizontal => a.gap_y(b) <= threshold && a.gap_x(b) <= threshold,

        // Stacked lines: horizontal extents near overlap, and the gap from
        // the bottom of the upper rect to the top of the lower rect within
        // the threshold.
        MergeAxis::Vertical => {
            let (upper, lower) = if a.y1 <= b.y1 { (a, b) } else { (b, a) };
            a.gap_x(b) <= threshold && (lower.y1 - upper.y2) <= threshold
        }

        // Near-overlap, symmetric in x and y.
        MergeAxis::Generic => a.gap_x(b) <= threshold && a.gap_y(b) <= threshold,
    }
}
