//! Region processing: geometry, proximity, merging, and layout metrics.
//!
//! This module contains the self-contained engineering of the crate: the
//! rectangle primitive and its boundary conversions, the adjacency
//! predicate, the two merge strategies, and the metric estimators applied
//! to merged blocks.
//!
//! # Modules
//!
//! * `geometry` - The canonical corner-pair rectangle and its operations
//! * `proximity` - Axis-aware adjacency predicate
//! * `merge` - Fixed-point and sweep merge strategies
//! * `metrics` - Font size and line spacing estimation

mod geometry;
mod merge;
mod metrics;
mod proximity;

pub use geometry::Rect;
pub use merge::{
    merge_blocks, merge_horizontal, merge_overlapping, merge_vertical, MergeStrategy,
};
pub use metrics::{attach_metrics, estimate_font_size, line_count, line_spacing};
pub use proximity::{adjacent, MergeAxis};
