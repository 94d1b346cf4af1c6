//! # text-relayout
//!
//! A clustering and merge engine for text regions detected in images.
//!
//! An upstream OCR collaborator hands this crate a list of independently
//! detected text regions (a text string plus a bounding rectangle each).
//! Detectors report one region per text instance, so a single headline or
//! paragraph usually arrives as several fragments. This crate decides which
//! fragments belong to the same logical text block, merges them into
//! consolidated blocks with unioned geometry and order-preserving text
//! concatenation, and derives the layout metrics (line count, line spacing)
//! that downstream HTML/CSS generation needs.
//!
//! ## Components
//!
//! - **Text block model**: [`domain::TextBlock`] with optional style
//!   attribute slots filled by later enrichment stages
//! - **Merge engine**: fixed-point pairwise clustering and single-pass sweep
//!   merging, selectable per axis (same-line continuation, line stacking,
//!   generic overlap)
//! - **Layout metrics**: font size estimation from box height and line
//!   spacing estimation from merged geometry
//! - **Visualization**: debug box overlays and inpainting mask rendering
//!
//! ## Modules
//!
//! * [`core`] - Error types and configuration
//! * [`domain`] - Text block and document types
//! * [`processors`] - Geometry, proximity predicate, merge engine, metrics
//! * [`utils`] - Visualization helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use text_relayout::prelude::*;
//!
//! # fn main() -> Result<(), LayoutError> {
//! let blocks = vec![
//!     TextBlock::new("Hello", Rect::from_corners(0.0, 0.0, 50.0, 20.0)?),
//!     TextBlock::new("World", Rect::from_corners(55.0, 2.0, 100.0, 20.0)?),
//! ];
//!
//! let merged = merge_blocks(
//!     &blocks,
//!     10.0,
//!     MergeStrategy::FixedPoint,
//!     MergeAxis::Horizontal,
//! )?;
//!
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].text, "Hello World");
//! # Ok(())
//! # }
//! ```
//!
//! The merge engine is pure and synchronous: it performs no I/O, reads only
//! its input slice, and allocates a new output list. Independent inputs can
//! be processed from multiple threads without synchronization. A single
//! call's fixed-point loop is inherently sequential (each merge changes the
//! working set examined next) and must not be parallelized internally.

pub mod core;
pub mod domain;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use text_relayout::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - Block types ([`TextBlock`](crate::domain::TextBlock),
///   [`ImageText`](crate::domain::ImageText))
/// - The merge engine ([`merge_blocks`](crate::processors::merge_blocks) and
///   the per-direction wrappers)
/// - Essential error and config types
///
/// For visualization and lower-level geometry, import directly from the
/// respective modules (e.g., `text_relayout::utils`,
/// `text_relayout::processors`).
pub mod prelude {
    pub use crate::core::{LayoutError, LayoutResult, MergeConfig};
    pub use crate::domain::{ImageText, TextAlignment, TextBlock};
    pub use crate::processors::{
        merge_blocks, merge_horizontal, merge_overlapping, merge_vertical, MergeAxis,
        MergeStrategy, Rect,
    };
}
