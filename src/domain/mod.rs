//! Domain types for text extraction and relayout.
//!
//! This module defines the block types the merge engine operates on and the
//! document-level result handed to downstream collaborators.

mod block;
mod image_text;

pub use block::{StyleAttributes, TextAlignment, TextBlock, LINE_BREAK};
pub use image_text::ImageText;
