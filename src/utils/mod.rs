//! Utility functions for visualizing merge results.

pub mod visualization;

pub use visualization::{draw_block_boxes, render_text_mask, VisualizationConfig};
