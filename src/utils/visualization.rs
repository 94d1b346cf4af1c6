//! Visualization utilities for merged text blocks.
//!
//! This module provides debug and pipeline renderings of block geometry:
//! a box overlay for inspecting merge results on the source image, and a
//! binary text mask handed to the external inpainting collaborator that
//! erases the original text before relayout.
//!
//! # Examples
//!
//! ```rust,no_run
//! use image::RgbImage;
//! use text_relayout::prelude::*;
//! use text_relayout::utils::{draw_block_boxes, VisualizationConfig};
//!
//! # fn main() -> Result<(), LayoutError> {
//! let img = RgbImage::new(800, 600);
//! let blocks = vec![TextBlock::new(
//!     "Hello",
//!     Rect::from_corners(10.0, 10.0, 120.0, 40.0)?,
//! )];
//! let config = VisualizationConfig::with_system_font();
//! let overlay = draw_block_boxes(&img, &blocks, &config);
//! # Ok(())
//! # }
//! ```

use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;
use std::path::Path;
use tracing::debug;

use crate::domain::TextBlock;

const BBOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

const MASK_FOREGROUND: Rgb<u8> = Rgb([255, 255, 255]);

const MASK_BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Configuration for block visualization.
///
/// Controls box styling and the font used for text labels. Without a font,
/// label rendering is skipped and only the boxes are drawn.
pub struct VisualizationConfig {
    /// The font to use for block labels. If None, labels are skipped.
    pub font: Option<FontVec>,

    /// The scale factor for the label font. Defaults to 16.0.
    pub font_scale: f32,

    /// The thickness of bounding box lines in pixels. Defaults to 2.
    pub bbox_thickness: u32,

    /// The color of bounding box lines. Defaults to red.
    pub bbox_color: Rgb<u8>,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            font: None,
            font_scale: 16.0,
            bbox_thickness: 2,
            bbox_color: BBOX_COLOR,
        }
    }
}

impl VisualizationConfig {
    /// Creates a VisualizationConfig with a font loaded from the specified path.
    ///
    /// # Arguments
    ///
    /// * `font_path` - Path to the font file to load
    ///
    /// # Returns
    ///
    /// A Result containing the VisualizationConfig if successful, or an
    /// error if the font could not be loaded or parsed.
    pub fn with_font_path(font_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let font_data = std::fs::read(font_path)?;
        let font = FontVec::try_from_vec(font_data)
            .map_err(|_| format!("Failed to parse font file: {}", font_path.display()))?;

        Ok(Self {
            font: Some(font),
            ..Self::default()
        })
    }

    /// Creates a VisualizationConfig with a system font.
    ///
    /// This function attempts to load a font from common system locations
    /// and falls back to the default (label-less) configuration when none
    /// is found.
    pub fn with_system_font() -> Self {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];

        for path in font_paths {
            if let Ok(config) = Self::with_font_path(Path::new(path)) {
                debug!("Loaded system font from {}", path);
                return config;
            }
        }

        debug!("No system font found, labels will be skipped");
        Self::default()
    }
}

/// Converts a block rectangle to integer pixel coordinates, clamping
/// degenerate extents to one pixel so drawing never panics.
fn to_pixel_rect(block: &TextBlock) -> PixelRect {
    let width = (block.rect.width().round() as u32).max(1);
    let height = (block.rect.height().round() as u32).max(1);
    PixelRect::at(block.rect.x1.round() as i32, block.rect.y1.round() as i32)
        .of_size(width, height)
}

/// Draws the bounding boxes of the given blocks onto a copy of the image.
///
/// Each box is drawn as a hollow rectangle with the configured color and
/// thickness. When the configuration carries a font, the block text is
/// drawn just above the box.
///
/// # Arguments
///
/// * `img` - The source image to draw over.
/// * `blocks` - The blocks to visualize.
/// * `config` - Box and label styling.
///
/// # Returns
///
/// A new image with the overlay applied.
pub fn draw_block_boxes(
    img: &RgbImage,
    blocks: &[TextBlock],
    config: &VisualizationConfig,
) -> RgbImage {
    debug!("Drawing {} block boxes", blocks.len());

    let mut canvas = img.clone();
    for block in blocks {
        let rect = to_pixel_rect(block);

        for inset in 0..config.bbox_thickness {
            let width = rect.width().saturating_sub(inset * 2);
            let height = rect.height().saturating_sub(inset * 2);
            if width == 0 || height == 0 {
                break;
            }
            draw_hollow_rect_mut(
                &mut canvas,
                PixelRect::at(rect.left() + inset as i32, rect.top() + inset as i32)
                    .of_size(width, height),
                config.bbox_color,
            );
        }

        if let Some(font) = &config.font {
            let label_y = rect.top() - config.font_scale as i32 - 2;
            draw_text_mut(
                &mut canvas,
                LABEL_COLOR,
                rect.left(),
                label_y.max(0),
                config.font_scale,
                font,
                &block.text,
            );
        }
    }

    canvas
}

/// Renders the binary inpainting mask for the given blocks.
///
/// The mask marks every block rectangle in white on a black background;
/// the external eraser collaborator removes the original pixels wherever
/// the mask is set.
///
/// # Arguments
///
/// * `width` - Width of the source image in pixels.
/// * `height` - Height of the source image in pixels.
/// * `blocks` - The blocks whose areas should be erased.
///
/// # Returns
///
/// The mask image, sized `width` x `height`.
pub fn render_text_mask(width: u32, height: u32, blocks: &[TextBlock]) -> RgbImage {
    debug!("Rendering text mask for {} blocks", blocks.len());

    let mut mask = RgbImage::from_pixel(width, height, MASK_BACKGROUND);
    for block in blocks {
        draw_filled_rect_mut(&mut mask, to_pixel_rect(block), MASK_FOREGROUND);
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::Rect;

    fn block(x1: f32, y1: f32, x2: f32, y2: f32) -> TextBlock {
        TextBlock::new("text", Rect::from_corners(x1, y1, x2, y2).unwrap())
    }

    #[test]
    fn test_mask_marks_block_area() {
        let mask = render_text_mask(100, 100, &[block(10.0, 10.0, 30.0, 20.0)]);
        assert_eq!(mask.get_pixel(15, 15), &MASK_FOREGROUND);
        assert_eq!(mask.get_pixel(50, 50), &MASK_BACKGROUND);
    }

    #[test]
    fn test_mask_of_empty_block_list_is_black() {
        let mask = render_text_mask(10, 10, &[]);
        assert!(mask.pixels().all(|p| *p == MASK_BACKGROUND));
    }

    #[test]
    fn test_overlay_draws_box_edges() {
        let img = RgbImage::new(100, 100);
        let config = VisualizationConfig::default();
        let overlay = draw_block_boxes(&img, &[block(10.0, 10.0, 30.0, 20.0)], &config);
        assert_eq!(overlay.get_pixel(10, 10), &config.bbox_color);
        // Interior stays untouched.
        assert_eq!(overlay.get_pixel(20, 15), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_overlay_handles_degenerate_rect() {
        let img = RgbImage::new(100, 100);
        let config = VisualizationConfig::default();
        // Zero-area rect must not panic.
        let overlay = draw_block_boxes(&img, &[block(5.0, 5.0, 5.0, 5.0)], &config);
        assert_eq!(overlay.get_pixel(5, 5), &config.bbox_color);
    }
}
