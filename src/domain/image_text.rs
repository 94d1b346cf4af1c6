//! Document-level text extraction result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::TextBlock;

/// All text blocks extracted from one image, with the image dimensions.
///
/// This is the boundary type handed to the HTML/CSS layout generation
/// collaborator: it serializes to the JSON shape that collaborator consumes,
/// and [`ImageText::prompt_lines`] renders the per-block description lines
/// embedded into a layout-generation prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageText {
    /// Width of the source image in pixels.
    pub width: u32,
    /// Height of the source image in pixels.
    pub height: u32,
    /// The text blocks, in the order produced by the last merge pass.
    pub blocks: Vec<TextBlock>,
}

impl ImageText {
    /// Creates a new document result.
    pub fn new(width: u32, height: u32, blocks: Vec<TextBlock>) -> Self {
        Self {
            width,
            height,
            blocks,
        }
    }

    /// Renders one description line per block for a layout-generation
    /// prompt, in the form `Text block: <text>, bounding box: [x1, y1, x2, y2]`.
    pub fn prompt_lines(&self) -> Vec<String> {
        self.blocks
            .iter()
            .map(|block| {
                format!(
                    "Text block: {}, bounding box: [{:.0}, {:.0}, {:.0}, {:.0}]",
                    block.text, block.rect.x1, block.rect.y1, block.rect.x2, block.rect.y2
                )
            })
            .collect()
    }
}

impl fmt::Display for ImageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image dimensions: [{}, {}]", self.width, self.height)?;
        writeln!(f, "Total text blocks: {}", self.blocks.len())?;

        for (index, block) in self.blocks.iter().enumerate() {
            write!(
                f,
                "  Block {}: [{:.0}, {:.0}, {:.0}, {:.0}] -> '{}'",
                index + 1,
                block.rect.x1,
                block.rect.y1,
                block.rect.x2,
                block.rect.y2,
                block.text
            )?;
            match (block.font_size, block.line_spacing) {
                (Some(size), Some(spacing)) => {
                    writeln!(f, " (font size: {size}, line spacing: {spacing})")?
                }
                (Some(size), None) => writeln!(f, " (font size: {size})")?,
                _ => writeln!(f)?,
            }
        }

        Ok(())
    }
}
