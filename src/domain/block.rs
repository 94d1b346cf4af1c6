//! Text block types.
//!
//! A [`TextBlock`] is the unit the merge engine operates on: a text string
//! with an associated bounding rectangle, plus the derived and enrichment
//! attributes later pipeline stages attach. Blocks are created by an
//! external detector (one per detected text instance), consumed and replaced
//! by each merge pass, and discarded once the rendering stage has consumed
//! the final merged list.

use serde::{Deserialize, Serialize};

use crate::processors::Rect;

/// The line-break marker inserted between constituents by vertical merges.
///
/// [`crate::processors::line_count`] counts occurrences of this marker to
/// recover the number of logical lines in a merged block.
pub const LINE_BREAK: char = '\n';

/// Text alignment within a block, assigned by an external enrichment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Text is aligned to the left edge of the block.
    Left,
    /// Text is centered within the block.
    Center,
    /// Text is aligned to the right edge of the block.
    Right,
}

/// Optional style attributes attached to a block by external enrichment
/// stages (font classification, color extraction, alignment detection).
///
/// The core never computes these; it only carries them through merges and
/// serialization. Unknown fields produced by newer enrichment stages are
/// preserved in `extra` rather than rejected, so the core stays tolerant of
/// collaborators evolving their output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleAttributes {
    /// Font family name, if a font classification stage ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Text color (CSS color string), if a color extraction stage ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Text alignment, if an alignment detection stage ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlignment>,

    /// Opaque attributes from enrichment stages this crate does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StyleAttributes {
    /// Returns true if no attribute slot is filled.
    pub fn is_empty(&self) -> bool {
        self.font_name.is_none()
            && self.color.is_none()
            && self.alignment.is_none()
            && self.extra.is_empty()
    }
}

/// A detected or merged text region.
///
/// Merging never mutates blocks in place: every merge pass consumes its
/// input and returns a new list. The text of a merged block is the
/// concatenation of its constituents' text in geometric order, joined with
/// a space for same-line merges and [`LINE_BREAK`] for stacked-line merges,
/// so no text is ever lost by merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The text content. May contain [`LINE_BREAK`] markers after vertical
    /// merges.
    pub text: String,

    /// The bounding rectangle, in canonical corner-pair form.
    #[serde(rename = "bounding_box")]
    pub rect: Rect,

    /// Estimated font size in pixels, derived from rectangle height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,

    /// Estimated spacing between logical lines, in pixels. Only meaningful
    /// for blocks with more than one line; see
    /// [`crate::processors::line_spacing`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<i32>,

    /// Style attributes attached by external enrichment stages.
    #[serde(flatten)]
    pub style: StyleAttributes,
}

impl TextBlock {
    /// Creates a new block with the given text and rectangle.
    ///
    /// Derived attributes start unset; see [`TextBlock::with_font_size`].
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self {
            text: text.into(),
            rect,
            font_size: None,
            line_spacing: None,
            style: StyleAttributes::default(),
        }
    }

    /// Returns a copy of this block with the given font size attached.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Returns true if a font size has been estimated for this block.
    pub fn has_font_size(&self) -> bool {
        self.font_size.is_some()
    }
}
