//! Layout metrics derived from merged block geometry.
//!
//! Everything in this module is a heuristic estimate: there is no ground
//! truth for the font size or line spacing of text detected in a raster
//! image. The estimates are derived purely from rectangle geometry and are
//! good enough to seed the CSS a downstream layout generator emits.

use crate::core::{LayoutError, LayoutResult, MergeConfig};
use crate::domain::{TextBlock, LINE_BREAK};

/// Estimates a font size in pixels from a rectangle height.
///
/// The estimate is `height * coefficient`, truncated. The coefficient
/// accounts for ascender/descender padding the detector includes in the
/// box; see [`MergeConfig::font_size_coefficient`] for the default and why
/// it is configurable.
///
/// # Arguments
///
/// * `height` - Height of the block rectangle in pixels.
/// * `coefficient` - Height-to-font-size coefficient.
///
/// # Returns
///
/// The estimated font size in pixels, or `InvalidInput` for a negative or
/// non-finite height.
pub fn estimate_font_size(height: f32, coefficient: f32) -> LayoutResult<u32> {
    if !height.is_finite() || height < 0.0 {
        return Err(LayoutError::invalid_input(format!(
            "height must be finite and non-negative, got {height}"
        )));
    }
    Ok((height * coefficient) as u32)
}

/// Counts the logical lines in a block's text.
///
/// A line is delimited by the [`LINE_BREAK`] marker inserted by vertical
/// merges; text with no marker is one line.
pub fn line_count(text: &str) -> usize {
    text.chars().filter(|&c| c == LINE_BREAK).count() + 1
}

/// Estimates the spacing between logical lines of a merged block.
///
/// For a block of `n > 1` lines the estimate is
/// `rect_height / n - font_size`, truncated toward zero; the quotient is
/// the vertical budget per line and the font size is what the glyphs
/// themselves consume. Single-line blocks have no meaningful spacing and
/// yield 0.
///
/// # Arguments
///
/// * `block` - A block whose `font_size` has already been estimated.
///
/// # Returns
///
/// The estimated spacing in pixels (may be negative when lines overlap the
/// estimated glyph height), or `InvalidState` if the block has no font
/// size yet; the caller recovers by attaching one first (see
/// [`attach_metrics`]).
pub fn line_spacing(block: &TextBlock) -> LayoutResult<i32> {
    let lines = line_count(&block.text);
    if lines <= 1 {
        return Ok(0);
    }

    let font_size = block.font_size.ok_or_else(|| {
        LayoutError::invalid_state(
            "line spacing requires an estimated font size; attach one before requesting spacing",
        )
    })?;

    let avg_line_height = block.rect.height() / lines as f32;
    Ok((avg_line_height - font_size as f32) as i32)
}

/// Attaches the derived metrics to a block: estimates the font size from
/// the rectangle height when unset, then computes the line spacing.
///
/// # Arguments
///
/// * `block` - The block to enrich.
/// * `config` - Supplies the font size coefficient.
///
/// # Returns
///
/// A copy of the block with `font_size` and `line_spacing` populated.
pub fn attach_metrics(block: &TextBlock, config: &MergeConfig) -> LayoutResult<TextBlock> {
    config.validate()?;

    let mut block = block.clone();
    if block.font_size.is_none() {
        block.font_size = Some(estimate_font_size(
            block.rect.height(),
            config.font_size_coefficient,
        )?);
    }
    block.line_spacing = Some(line_spacing(&block)?);
    Ok(block)
}
