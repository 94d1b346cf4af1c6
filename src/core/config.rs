//! Configuration for the merge engine and layout metrics.
//!
//! This module provides the tunable parameters of the relayout engine. The
//! proximity threshold controls how far apart two regions may sit and still
//! be considered one logical block, and is expected to be tuned per image
//! resolution rather than hardcoded at call sites.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default proximity threshold in pixels.
pub const DEFAULT_THRESHOLD: f32 = 10.0;

/// Default coefficient applied to box height when estimating font size.
///
/// Reference pipelines used coefficients between 0.75 and 0.95 depending on
/// the renderer consuming the estimate; there is no single correct value,
/// so it is configuration rather than a constant.
pub const DEFAULT_FONT_SIZE_COEFFICIENT: f32 = 0.75;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that the proximity threshold is invalid.
    #[error("threshold must be finite and non-negative, got {threshold}")]
    InvalidThreshold {
        /// The rejected threshold value.
        threshold: f32,
    },

    /// Error indicating that the font size coefficient is invalid.
    #[error("font size coefficient must be finite and in (0, 2], got {coefficient}")]
    InvalidFontSizeCoefficient {
        /// The rejected coefficient value.
        coefficient: f32,
    },
}

/// Configuration for merging text blocks and deriving layout metrics.
///
/// # Examples
///
/// ```rust
/// use text_relayout::core::MergeConfig;
///
/// let config = MergeConfig::default();
/// assert_eq!(config.threshold, 10.0);
///
/// let tuned = MergeConfig::new(16.0, 0.8);
/// assert!(tuned.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Maximum pixel gap under which two regions are considered adjacent.
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Coefficient applied to rectangle height to estimate font size.
    #[serde(default = "default_font_size_coefficient")]
    pub font_size_coefficient: f32,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_font_size_coefficient() -> f32 {
    DEFAULT_FONT_SIZE_COEFFICIENT
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            font_size_coefficient: DEFAULT_FONT_SIZE_COEFFICIENT,
        }
    }
}

impl MergeConfig {
    /// Creates a new configuration with the given threshold and coefficient.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Maximum pixel gap for adjacency, in pixels.
    /// * `font_size_coefficient` - Height-to-font-size coefficient.
    ///
    /// # Returns
    ///
    /// A new `MergeConfig` instance. Call [`MergeConfig::validate`] to check
    /// the values before use.
    pub fn new(threshold: f32, font_size_coefficient: f32) -> Self {
        Self {
            threshold,
            font_size_coefficient,
        }
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        if !self.font_size_coefficient.is_finite()
            || self.font_size_coefficient <= 0.0
            || self.font_size_coefficient > 2.0
        {
            return Err(ConfigError::InvalidFontSizeCoefficient {
                coefficient: self.font_size_coefficient,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MergeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = MergeConfig::new(-5.0, 0.75);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = MergeConfig::new(f32::NAN, 0.75);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_coefficient_rejected() {
        let config = MergeConfig::new(10.0, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFontSizeCoefficient { .. })
        ));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: MergeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MergeConfig::default());
    }
}
