//! Error types for the text relayout engine.
//!
//! This module defines the errors that can occur while normalizing detected
//! regions, merging them, or deriving layout metrics. All core operations
//! are total otherwise: an empty input is a valid input, and no operation
//! retries or performs I/O.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Enum representing the errors surfaced by the relayout engine.
///
/// `InvalidInput` covers malformed data handed in by the caller (for
/// example a rectangle with negative extent); the caller should drop or
/// re-detect the offending region rather than abort the whole merge.
/// `InvalidState` covers operations invoked before a required upstream
/// attribute was attached (for example requesting line spacing before a
/// font size is set); the caller recovers by running the missing step.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Error indicating malformed input data.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating an operation ran before a required attribute was set.
    #[error("invalid state: {message}")]
    InvalidState {
        /// A message describing the missing prerequisite.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },
}

impl LayoutError {
    /// Creates a LayoutError for invalid input.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the invalid input.
    ///
    /// # Returns
    ///
    /// A LayoutError instance.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a LayoutError for an invalid state.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the missing prerequisite.
    ///
    /// # Returns
    ///
    /// A LayoutError instance.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Creates a LayoutError for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Implementation of From<crate::core::config::ConfigError> for LayoutError.
///
/// This allows configuration validation failures to be propagated through
/// operations that return LayoutResult.
impl From<crate::core::config::ConfigError> for LayoutError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::Config {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = LayoutError::invalid_input("negative width");
        assert_eq!(err.to_string(), "invalid input: negative width");
    }

    #[test]
    fn test_invalid_state_message() {
        let err = LayoutError::invalid_state("font size not set");
        assert_eq!(err.to_string(), "invalid state: font size not set");
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = crate::core::config::ConfigError::InvalidThreshold {
            threshold: -1.0,
        };
        let err: LayoutError = config_err.into();
        assert!(matches!(err, LayoutError::Config { .. }));
    }
}
