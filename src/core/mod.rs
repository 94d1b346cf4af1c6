//! Core error handling and configuration.
//!
//! This module provides the error types shared across the crate and the
//! configuration structure that tunes the merge engine and the layout
//! metrics calculator.

pub mod config;
pub mod errors;

pub use config::{ConfigError, MergeConfig};
pub use errors::{LayoutError, LayoutResult};
