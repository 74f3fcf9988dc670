//! Errors surfaced to callers of the engine.
//!
//! Only command-level failures and unusable configuration are surfaced.
//! Per-frame gesture conditions are absorbed where they occur: a degenerate
//! resize is [`crate::resize::ResizeError`], and the absence of a snap
//! target is simply `None`.

use crate::doc::ShapeGroupId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Width or height was not a positive number. Nothing was created.
    #[error("invalid rectangle dimensions: width {width:?}, height {height:?} (both must be numbers greater than 0)")]
    InvalidDimension { width: String, height: String },
    /// The referenced shape is not in the scene.
    #[error("unknown shape {0}")]
    UnknownShape(ShapeGroupId),
}

/// An [`crate::config::EngineConfig`] value the engine cannot run with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A length, threshold or factor that must be a finite number above zero.
    #[error("config field {field} must be a finite number greater than 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    /// A padding or pixel radius that must be finite and not negative.
    #[error("config field {field} must be a finite number of at least 0, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("min_zoom_factor {min} is greater than max_zoom_factor {max}")]
    ZoomRange { min: f64, max: f64 },
    /// The document is not a config object.
    #[error("invalid config JSON: {0}")]
    Json(String),
}
