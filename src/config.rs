//! Engine configuration.
//!
//! `EngineConfig` is an explicit value handed to the engine at construction and
//! read by every component through it. There is no process-wide state; two
//! engines in the same process may run with different thresholds.
//!
//! Defaults come from [`crate::consts`]. Hosts may overlay `RECTPLAN_*`
//! environment variables with [`EngineConfig::from_env`] or deserialize a JSON
//! document where every field is optional.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    DEFAULT_ALIGNMENT_THRESHOLD, DEFAULT_FLICK_CANCEL_MULTIPLIER, DEFAULT_LABEL_PADDING, DEFAULT_SNAP_THRESHOLD,
    DEFAULT_VISIBLE_WIDTH, DRAG_DEAD_ZONE_PX, HANDLE_RADIUS_PX, MAX_ZOOM_FACTOR, MIN_SHAPE_SIZE, MIN_ZOOM_FACTOR,
};
use crate::error::ConfigError;
use crate::snap::SnapMode;

const ENV_PREFIX: &str = "RECTPLAN_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether drags look for snap candidates at all.
    pub snap_enabled: bool,
    /// Whether measurement labels are shown.
    pub measurements_shown: bool,
    /// Maximum model distance for a snap candidate.
    pub snap_threshold: f64,
    /// Maximum centre-line offset for alignment-only snapping.
    pub alignment_threshold: f64,
    /// Single best candidate, or every candidate under threshold.
    pub snap_mode: SnapMode,
    /// Final-step length, as a multiple of `snap_threshold`, above which a snap
    /// is dropped on release. `None` disables flick cancellation.
    pub flick_cancel_multiplier: Option<f64>,
    /// Gap between an edge midpoint and its label.
    pub label_padding: f64,
    /// Minimum width/height a corner resize may produce.
    pub min_size: f64,
    /// Model width visible across the viewport at 100% zoom.
    pub default_visible_width: f64,
    /// Zoom floor relative to the initial zoom.
    pub min_zoom_factor: f64,
    /// Zoom ceiling relative to the initial zoom.
    pub max_zoom_factor: f64,
    /// Screen pixels a press must travel before it becomes a drag.
    pub drag_dead_zone_px: f64,
    /// Screen-space pick radius of corner handles.
    pub handle_radius_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_enabled: false,
            measurements_shown: true,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            alignment_threshold: DEFAULT_ALIGNMENT_THRESHOLD,
            snap_mode: SnapMode::Best,
            flick_cancel_multiplier: Some(DEFAULT_FLICK_CANCEL_MULTIPLIER),
            label_padding: DEFAULT_LABEL_PADDING,
            min_size: MIN_SHAPE_SIZE,
            default_visible_width: DEFAULT_VISIBLE_WIDTH,
            min_zoom_factor: MIN_ZOOM_FACTOR,
            max_zoom_factor: MAX_ZOOM_FACTOR,
            drag_dead_zone_px: DRAG_DEAD_ZONE_PX,
            handle_radius_px: HANDLE_RADIUS_PX,
        }
    }
}

impl EngineConfig {
    /// Build config from the process environment.
    ///
    /// Optional (all prefixed with `RECTPLAN_`):
    /// - `SNAP_ENABLED`, `MEASUREMENTS_SHOWN`: `true` / `false`
    /// - `SNAP_THRESHOLD`, `ALIGNMENT_THRESHOLD`, `LABEL_PADDING`, `MIN_SIZE`
    /// - `SNAP_MODE`: `best` (default) or `all`
    /// - `FLICK_CANCEL_MULTIPLIER`: a number, or `off`
    /// - `DEFAULT_VISIBLE_WIDTH`, `MIN_ZOOM_FACTOR`, `MAX_ZOOM_FACTOR`
    /// - `DRAG_DEAD_ZONE_PX`, `HANDLE_RADIUS_PX`
    ///
    /// Unparseable values fall back to the default. If the result does not
    /// pass [`EngineConfig::validate`], every override is dropped.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`EngineConfig::from_env`] but reading from an explicit variable list.
    #[must_use]
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .filter_map(|(k, v)| k.strip_prefix(ENV_PREFIX).map(|k| (k.to_owned(), v)))
            .collect();
        let d = Self::default();

        let config = Self {
            snap_enabled: var_parse(&vars, "SNAP_ENABLED", d.snap_enabled),
            measurements_shown: var_parse(&vars, "MEASUREMENTS_SHOWN", d.measurements_shown),
            snap_threshold: var_parse(&vars, "SNAP_THRESHOLD", d.snap_threshold),
            alignment_threshold: var_parse(&vars, "ALIGNMENT_THRESHOLD", d.alignment_threshold),
            snap_mode: vars
                .get("SNAP_MODE")
                .and_then(|v| SnapMode::parse(v))
                .unwrap_or(d.snap_mode),
            flick_cancel_multiplier: match vars.get("FLICK_CANCEL_MULTIPLIER").map(String::as_str) {
                Some("off" | "none") => None,
                Some(raw) => raw.parse::<f64>().map_or(d.flick_cancel_multiplier, Some),
                None => d.flick_cancel_multiplier,
            },
            label_padding: var_parse(&vars, "LABEL_PADDING", d.label_padding),
            min_size: var_parse(&vars, "MIN_SIZE", d.min_size),
            default_visible_width: var_parse(&vars, "DEFAULT_VISIBLE_WIDTH", d.default_visible_width),
            min_zoom_factor: var_parse(&vars, "MIN_ZOOM_FACTOR", d.min_zoom_factor),
            max_zoom_factor: var_parse(&vars, "MAX_ZOOM_FACTOR", d.max_zoom_factor),
            drag_dead_zone_px: var_parse(&vars, "DRAG_DEAD_ZONE_PX", d.drag_dead_zone_px),
            handle_radius_px: var_parse(&vars, "HANDLE_RADIUS_PX", d.handle_radius_px),
        };
        match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(%err, "ignoring RECTPLAN_* overrides");
                d
            }
        }
    }

    /// Check that every numeric field is usable.
    ///
    /// # Errors
    ///
    /// Thresholds, sizes and zoom factors must be finite and above zero, and
    /// the zoom floor may not exceed the ceiling. Padding, dead-zone and handle
    /// radius must be finite and not negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("snap_threshold", self.snap_threshold),
            ("alignment_threshold", self.alignment_threshold),
            ("min_size", self.min_size),
            ("default_visible_width", self.default_visible_width),
            ("min_zoom_factor", self.min_zoom_factor),
            ("max_zoom_factor", self.max_zoom_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if let Some(value) = self.flick_cancel_multiplier
            && !(value.is_finite() && value > 0.0)
        {
            return Err(ConfigError::NotPositive { field: "flick_cancel_multiplier", value });
        }
        let non_negative = [
            ("label_padding", self.label_padding),
            ("drag_dead_zone_px", self.drag_dead_zone_px),
            ("handle_radius_px", self.handle_radius_px),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.min_zoom_factor > self.max_zoom_factor {
            return Err(ConfigError::ZoomRange { min: self.min_zoom_factor, max: self.max_zoom_factor });
        }
        Ok(())
    }

    /// Parse a JSON config document and validate it. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON, or the first
    /// [`EngineConfig::validate`] failure.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Final-step length above which an active snap is dropped, if enabled.
    #[must_use]
    pub fn flick_cancel_distance(&self) -> Option<f64> {
        self.flick_cancel_multiplier.map(|m| m * self.snap_threshold)
    }
}

fn var_parse<T>(vars: &HashMap<String, String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    vars.get(key)
        .map_or(default, |v| v.trim().parse::<T>().unwrap_or(default))
}
