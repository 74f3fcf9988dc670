//! View transform between screen pixels and model millimetres.
//!
//! The camera is described by a zoom factor and the model point shown at the
//! viewport centre:
//!
//! ```text
//! screen = (model - center) * zoom + viewport / 2
//! ```
//!
//! `initial_zoom` is fixed at construction from the viewport width and the
//! configured visible model width. It is the 100% reference for zoom
//! percentages and for the zoom clamp.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::geom::{Point, Rect, Vector};

/// Viewport dimensions in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    fn half(self) -> Vector {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Camera state for pan/zoom over model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Screen pixels per model unit.
    pub zoom: f64,
    /// Model point under the viewport centre.
    pub center: Point,
    /// Zoom at startup; the 100% reference.
    pub initial_zoom: f64,
    /// Viewport size in screen pixels.
    pub viewport: Size,
    min_factor: f64,
    max_factor: f64,
}

impl Camera {
    /// Camera centred on the model origin at the initial fit-to-width zoom.
    ///
    /// A non-positive viewport width or visible width falls back to zoom 1.
    #[must_use]
    pub fn new(viewport: Size, config: &EngineConfig) -> Self {
        let initial_zoom = if viewport.width > 0.0 && config.default_visible_width > 0.0 {
            viewport.width / config.default_visible_width
        } else {
            1.0
        };
        Self {
            zoom: initial_zoom,
            center: Point::default(),
            initial_zoom,
            viewport,
            min_factor: config.min_zoom_factor,
            max_factor: config.max_zoom_factor,
        }
    }

    /// Convert a screen-space point (pixels) to model coordinates.
    #[must_use]
    pub fn screen_to_model(&self, screen: Point) -> Point {
        (screen - self.viewport.half()) * (1.0 / self.zoom) + self.center
    }

    /// Convert a model-space point to screen coordinates (pixels).
    #[must_use]
    pub fn model_to_screen(&self, model: Point) -> Point {
        (model - self.center) * self.zoom + self.viewport.half()
    }

    /// Convert a screen-space distance (pixels) to a model distance.
    #[must_use]
    pub fn screen_dist_to_model(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Convert a screen-space displacement to a model displacement.
    #[must_use]
    pub fn screen_delta_to_model(&self, delta: Vector) -> Vector {
        delta * (1.0 / self.zoom)
    }

    /// Smallest allowed zoom.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_factor * self.initial_zoom
    }

    /// Largest allowed zoom.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_factor * self.initial_zoom
    }

    /// Current zoom relative to the initial zoom, in percent.
    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        self.zoom / self.initial_zoom * 100.0
    }

    /// Move the view so content follows a pointer that moved by `screen_delta`.
    ///
    /// The centre shifts by `screen_delta / zoom` model units, so panning is
    /// 1:1 in screen pixels at any zoom.
    pub fn pan(&mut self, screen_delta: Vector) {
        self.center = self.center - self.screen_delta_to_model(screen_delta);
    }

    /// Change zoom while keeping the model point under `screen_anchor` fixed on screen.
    ///
    /// `new_zoom` is clamped to `[min_zoom, max_zoom]`.
    pub fn zoom_at(&mut self, screen_anchor: Point, new_zoom: f64) {
        let anchor_model = self.screen_to_model(screen_anchor);
        self.zoom = self.clamp_zoom(new_zoom);
        self.center = anchor_model - (screen_anchor - self.viewport.half()) * (1.0 / self.zoom);
    }

    /// Fit `content` expanded by `padding` into `viewport` and centre on it.
    ///
    /// The resulting zoom is the largest that fits, subject to the zoom clamp.
    pub fn fit_to_content(&mut self, content: Rect, viewport: Size, padding: f64) {
        self.viewport = viewport;
        let padded = content.expand(padding);
        if padded.width > 0.0 && padded.height > 0.0 && viewport.width > 0.0 && viewport.height > 0.0 {
            let fit = (viewport.width / padded.width).min(viewport.height / padded.height);
            self.zoom = self.clamp_zoom(fit);
        }
        self.center = content.center();
    }

    /// Track a resized viewport. Centre and zoom are kept.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Limits from an unvalidated config that cannot form a range leave
    /// `zoom` unclamped.
    fn clamp_zoom(&self, zoom: f64) -> f64 {
        let (min, max) = (self.min_zoom(), self.max_zoom());
        if min <= max { zoom.clamp(min, max) } else { zoom }
    }
}
