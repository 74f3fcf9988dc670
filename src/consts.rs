//! Shared numeric constants for the layout engine.

// ── Snapping ────────────────────────────────────────────────────

/// Default snap threshold in model units (mm).
pub const DEFAULT_SNAP_THRESHOLD: f64 = 20.0;

/// Default centre-line alignment threshold in model units (mm).
pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 5.0;

/// A final move step longer than this multiple of the snap threshold cancels the snap.
pub const DEFAULT_FLICK_CANCEL_MULTIPLIER: f64 = 3.0;

// ── Shapes and labels ───────────────────────────────────────────

/// Smallest width or height a corner resize may produce, in model units.
pub const MIN_SHAPE_SIZE: f64 = 1.0;

/// Gap between a rectangle edge midpoint and its measurement label, in model units.
pub const DEFAULT_LABEL_PADDING: f64 = 10.0;

/// Measurement label font size in screen pixels.
pub const LABEL_FONT_SIZE_PX: f64 = 14.0;

// ── View ────────────────────────────────────────────────────────

/// Model width visible across the viewport at 100% zoom.
pub const DEFAULT_VISIBLE_WIDTH: f64 = 1000.0;

/// Lower zoom bound relative to the initial zoom.
pub const MIN_ZOOM_FACTOR: f64 = 0.1;

/// Upper zoom bound relative to the initial zoom.
pub const MAX_ZOOM_FACTOR: f64 = 10.0;

/// Padding around content for fit-to-content, in model units.
pub const DEFAULT_FIT_PADDING: f64 = 20.0;

// ── Hit-testing and gestures ────────────────────────────────────

/// Screen-space hit slop in pixels for corner handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Pointer travel in screen pixels before a press becomes a drag.
pub const DRAG_DEAD_ZONE_PX: f64 = 2.0;
