//! Input model: the normalized event stream and the gesture state machine.
//!
//! Hosts translate raw DOM/touch events into [`InputEvent`]s. The engine keeps
//! at most one gesture in [`InputState`] at a time. A shape gesture carries a
//! [`DragSession`] from press to release; the session holds everything needed
//! to compute per-frame deltas, to surface snap guides, and to commit or revert
//! on release.
//!
//! ```text
//! Idle ──press on shape──▶ Armed ──move past dead-zone──▶ Dragging ──release──▶ Idle
//!   │                        │                               │
//!   │                        └──────── release ──────────────┤ (snap deferred)
//!   ├──press in pan mode──▶ Panning                          ▼
//!   └──pinch update───────▶ Pinching                   AwaitingConfirm
//! ```

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::ShapeGroupId;
use crate::geom::{Corner, Point, Rect};
use crate::resize::Axis;
use crate::snap::SnapCandidate;

/// One normalized input event, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Primary pointer pressed. `target` is set when the host already knows
    /// which shape is under the pointer.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<ShapeGroupId>,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Two-finger gesture update. `scale` is relative to the previous update.
    PinchUpdate { x: f64, y: f64, scale: f64 },
    PinchEnd,
    ViewportResized { width: f64, height: f64 },
    /// The host cancelled the current gesture (e.g. pointercancel).
    Cancel,
}

/// What a shape gesture acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSubject {
    /// Translate the whole shape group.
    Shape(ShapeGroupId),
    /// Resize the shape by one corner handle.
    Corner { id: ShapeGroupId, corner: Corner },
}

impl DragSubject {
    /// Id of the shape group the gesture acts on.
    #[must_use]
    pub fn id(&self) -> ShapeGroupId {
        match *self {
            Self::Shape(id) | Self::Corner { id, .. } => id,
        }
    }
}

/// Transient state for one press → move* → release gesture on a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub subject: DragSubject,
    /// Bounds at press time; restored if the gesture is cancelled.
    pub original_bounds: Rect,
    /// Screen position of the press, for the dead-zone test.
    pub press_screen: Point,
    /// Screen position of the previous event, used to compute deltas.
    pub last_screen: Point,
    /// Candidate that will be offered on release.
    pub active_snap: Option<SnapCandidate>,
    /// Every candidate surfaced by the last move; drawn as guide lines.
    pub candidates: Vec<SnapCandidate>,
    /// Model distance covered by the most recent move step.
    pub last_step: f64,
    /// Axis of the most recent accepted resize frame. A change of axis
    /// swaps the resize cursor.
    pub axis: Option<Axis>,
}

impl DragSession {
    #[must_use]
    pub fn new(subject: DragSubject, original_bounds: Rect, press_screen: Point) -> Self {
        Self {
            subject,
            original_bounds,
            press_screen,
            last_screen: press_screen,
            active_snap: None,
            candidates: Vec::new(),
            last_step: 0.0,
            axis: None,
        }
    }

    /// Drop any surfaced snap candidates.
    pub fn clear_snap(&mut self) {
        self.active_snap = None;
        self.candidates.clear();
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Presses pan the view instead of grabbing shapes.
    pub pan_mode: bool,
    /// The shape most recently pressed, if any.
    pub selected_id: Option<ShapeGroupId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next press.
    #[default]
    Idle,
    /// Pressed on a shape but still inside the dead-zone.
    Armed(DragSession),
    /// Moving or resizing a shape.
    Dragging(DragSession),
    /// Panning the view in pan mode.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Two-finger pinch zoom in progress.
    Pinching {
        /// Screen-space pinch anchor at the previous update.
        last_anchor: Point,
    },
    /// Released with a snap pending an asynchronous confirmation. Pointer
    /// moves are dropped in this state.
    AwaitingConfirm(DragSession),
}

impl InputState {
    /// The shape gesture session, if one is open.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Armed(s) | Self::Dragging(s) | Self::AwaitingConfirm(s) => Some(s),
            Self::Idle | Self::Panning { .. } | Self::Pinching { .. } => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
