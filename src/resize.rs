//! Corner resize: single-axis reshaping of a rectangle by one of its corners.
//!
//! Each frame moves the dragged corner along whichever axis saw the larger
//! pointer movement since the previous frame, so one gesture changes width or
//! height but never both in the same frame. The diagonally opposite corner
//! stays fixed. A frame that would leave either side shorter than the minimum
//! size is rejected outright; the bounds are not clamped.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use serde::Serialize;

use crate::geom::{Corner, Rect, Vector};

/// Axis a resize frame moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The axis with the larger absolute component. Ties go to `X`; a zero
    /// delta has no axis.
    #[must_use]
    pub fn dominant(delta: Vector) -> Option<Self> {
        if delta.x == 0.0 && delta.y == 0.0 {
            None
        } else if delta.x.abs() >= delta.y.abs() {
            Some(Self::X)
        } else {
            Some(Self::Y)
        }
    }

    /// Drop the component along the other axis.
    #[must_use]
    pub fn constrain(self, delta: Vector) -> Vector {
        match self {
            Self::X => Vector::new(delta.x, 0.0),
            Self::Y => Vector::new(0.0, delta.y),
        }
    }
}

/// A resize frame that was not applied.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ResizeError {
    /// The proposed bounds are smaller than the minimum on some side.
    #[error("resize to {width} x {height} is below the minimum size")]
    Degenerate { width: f64, height: f64 },
}

/// Result of an accepted resize frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStep {
    pub bounds: Rect,
    /// Axis the frame moved along; `None` when the pointer did not move.
    pub axis: Option<Axis>,
}

/// Move `corner` of `bounds` by the dominant-axis part of `delta`.
///
/// # Errors
///
/// Returns [`ResizeError::Degenerate`] if the resulting width or height would
/// be below `min_size`. The caller keeps its previous bounds in that case.
pub fn resize_corner(bounds: &Rect, corner: Corner, delta: Vector, min_size: f64) -> Result<ResizeStep, ResizeError> {
    let Some(axis) = Axis::dominant(delta) else {
        return Ok(ResizeStep { bounds: *bounds, axis: None });
    };

    let dragged = bounds.corner(corner) + axis.constrain(delta);
    let fixed = bounds.corner(corner.opposite());

    let (left, right) = if corner.is_left() { (dragged.x, fixed.x) } else { (fixed.x, dragged.x) };
    let (top, bottom) = if corner.is_top() { (dragged.y, fixed.y) } else { (fixed.y, dragged.y) };
    let proposed = Rect::from_edges(left, top, right, bottom);

    if proposed.width < min_size || proposed.height < min_size {
        return Err(ResizeError::Degenerate { width: proposed.width, height: proposed.height });
    }
    Ok(ResizeStep { bounds: proposed, axis: Some(axis) })
}
