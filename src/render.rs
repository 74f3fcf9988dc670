//! Render output: a flat, screen-space description of what to draw.
//!
//! The engine never draws. [`scene_nodes`] turns the current scene, camera and
//! gesture into a list of [`SceneNode`]s in paint order, and the host walks the
//! list with whatever drawing API it has. Everything is already projected to
//! screen pixels, so hosts need no knowledge of the camera.
//!
//! Paint order is: each group's rectangle followed by its visible labels, in
//! scene order; then corner handles of the selected group; then snap guides.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::LABEL_FONT_SIZE_PX;
use crate::doc::{Justification, ShapeGroup, ShapeGroupId};
use crate::engine::EngineCore;
use crate::geom::Point;
use crate::snap::{SnapCandidate, SnapKind};

const RECT_FILL: &str = "rgba(0, 128, 255, 0.3)";
const RECT_STROKE: &str = "black";
const SELECTED_STROKE: &str = "#1565c0";
const RECT_STROKE_WIDTH: f64 = 2.0;
const LABEL_COLOR: &str = "black";
const LABEL_BACKGROUND: &str = "rgba(255, 255, 255, 0.85)";

/// One drawable primitive, in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    Rectangle {
        id: ShapeGroupId,
        top_left: Point,
        width: f64,
        height: f64,
        fill: &'static str,
        stroke: &'static str,
        stroke_width: f64,
    },
    Label {
        text: String,
        position: Point,
        justification: Justification,
        font_size: f64,
        color: &'static str,
        /// Fill behind the text so labels stay legible over other shapes.
        background: &'static str,
    },
    /// Corner handle of the selected rectangle, drawn at the pick radius.
    Handle { center: Point, radius: f64 },
    /// Snap guide from the dragged shape's anchor to the target feature.
    GuideLine { from: Point, to: Point, kind: SnapKind },
}

/// Build the paint list for the current engine state.
#[must_use]
pub fn scene_nodes(core: &EngineCore) -> Vec<SceneNode> {
    let mut nodes = Vec::new();
    let selected = core.selection();

    for group in core.scene.iter() {
        push_group(core, group, selected == Some(group.id), &mut nodes);
    }

    if let Some(group) = selected.and_then(|id| core.shape(&id)) {
        nodes.extend(group.bounds().corners().into_iter().map(|corner| SceneNode::Handle {
            center: core.camera.model_to_screen(corner),
            radius: core.config.handle_radius_px,
        }));
    }

    nodes.extend(core.snap_candidates().iter().map(|c| guide(core, c)));
    nodes
}

fn push_group(core: &EngineCore, group: &ShapeGroup, selected: bool, nodes: &mut Vec<SceneNode>) {
    let bounds = group.bounds();
    let zoom = core.camera.zoom;
    nodes.push(SceneNode::Rectangle {
        id: group.id,
        top_left: core.camera.model_to_screen(bounds.top_left),
        width: bounds.width * zoom,
        height: bounds.height * zoom,
        fill: RECT_FILL,
        stroke: if selected { SELECTED_STROKE } else { RECT_STROKE },
        stroke_width: RECT_STROKE_WIDTH,
    });
    for label in group.labels().iter().filter(|l| l.visible) {
        nodes.push(SceneNode::Label {
            text: label.text.clone(),
            position: core.camera.model_to_screen(label.position),
            justification: label.side.justification(),
            font_size: LABEL_FONT_SIZE_PX,
            color: LABEL_COLOR,
            background: LABEL_BACKGROUND,
        });
    }
}

fn guide(core: &EngineCore, candidate: &SnapCandidate) -> SceneNode {
    SceneNode::GuideLine {
        from: core.camera.model_to_screen(candidate.anchor_point),
        to: core.camera.model_to_screen(candidate.target_point),
        kind: candidate.kind,
    }
}
