#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Camera;
use crate::doc::{Scene, ShapeGroup, ShapeGroupId};
use crate::geom::{Corner, Point, distance};

/// Which part of a shape group was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    CornerHandle(Corner),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub shape_id: ShapeGroupId,
    pub part: HitPart,
}

/// Test one group. Corner handles win over the body; the handle radius is in
/// screen pixels so handles keep a constant on-screen size at every zoom.
#[must_use]
pub fn hit_group(model_pt: Point, group: &ShapeGroup, camera: &Camera, handle_radius_px: f64) -> Option<HitPart> {
    let radius = camera.screen_dist_to_model(handle_radius_px);
    let bounds = group.bounds();
    if let Some(corner) = Corner::ALL
        .into_iter()
        .find(|c| distance(bounds.corner(*c), model_pt) <= radius)
    {
        return Some(HitPart::CornerHandle(corner));
    }
    bounds.contains(model_pt).then_some(HitPart::Body)
}

/// Test which group (if any) is under `model_pt`, topmost first.
///
/// Groups are drawn in insertion order, so the last inserted is on top.
#[must_use]
pub fn hit_test(model_pt: Point, scene: &Scene, camera: &Camera, handle_radius_px: f64) -> Option<Hit> {
    scene.iter().rev().find_map(|group| {
        hit_group(model_pt, group, camera, handle_radius_px).map(|part| Hit { shape_id: group.id, part })
    })
}
