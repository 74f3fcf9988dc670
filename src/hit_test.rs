use super::*;
use crate::camera::Size;
use crate::config::EngineConfig;
use crate::geom::Rect;

const RADIUS_PX: f64 = 8.0;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// 800x600 viewport showing 800 model units: zoom 1, centred on the origin.
fn unit_camera() -> Camera {
    let config = EngineConfig { default_visible_width: 800.0, ..EngineConfig::default() };
    Camera::new(Size::new(800.0, 600.0), &config)
}

fn group_at(x: f64, y: f64, w: f64, h: f64) -> ShapeGroup {
    ShapeGroup::new(Rect::new(pt(x, y), w, h), 10.0, true)
}

// =============================================================
// hit_group
// =============================================================

#[test]
fn hit_group_inside_body() {
    let g = group_at(0.0, 0.0, 100.0, 50.0);
    assert_eq!(hit_group(pt(50.0, 25.0), &g, &unit_camera(), RADIUS_PX), Some(HitPart::Body));
}

#[test]
fn hit_group_outside_misses() {
    let g = group_at(0.0, 0.0, 100.0, 50.0);
    assert_eq!(hit_group(pt(150.0, 25.0), &g, &unit_camera(), RADIUS_PX), None);
}

#[test]
fn hit_group_near_corner_is_handle() {
    let g = group_at(0.0, 0.0, 100.0, 50.0);
    let cam = unit_camera();
    assert_eq!(hit_group(pt(103.0, 52.0), &g, &cam, RADIUS_PX), Some(HitPart::CornerHandle(Corner::BottomRight)));
    assert_eq!(hit_group(pt(-2.0, -2.0), &g, &cam, RADIUS_PX), Some(HitPart::CornerHandle(Corner::TopLeft)));
    assert_eq!(hit_group(pt(99.0, 1.0), &g, &cam, RADIUS_PX), Some(HitPart::CornerHandle(Corner::TopRight)));
    assert_eq!(hit_group(pt(1.0, 49.0), &g, &cam, RADIUS_PX), Some(HitPart::CornerHandle(Corner::BottomLeft)));
}

#[test]
fn handle_radius_scales_with_zoom() {
    let g = group_at(0.0, 0.0, 100.0, 50.0);
    let mut cam = unit_camera();
    // 12 model units from the corner: outside 8px at zoom 1.
    let probe = pt(112.0, 50.0);
    assert_eq!(hit_group(probe, &g, &cam, RADIUS_PX), None);
    // At zoom 0.5 the radius covers 16 model units.
    cam.zoom = 0.5;
    assert_eq!(hit_group(probe, &g, &cam, RADIUS_PX), Some(HitPart::CornerHandle(Corner::BottomRight)));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_test_empty_scene() {
    assert!(hit_test(pt(0.0, 0.0), &Scene::new(), &unit_camera(), RADIUS_PX).is_none());
}

#[test]
fn hit_test_topmost_wins() {
    let mut scene = Scene::new();
    let below = group_at(0.0, 0.0, 100.0, 100.0);
    let above = group_at(50.0, 50.0, 100.0, 100.0);
    let above_id = above.id;
    scene.insert(below);
    scene.insert(above);
    let hit = hit_test(pt(75.0, 75.0), &scene, &unit_camera(), RADIUS_PX).unwrap();
    assert_eq!(hit, Hit { shape_id: above_id, part: HitPart::Body });
}

#[test]
fn hit_test_reports_handle_with_id() {
    let mut scene = Scene::new();
    let g = group_at(0.0, 0.0, 100.0, 50.0);
    let id = g.id;
    scene.insert(g);
    let hit = hit_test(pt(100.0, 0.0), &scene, &unit_camera(), RADIUS_PX).unwrap();
    assert_eq!(hit.shape_id, id);
    assert_eq!(hit.part, HitPart::CornerHandle(Corner::TopRight));
}

#[test]
fn hit_test_falls_through_to_lower_group() {
    let mut scene = Scene::new();
    let below = group_at(0.0, 0.0, 100.0, 100.0);
    let below_id = below.id;
    scene.insert(below);
    scene.insert(group_at(300.0, 300.0, 10.0, 10.0));
    let hit = hit_test(pt(40.0, 40.0), &scene, &unit_camera(), RADIUS_PX).unwrap();
    assert_eq!(hit.shape_id, below_id);
}
