#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const PADDING: f64 = 10.0;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn group_at(x: f64, y: f64, w: f64, h: f64) -> ShapeGroup {
    ShapeGroup::new(Rect::new(pt(x, y), w, h), PADDING, true)
}

// =============================================================
// Labels
// =============================================================

#[test]
fn label_text_rounds_to_whole_millimetres() {
    assert_eq!(label_text(100.0), "100 mm");
    assert_eq!(label_text(49.6), "50 mm");
    assert_eq!(label_text(12.4), "12 mm");
}

#[test]
fn label_side_justification() {
    assert_eq!(LabelSide::Top.justification(), Justification::Center);
    assert_eq!(LabelSide::Bottom.justification(), Justification::Center);
    assert_eq!(LabelSide::Right.justification(), Justification::Left);
    assert_eq!(LabelSide::Left.justification(), Justification::Right);
}

#[test]
fn new_group_has_labels_outside_edge_midpoints() {
    let g = group_at(0.0, 0.0, 100.0, 50.0);
    assert_eq!(g.label(LabelSide::Top).position, pt(50.0, -10.0));
    assert_eq!(g.label(LabelSide::Right).position, pt(110.0, 25.0));
    assert_eq!(g.label(LabelSide::Bottom).position, pt(50.0, 60.0));
    assert_eq!(g.label(LabelSide::Left).position, pt(-10.0, 25.0));
}

#[test]
fn each_label_is_padding_away_from_its_edge_midpoint() {
    let g = group_at(-12.0, 30.0, 64.0, 18.0);
    for label in g.labels() {
        let mid = g.bounds().edge(label.side.edge()).midpoint();
        assert!((crate::geom::distance(label.position, mid) - PADDING).abs() < 1e-9, "{:?}", label.side);
        assert!(!g.bounds().contains(label.position));
    }
}

#[test]
fn new_group_label_text_shows_width_and_height() {
    let g = group_at(0.0, 0.0, 100.0, 50.0);
    assert_eq!(g.label(LabelSide::Top).text, "100 mm");
    assert_eq!(g.label(LabelSide::Bottom).text, "100 mm");
    assert_eq!(g.label(LabelSide::Left).text, "50 mm");
    assert_eq!(g.label(LabelSide::Right).text, "50 mm");
}

#[test]
fn label_lookup_matches_side() {
    let g = group_at(0.0, 0.0, 10.0, 10.0);
    for side in LabelSide::ALL {
        assert_eq!(g.label(side).side, side);
    }
}

#[test]
fn reflow_is_idempotent() {
    let mut g = group_at(3.3, -7.1, 123.45, 67.89);
    g.reflow_labels(PADDING);
    let once = g.labels().clone();
    g.reflow_labels(PADDING);
    assert_eq!(g.labels(), &once);
    for (a, b) in g.labels().iter().zip(once.iter()) {
        assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
        assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
    }
}

#[test]
fn translate_moves_labels_with_rectangle() {
    let mut g = group_at(0.0, 0.0, 100.0, 50.0);
    let before = g.labels().clone();
    g.translate(pt(-40.0, 5.0), PADDING);
    assert_eq!(g.bounds().top_left, pt(-40.0, 5.0));
    for (a, b) in g.labels().iter().zip(before.iter()) {
        assert_eq!(a.position, b.position + pt(-40.0, 5.0));
        assert_eq!(a.text, b.text);
    }
}

#[test]
fn set_bounds_regenerates_text() {
    let mut g = group_at(0.0, 0.0, 100.0, 50.0);
    g.set_bounds(Rect::new(pt(0.0, 0.0), 80.0, 50.0), PADDING);
    assert_eq!(g.label(LabelSide::Top).text, "80 mm");
    assert_eq!(g.label(LabelSide::Right).position, pt(90.0, 25.0));
}

#[test]
fn visibility_toggle_applies_to_all_labels() {
    let mut g = group_at(0.0, 0.0, 10.0, 10.0);
    g.set_labels_visible(false);
    assert!(g.labels().iter().all(|l| !l.visible));
    g.set_labels_visible(true);
    assert!(g.labels().iter().all(|l| l.visible));
}

#[test]
fn hidden_group_stays_hidden_after_reflow() {
    let mut g = ShapeGroup::new(Rect::new(pt(0.0, 0.0), 10.0, 10.0), PADDING, false);
    g.translate(pt(1.0, 1.0), PADDING);
    assert!(g.labels().iter().all(|l| !l.visible));
}

// =============================================================
// Scene
// =============================================================

#[test]
fn scene_new_is_empty() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
    assert!(scene.content_bounds().is_none());
}

#[test]
fn scene_insert_and_get() {
    let mut scene = Scene::new();
    let g = group_at(0.0, 0.0, 10.0, 10.0);
    let id = g.id;
    scene.insert(g);
    assert_eq!(scene.len(), 1);
    assert!(scene.contains(&id));
    assert_eq!(scene.get(&id).unwrap().bounds().width, 10.0);
}

#[test]
fn scene_insert_same_id_replaces_in_place() {
    let mut scene = Scene::new();
    let a = group_at(0.0, 0.0, 10.0, 10.0);
    let b = group_at(50.0, 0.0, 10.0, 10.0);
    let a_id = a.id;
    scene.insert(a);
    scene.insert(b);
    scene.insert(ShapeGroup::with_id(a_id, Rect::new(pt(5.0, 5.0), 20.0, 20.0), PADDING, true));
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.ids()[0], a_id);
    assert_eq!(scene.get(&a_id).unwrap().bounds().width, 20.0);
}

#[test]
fn scene_preserves_insertion_order() {
    let mut scene = Scene::new();
    let groups: Vec<ShapeGroup> = (0..4).map(|i| group_at(f64::from(i) * 20.0, 0.0, 10.0, 10.0)).collect();
    let expected: Vec<ShapeGroupId> = groups.iter().map(|g| g.id).collect();
    for g in groups {
        scene.insert(g);
    }
    assert_eq!(scene.ids(), expected);
}

#[test]
fn scene_remove_returns_group() {
    let mut scene = Scene::new();
    let g = group_at(0.0, 0.0, 10.0, 10.0);
    let id = g.id;
    scene.insert(g);
    assert_eq!(scene.remove(&id).map(|g| g.id), Some(id));
    assert!(scene.remove(&id).is_none());
    assert!(scene.is_empty());
}

#[test]
fn scene_removal_while_iterating_ids_snapshot() {
    let mut scene = Scene::new();
    for i in 0..5 {
        scene.insert(group_at(f64::from(i) * 20.0, 0.0, 10.0, 10.0));
    }
    for id in scene.ids() {
        scene.remove(&id);
    }
    assert!(scene.is_empty());
}

#[test]
fn scene_retain_and_clear() {
    let mut scene = Scene::new();
    for i in 0..4 {
        scene.insert(group_at(f64::from(i) * 20.0, 0.0, 10.0, 10.0));
    }
    scene.retain(|g| g.bounds().left() >= 40.0);
    assert_eq!(scene.len(), 2);
    scene.clear();
    assert!(scene.is_empty());
}

#[test]
fn snap_targets_exclude_self() {
    let mut scene = Scene::new();
    let a = group_at(0.0, 0.0, 10.0, 10.0);
    let b = group_at(20.0, 0.0, 10.0, 10.0);
    let c = group_at(40.0, 0.0, 10.0, 10.0);
    let (a_id, b_id, c_id) = (a.id, b.id, c.id);
    scene.insert(a);
    scene.insert(b);
    scene.insert(c);
    let targets = scene.snap_targets(&b_id);
    assert_eq!(targets.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a_id, c_id]);
}

#[test]
fn content_bounds_covers_all_groups() {
    let mut scene = Scene::new();
    scene.insert(group_at(-10.0, 5.0, 10.0, 10.0));
    scene.insert(group_at(40.0, -20.0, 5.0, 5.0));
    assert_eq!(scene.content_bounds(), Some(Rect::from_edges(-10.0, -20.0, 45.0, 15.0)));
}

#[test]
fn scene_labels_visibility() {
    let mut scene = Scene::new();
    scene.insert(group_at(0.0, 0.0, 10.0, 10.0));
    scene.insert(group_at(20.0, 0.0, 10.0, 10.0));
    scene.set_labels_visible(false);
    assert!(scene.iter().all(|g| g.labels().iter().all(|l| !l.visible)));
}
