#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Point arithmetic
// =============================================================

#[test]
fn point_new_and_default() {
    let p = pt(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
    assert_eq!(Point::default(), pt(0.0, 0.0));
}

#[test]
fn add_subtract_scale() {
    assert_eq!(add(pt(1.0, 2.0), pt(3.0, 4.0)), pt(4.0, 6.0));
    assert_eq!(subtract(pt(1.0, 2.0), pt(3.0, 5.0)), pt(-2.0, -3.0));
    assert_eq!(scale(pt(1.5, -2.0), 2.0), pt(3.0, -4.0));
}

#[test]
fn operators_match_free_functions() {
    let a = pt(7.0, -1.0);
    let b = pt(2.5, 4.0);
    assert_eq!(a + b, add(a, b));
    assert_eq!(a - b, subtract(a, b));
    assert_eq!(a * 3.0, scale(a, 3.0));
}

#[test]
fn dot_product() {
    assert_eq!(dot(pt(1.0, 0.0), pt(0.0, 1.0)), 0.0);
    assert_eq!(dot(pt(2.0, 3.0), pt(4.0, 5.0)), 23.0);
}

#[test]
fn distance_is_euclidean() {
    assert!(approx_eq(distance(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0));
    assert!(approx_eq(distance(pt(-1.0, -1.0), pt(-1.0, -1.0)), 0.0));
}

// =============================================================
// nearest_point_on_segment
// =============================================================

#[test]
fn nearest_point_projects_inside_segment() {
    let p = nearest_point_on_segment(pt(5.0, 10.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!(point_approx_eq(p, pt(5.0, 0.0)));
}

#[test]
fn nearest_point_clamps_before_start() {
    let p = nearest_point_on_segment(pt(-7.0, 3.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!(point_approx_eq(p, pt(0.0, 0.0)));
}

#[test]
fn nearest_point_clamps_after_end() {
    let p = nearest_point_on_segment(pt(25.0, -3.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!(point_approx_eq(p, pt(10.0, 0.0)));
}

#[test]
fn nearest_point_on_diagonal_segment() {
    let p = nearest_point_on_segment(pt(0.0, 10.0), pt(0.0, 0.0), pt(10.0, 10.0));
    assert!(point_approx_eq(p, pt(5.0, 5.0)));
}

#[test]
fn nearest_point_degenerate_segment_returns_start() {
    let p = nearest_point_on_segment(pt(4.0, 4.0), pt(1.0, 1.0), pt(1.0, 1.0));
    assert_eq!(p, pt(1.0, 1.0));
}

#[test]
fn segment_midpoint_and_nearest() {
    let s = Segment::new(pt(0.0, 0.0), pt(0.0, 8.0));
    assert_eq!(s.midpoint(), pt(0.0, 4.0));
    assert!(point_approx_eq(s.nearest_point(pt(3.0, 2.0)), pt(0.0, 2.0)));
}

// =============================================================
// Corner / Edge
// =============================================================

#[test]
fn corner_opposites_are_involutive() {
    for c in Corner::ALL {
        assert_ne!(c, c.opposite());
        assert_eq!(c, c.opposite().opposite());
    }
}

#[test]
fn corner_side_flags() {
    assert!(Corner::TopLeft.is_left() && Corner::TopLeft.is_top());
    assert!(!Corner::BottomRight.is_left() && !Corner::BottomRight.is_top());
    assert!(Corner::BottomLeft.is_left() && !Corner::BottomLeft.is_top());
    assert!(!Corner::TopRight.is_left() && Corner::TopRight.is_top());
}

#[test]
fn corner_serde_snake_case() {
    assert_eq!(serde_json::to_string(&Corner::BottomRight).unwrap(), "\"bottom_right\"");
    let back: Corner = serde_json::from_str("\"top_left\"").unwrap();
    assert_eq!(back, Corner::TopLeft);
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_derived_edges_and_center() {
    let r = Rect::new(pt(10.0, 20.0), 100.0, 50.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.bottom(), 70.0);
    assert_eq!(r.center(), pt(60.0, 45.0));
}

#[test]
fn rect_corners_clockwise() {
    let r = Rect::new(pt(0.0, 0.0), 4.0, 2.0);
    assert_eq!(r.corners(), [pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 2.0), pt(0.0, 2.0)]);
}

#[test]
fn rect_edges_connect_corners() {
    let r = Rect::new(pt(0.0, 0.0), 4.0, 2.0);
    let edges = r.edges();
    for (i, e) in edges.iter().enumerate() {
        assert_eq!(e.end, edges[(i + 1) % 4].start);
    }
    assert_eq!(r.edge(Edge::Right), Segment::new(pt(4.0, 0.0), pt(4.0, 2.0)));
}

#[test]
fn rect_centered_at() {
    let r = Rect::centered_at(pt(0.0, 0.0), 100.0, 50.0);
    assert_eq!(r.top_left, pt(-50.0, -25.0));
    assert_eq!(r.center(), pt(0.0, 0.0));
}

#[test]
fn rect_from_edges_allows_negative_extent() {
    let r = Rect::from_edges(10.0, 0.0, 5.0, 3.0);
    assert_eq!(r.width, -5.0);
    assert_eq!(r.height, 3.0);
}

#[test]
fn rect_translate_preserves_size() {
    let r = Rect::new(pt(1.0, 1.0), 3.0, 4.0).translate(pt(-1.0, 2.0));
    assert_eq!(r, Rect::new(pt(0.0, 3.0), 3.0, 4.0));
}

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(pt(0.0, 0.0), 10.0, 10.0);
    assert!(r.contains(pt(0.0, 0.0)));
    assert!(r.contains(pt(10.0, 10.0)));
    assert!(r.contains(pt(5.0, 5.0)));
    assert!(!r.contains(pt(10.1, 5.0)));
}

#[test]
fn rect_union_and_expand() {
    let a = Rect::new(pt(0.0, 0.0), 10.0, 10.0);
    let b = Rect::new(pt(20.0, -5.0), 5.0, 5.0);
    assert_eq!(a.union(&b), Rect::from_edges(0.0, -5.0, 25.0, 10.0));
    assert_eq!(a.expand(2.0), Rect::from_edges(-2.0, -2.0, 12.0, 12.0));
}
