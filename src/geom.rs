//! Geometry primitives: points, segments, and axis-aligned rectangles in model space.
//!
//! Everything here is a pure value type. Callers guarantee finite inputs, so no
//! function in this module can fail.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A point in either screen or model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Displacement between two points. Shares the representation of [`Point`].
pub type Vector = Point;

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when read as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

// --- Free functions ---

#[must_use]
pub fn add(a: Point, b: Vector) -> Point {
    a + b
}

#[must_use]
pub fn subtract(a: Point, b: Point) -> Vector {
    a - b
}

#[must_use]
pub fn scale(v: Vector, factor: f64) -> Vector {
    v * factor
}

#[must_use]
pub fn dot(a: Vector, b: Vector) -> f64 {
    a.x * b.x + a.y * b.y
}

#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).length()
}

/// Project `p` onto the segment `start..end`.
///
/// The projection parameter is clamped to the segment, so a point beyond either
/// end maps onto that endpoint. A zero-length segment yields `start`.
#[must_use]
pub fn nearest_point_on_segment(p: Point, start: Point, end: Point) -> Point {
    let seg = end - start;
    let len = seg.length();
    if len == 0.0 {
        return start;
    }
    let dir = seg * (1.0 / len);
    let t = dot(p - start, dir).clamp(0.0, len);
    start + dir * t
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }

    #[must_use]
    pub fn nearest_point(&self, p: Point) -> Point {
        nearest_point_on_segment(p, self.start, self.end)
    }
}

/// One of the four corners of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Corners in clockwise order starting at the top-left.
    pub const ALL: [Corner; 4] = [Corner::TopLeft, Corner::TopRight, Corner::BottomRight, Corner::BottomLeft];

    /// The diagonally opposite corner, which stays fixed during a resize.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomRight => Self::TopLeft,
            Self::BottomLeft => Self::TopRight,
        }
    }

    /// Whether this corner sits on the rectangle's left edge.
    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    /// Whether this corner sits on the rectangle's top edge.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

/// One of the four sides of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Axis-aligned rectangle in model space.
///
/// Width and height are positive for every rectangle held by the scene; the
/// constructors do not enforce it so that intermediate values can be checked
/// by the caller before they are committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top_left: Point, width: f64, height: f64) -> Self {
        Self { top_left, width, height }
    }

    /// Build from edge coordinates. `right < left` yields a negative width.
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { top_left: Point::new(left, top), width: right - left, height: bottom - top }
    }

    /// A rectangle of the given size whose center is `center`.
    #[must_use]
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(Point::new(center.x - width / 2.0, center.y - height / 2.0), width, height)
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.top_left.x + self.width
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top_left.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.top_left.x + self.width / 2.0, self.top_left.y + self.height / 2.0)
    }

    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.left(), self.top()),
            Corner::TopRight => Point::new(self.right(), self.top()),
            Corner::BottomRight => Point::new(self.right(), self.bottom()),
            Corner::BottomLeft => Point::new(self.left(), self.bottom()),
        }
    }

    /// All four corners in [`Corner::ALL`] order.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        Corner::ALL.map(|c| self.corner(c))
    }

    /// The side as a segment running clockwise around the rectangle.
    #[must_use]
    pub fn edge(&self, edge: Edge) -> Segment {
        match edge {
            Edge::Top => Segment::new(self.corner(Corner::TopLeft), self.corner(Corner::TopRight)),
            Edge::Right => Segment::new(self.corner(Corner::TopRight), self.corner(Corner::BottomRight)),
            Edge::Bottom => Segment::new(self.corner(Corner::BottomRight), self.corner(Corner::BottomLeft)),
            Edge::Left => Segment::new(self.corner(Corner::BottomLeft), self.corner(Corner::TopLeft)),
        }
    }

    /// All four sides in [`Edge::ALL`] order.
    #[must_use]
    pub fn edges(&self) -> [Segment; 4] {
        Edge::ALL.map(|e| self.edge(e))
    }

    #[must_use]
    pub fn translate(&self, by: Vector) -> Self {
        Self { top_left: self.top_left + by, ..*self }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Self {
        Self::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Grow outward by `by` on every side.
    #[must_use]
    pub fn expand(&self, by: f64) -> Self {
        Self::from_edges(self.left() - by, self.top() - by, self.right() + by, self.bottom() + by)
    }
}
