//! Document model: shape groups, their measurement labels, and the scene that owns them.
//!
//! A [`ShapeGroup`] is one rectangle plus four measurement labels, one per
//! side. Labels are derived data: whenever a rectangle's bounds change the
//! owner calls [`ShapeGroup::set_bounds`], which re-runs label reflow. Reflow
//! is idempotent, so calling it with unchanged bounds leaves every label
//! byte-identical.
//!
//! The [`Scene`] keeps groups in insertion order. Order is z-order only; it
//! carries no other meaning.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Edge, Point, Rect, Vector};
use crate::snap::SnapTarget;

/// Unique identifier for a shape group.
pub type ShapeGroupId = Uuid;

/// Which side of the rectangle a label annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl LabelSide {
    pub const ALL: [LabelSide; 4] = [LabelSide::Top, LabelSide::Right, LabelSide::Bottom, LabelSide::Left];

    /// The rectangle side this label sits beside.
    #[must_use]
    pub fn edge(self) -> Edge {
        match self {
            Self::Top => Edge::Top,
            Self::Right => Edge::Right,
            Self::Bottom => Edge::Bottom,
            Self::Left => Edge::Left,
        }
    }

    /// Horizontal text anchoring relative to the label position.
    #[must_use]
    pub fn justification(self) -> Justification {
        match self {
            Self::Top | Self::Bottom => Justification::Center,
            Self::Right => Justification::Left,
            Self::Left => Justification::Right,
        }
    }
}

/// Text anchoring for the drawing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    Left,
    Center,
    Right,
}

/// A measurement label attached to one side of a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub side: LabelSide,
    /// Displayed text, e.g. `"100 mm"`.
    pub text: String,
    /// Anchor point in model space.
    pub position: Point,
    /// Mirrors the global "measurements shown" toggle.
    pub visible: bool,
}

/// Format a length for a measurement label.
#[must_use]
pub fn label_text(length: f64) -> String {
    format!("{} mm", length.round())
}

/// A rectangle with its four measurement labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGroup {
    pub id: ShapeGroupId,
    rect: Rect,
    labels: [Label; 4],
}

impl ShapeGroup {
    /// Create a group with a fresh id and reflowed labels.
    #[must_use]
    pub fn new(rect: Rect, label_padding: f64, labels_visible: bool) -> Self {
        Self::with_id(Uuid::new_v4(), rect, label_padding, labels_visible)
    }

    /// Create a group with a caller-chosen id.
    #[must_use]
    pub fn with_id(id: ShapeGroupId, rect: Rect, label_padding: f64, labels_visible: bool) -> Self {
        let labels = LabelSide::ALL.map(|side| Label {
            side,
            text: String::new(),
            position: Point::default(),
            visible: labels_visible,
        });
        let mut group = Self { id, rect, labels };
        group.reflow_labels(label_padding);
        group
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn labels(&self) -> &[Label; 4] {
        &self.labels
    }

    #[must_use]
    pub fn label(&self, side: LabelSide) -> &Label {
        &self.labels[side as usize]
    }

    /// Replace the bounds and reflow labels.
    pub fn set_bounds(&mut self, rect: Rect, label_padding: f64) {
        self.rect = rect;
        self.reflow_labels(label_padding);
    }

    /// Move the rectangle and its labels.
    pub fn translate(&mut self, by: Vector, label_padding: f64) {
        self.set_bounds(self.rect.translate(by), label_padding);
    }

    /// Reposition labels outside each edge midpoint and regenerate their text.
    ///
    /// Top and bottom labels show the width, left and right the height.
    pub fn reflow_labels(&mut self, padding: f64) {
        let r = self.rect;
        let width = label_text(r.width);
        let height = label_text(r.height);

        for label in &mut self.labels {
            let (outward, text) = match label.side {
                LabelSide::Top => (Point::new(0.0, -padding), &width),
                LabelSide::Right => (Point::new(padding, 0.0), &height),
                LabelSide::Bottom => (Point::new(0.0, padding), &width),
                LabelSide::Left => (Point::new(-padding, 0.0), &height),
            };
            label.position = r.edge(label.side.edge()).midpoint() + outward;
            if label.text != *text {
                label.text.clone_from(text);
            }
        }
    }

    pub fn set_labels_visible(&mut self, visible: bool) {
        for label in &mut self.labels {
            label.visible = visible;
        }
    }
}

/// Insertion-ordered store of shape groups.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    groups: Vec<ShapeGroup>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Insert a group on top. A group with the same id is replaced in place,
    /// keeping its z-order.
    pub fn insert(&mut self, group: ShapeGroup) {
        match self.groups.iter_mut().find(|g| g.id == group.id) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    /// Remove a group by id, returning it if it was present.
    pub fn remove(&mut self, id: &ShapeGroupId) -> Option<ShapeGroup> {
        let idx = self.groups.iter().position(|g| g.id == *id)?;
        Some(self.groups.remove(idx))
    }

    /// Keep only the groups for which `keep` returns true.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&ShapeGroup) -> bool,
    {
        self.groups.retain(keep);
    }

    /// Remove every group.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    #[must_use]
    pub fn get(&self, id: &ShapeGroupId) -> Option<&ShapeGroup> {
        self.groups.iter().find(|g| g.id == *id)
    }

    pub fn get_mut(&mut self, id: &ShapeGroupId) -> Option<&mut ShapeGroup> {
        self.groups.iter_mut().find(|g| g.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeGroupId) -> bool {
        self.get(id).is_some()
    }

    /// Groups bottom first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ShapeGroup> {
        self.groups.iter()
    }

    /// Ids bottom first. A snapshot, safe to hold while removing.
    #[must_use]
    pub fn ids(&self) -> Vec<ShapeGroupId> {
        self.groups.iter().map(|g| g.id).collect()
    }

    /// Bounds of every group except `exclude`, in scene order.
    #[must_use]
    pub fn snap_targets(&self, exclude: &ShapeGroupId) -> Vec<SnapTarget> {
        self.groups
            .iter()
            .filter(|g| g.id != *exclude)
            .map(|g| SnapTarget { id: g.id, bounds: g.bounds() })
            .collect()
    }

    /// Smallest rectangle covering every group, or `None` for an empty scene.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.groups
            .iter()
            .map(ShapeGroup::bounds)
            .reduce(|acc, r| acc.union(&r))
    }

    /// Apply the "measurements shown" toggle to every label.
    pub fn set_labels_visible(&mut self, visible: bool) {
        for group in &mut self.groups {
            group.set_labels_visible(visible);
        }
    }

    /// Number of groups currently in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the scene contains no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
