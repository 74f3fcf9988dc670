//! Snap detection between an actively dragged rectangle and the rest of the scene.
//!
//! Three contact classes are searched, all with a strict `distance < threshold`
//! test in model units:
//!
//! | Class | Anchor (active) | Target (candidate) |
//! |-------|-----------------|--------------------|
//! | corner-to-corner | each corner | each corner |
//! | corner-to-edge | each corner | nearest point on each edge |
//! | edge-to-edge | closest endpoint of each edge | closest endpoint of each edge |
//!
//! A fourth, alignment-only class ([`SnapKind::CenterLine`]) lines up the
//! centres of rectangles that already sit side by side or stacked.
//!
//! In [`SnapMode::Best`] a single candidate wins by class priority first and
//! distance second, so a corner-to-corner contact at 12 mm beats a
//! corner-to-edge contact at 5 mm. [`SnapMode::All`] surfaces every candidate.
//! In both modes a contact the shape already touches ranks after every
//! contact that would still move it.
//!
//! For every candidate, `translation == target_point - anchor_point`.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::doc::ShapeGroupId;
use crate::geom::{Point, Rect, Vector, distance};

/// How many candidates a search returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// The single highest-ranked candidate.
    #[default]
    Best,
    /// Every candidate under threshold, ranked.
    All,
}

impl SnapMode {
    /// Parse `best` / `all`, case-insensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "best" => Some(Self::Best),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Geometric class of a snap contact, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapKind {
    CornerCorner,
    CornerEdge,
    EdgeEdge,
    CenterLine,
}

impl SnapKind {
    /// Lower ranks win.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::CornerCorner => 0,
            Self::CornerEdge => 1,
            Self::EdgeEdge => 2,
            Self::CenterLine => 3,
        }
    }
}

/// Bounds of another shape, captured when a search starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub id: ShapeGroupId,
    pub bounds: Rect,
}

/// A possible snap of the active rectangle onto a target feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapCandidate {
    pub kind: SnapKind,
    /// Feature point on the active rectangle.
    pub anchor_point: Point,
    /// Feature point on the target rectangle.
    pub target_point: Point,
    /// Model distance between anchor and target.
    pub distance: f64,
    /// Displacement that makes the anchor coincide with the target.
    pub translation: Vector,
    /// Shape the target feature belongs to.
    pub target_id: ShapeGroupId,
}

impl SnapCandidate {
    #[must_use]
    pub fn new(kind: SnapKind, anchor_point: Point, target_point: Point, target_id: ShapeGroupId) -> Self {
        Self {
            kind,
            anchor_point,
            target_point,
            distance: distance(anchor_point, target_point),
            translation: target_point - anchor_point,
            target_id,
        }
    }

    /// The anchor already sits on the target; applying would not move anything.
    #[must_use]
    pub fn in_contact(&self) -> bool {
        self.translation == Vector::default()
    }

    fn same_contact(&self, other: &Self) -> bool {
        self.kind == other.kind && self.anchor_point == other.anchor_point && self.target_point == other.target_point
    }
}

/// Ranking used by both modes: contacts that would still move the shape,
/// then class priority, then distance.
fn rank(a: &SnapCandidate, b: &SnapCandidate) -> Ordering {
    a.in_contact()
        .cmp(&b.in_contact())
        .then_with(|| a.kind.rank().cmp(&b.kind.rank()))
        .then_with(|| a.distance.total_cmp(&b.distance))
}

// =============================================================
// Contact classes
// =============================================================

/// Corner-to-corner contacts of `active` against one target.
pub fn corner_to_corner(active: &Rect, target: &SnapTarget, threshold: f64, out: &mut Vec<SnapCandidate>) {
    for anchor in active.corners() {
        for corner in target.bounds.corners() {
            let c = SnapCandidate::new(SnapKind::CornerCorner, anchor, corner, target.id);
            if c.distance < threshold {
                out.push(c);
            }
        }
    }
}

/// Corner-to-edge contacts: each active corner against the nearest point of each target edge.
pub fn corner_to_edge(active: &Rect, target: &SnapTarget, threshold: f64, out: &mut Vec<SnapCandidate>) {
    for anchor in active.corners() {
        for edge in target.bounds.edges() {
            let c = SnapCandidate::new(SnapKind::CornerEdge, anchor, edge.nearest_point(anchor), target.id);
            if c.distance < threshold {
                out.push(c);
            }
        }
    }
}

/// Edge-to-edge contacts: the closest endpoint pair of every active/target edge pair.
pub fn edge_to_edge(active: &Rect, target: &SnapTarget, threshold: f64, out: &mut Vec<SnapCandidate>) {
    for a in active.edges() {
        for t in target.bounds.edges() {
            let pairs = [(a.start, t.start), (a.start, t.end), (a.end, t.start), (a.end, t.end)];
            let closest = pairs
                .into_iter()
                .map(|(anchor, tp)| SnapCandidate::new(SnapKind::EdgeEdge, anchor, tp, target.id))
                .min_by(|x, y| x.distance.total_cmp(&y.distance));
            if let Some(c) = closest
                && c.distance < threshold
            {
                out.push(c);
            }
        }
    }
}

/// Centre-line alignment of `active` against one target.
///
/// Applies when the two rectangles face each other across a gap smaller than
/// `threshold` on one axis and their centres differ by less than
/// `alignment_threshold` on the other. The candidate moves only along that
/// other axis.
pub fn center_line(
    active: &Rect,
    target: &SnapTarget,
    threshold: f64,
    alignment_threshold: f64,
    out: &mut Vec<SnapCandidate>,
) {
    let a = active;
    let t = &target.bounds;
    let ac = a.center();
    let tc = t.center();

    // Side by side: align vertical centres.
    let gap_x = (a.right() - t.left()).abs().min((a.left() - t.right()).abs());
    if gap_x < threshold && (tc.y - ac.y).abs() < alignment_threshold {
        out.push(SnapCandidate::new(SnapKind::CenterLine, ac, Point::new(ac.x, tc.y), target.id));
    }

    // Stacked: align horizontal centres.
    let gap_y = (a.bottom() - t.top()).abs().min((a.top() - t.bottom()).abs());
    if gap_y < threshold && (tc.x - ac.x).abs() < alignment_threshold {
        out.push(SnapCandidate::new(SnapKind::CenterLine, ac, Point::new(tc.x, ac.y), target.id));
    }
}

// =============================================================
// Searches
// =============================================================

/// Every corner/edge contact under `threshold`, deduplicated and ranked.
#[must_use]
pub fn collect_candidates(active: &Rect, targets: &[SnapTarget], threshold: f64) -> Vec<SnapCandidate> {
    let mut out = Vec::new();
    for target in targets {
        corner_to_corner(active, target, threshold, &mut out);
        corner_to_edge(active, target, threshold, &mut out);
        edge_to_edge(active, target, threshold, &mut out);
    }
    finish(out)
}

/// Search according to `config.snap_mode`.
///
/// `Best` yields at most one candidate; `All` yields every candidate ranked
/// best first.
#[must_use]
pub fn detect(active: &Rect, targets: &[SnapTarget], config: &EngineConfig) -> Vec<SnapCandidate> {
    let mut all = collect_candidates(active, targets, config.snap_threshold);
    if config.snap_mode == SnapMode::Best {
        all.truncate(1);
    }
    all
}

/// Alignment-only search: the closest centre-line candidate, if any.
#[must_use]
pub fn detect_alignment(active: &Rect, targets: &[SnapTarget], config: &EngineConfig) -> Option<SnapCandidate> {
    let mut out = Vec::new();
    for target in targets {
        center_line(active, target, config.snap_threshold, config.alignment_threshold, &mut out);
    }
    finish(out).into_iter().next()
}

/// Re-run the search for `candidate`'s class against its target and return the
/// same contact if it still exists.
///
/// Used before committing: the target may have been removed or moved since the
/// candidate was found.
#[must_use]
pub fn revalidate(
    candidate: &SnapCandidate,
    active: &Rect,
    targets: &[SnapTarget],
    config: &EngineConfig,
) -> Option<SnapCandidate> {
    let target = targets.iter().find(|t| t.id == candidate.target_id)?;
    let threshold = config.snap_threshold;
    let mut out = Vec::new();
    match candidate.kind {
        SnapKind::CornerCorner => corner_to_corner(active, target, threshold, &mut out),
        SnapKind::CornerEdge => corner_to_edge(active, target, threshold, &mut out),
        SnapKind::EdgeEdge => edge_to_edge(active, target, threshold, &mut out),
        SnapKind::CenterLine => center_line(active, target, threshold, config.alignment_threshold, &mut out),
    }
    out.into_iter().find(|c| c.same_contact(candidate))
}

fn finish(mut out: Vec<SnapCandidate>) -> Vec<SnapCandidate> {
    let mut unique: Vec<SnapCandidate> = Vec::with_capacity(out.len());
    for c in out.drain(..) {
        if !unique.iter().any(|u| u.same_contact(&c)) {
            unique.push(c);
        }
    }
    unique.sort_by(rank);
    unique
}
