//! Engine core: commands, gesture handling, and the actions handed back to hosts.
//!
//! [`EngineCore`] owns the scene, camera, configuration and the single active
//! gesture. Every handler takes screen-space input and returns a list of
//! [`Action`]s describing what the host should do next (redraw, change the
//! cursor, persist a shape). Nothing in here touches a browser API, so the
//! whole engine is testable natively.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::{debug, trace};

use crate::camera::{Camera, Size};
use crate::config::EngineConfig;
use crate::doc::{Scene, ShapeGroup, ShapeGroupId};
use crate::error::EngineError;
use crate::geom::{Corner, Point, Rect, distance};
use crate::hit::{self, Hit, HitPart};
use crate::input::{DragSession, DragSubject, InputEvent, InputState, UiState};
use crate::resize::{Axis, resize_corner};
use crate::snap::{self, SnapCandidate};

const CURSOR_DEFAULT: &str = "default";
const CURSOR_MOVE: &str = "move";
const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";
const CURSOR_NWSE: &str = "nwse-resize";
const CURSOR_NESW: &str = "nesw-resize";
const CURSOR_EW: &str = "ew-resize";
const CURSOR_NS: &str = "ns-resize";

/// Why an offered snap was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapDiscard {
    /// The confirmer said no.
    Declined,
    /// The final move step was long enough to read as a throw past the target.
    Flick,
    /// The contact no longer exists in the current scene.
    Stale,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "data", rename_all = "snake_case")]
pub enum Action {
    /// A gesture finished; these are the shape's final bounds.
    ShapeUpdated { id: ShapeGroupId, bounds: Rect },
    ShapeRemoved { id: ShapeGroupId },
    SnapApplied { id: ShapeGroupId, candidate: SnapCandidate },
    SnapDiscarded { id: ShapeGroupId, reason: SnapDiscard },
    /// A shape gesture was abandoned and the shape reverted.
    GestureCancelled { id: ShapeGroupId },
    SetCursor(String),
    RenderNeeded,
}

/// Outcome of asking the user whether to apply a snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
    /// The answer arrives later through [`EngineCore::resolve_confirmation`].
    Deferred,
}

/// Capability used to ask the user whether an offered snap should be applied.
pub trait Confirmer {
    fn confirm(&mut self, message: &str) -> Confirmation;
}

impl<F> Confirmer for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> Confirmation {
        if self(message) { Confirmation::Accepted } else { Confirmation::Declined }
    }
}

/// Confirmer used until a host installs its own. Never applies a snap.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl Confirmer for DeclineAll {
    fn confirm(&mut self, _message: &str) -> Confirmation {
        Confirmation::Declined
    }
}

/// Core engine state: everything except the host binding.
pub struct EngineCore {
    pub config: EngineConfig,
    pub scene: Scene,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    confirmer: Box<dyn Confirmer>,
}

impl EngineCore {
    /// Empty scene, camera at the initial fit-to-width zoom.
    #[must_use]
    pub fn new(config: EngineConfig, viewport: Size) -> Self {
        let camera = Camera::new(viewport, &config);
        Self {
            config,
            scene: Scene::new(),
            camera,
            ui: UiState::default(),
            input: InputState::default(),
            confirmer: Box::new(DeclineAll),
        }
    }

    /// Replace the snap confirmation capability.
    pub fn set_confirmer<C>(&mut self, confirmer: C)
    where
        C: Confirmer + 'static,
    {
        self.confirmer = Box::new(confirmer);
    }

    // =============================================================
    // Commands
    // =============================================================

    /// Add a rectangle centred on the current view centre.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimension`] unless both sides are finite
    /// and greater than zero. The scene is unchanged in that case.
    pub fn create_rectangle(&mut self, width: f64, height: f64) -> Result<ShapeGroupId, EngineError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(EngineError::InvalidDimension { width: width.to_string(), height: height.to_string() });
        }
        let rect = Rect::centered_at(self.camera.center, width, height);
        let group = ShapeGroup::new(rect, self.config.label_padding, self.config.measurements_shown);
        let id = group.id;
        self.scene.insert(group);
        debug!(%id, width, height, "rectangle created");
        Ok(id)
    }

    /// Same as [`EngineCore::create_rectangle`], from raw text fields.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimension`] carrying the raw text if
    /// either field is not a number or not positive.
    pub fn create_rectangle_from_input(&mut self, width: &str, height: &str) -> Result<ShapeGroupId, EngineError> {
        let invalid = || EngineError::InvalidDimension { width: width.to_owned(), height: height.to_owned() };
        let w: f64 = width.trim().parse().map_err(|_| invalid())?;
        let h: f64 = height.trim().parse().map_err(|_| invalid())?;
        self.create_rectangle(w, h).map_err(|_| invalid())
    }

    /// Flip snapping on or off. Returns the new state.
    pub fn toggle_snapping(&mut self) -> bool {
        self.config.snap_enabled = !self.config.snap_enabled;
        if !self.config.snap_enabled
            && let InputState::Armed(session) | InputState::Dragging(session) = &mut self.input
        {
            session.clear_snap();
        }
        debug!(enabled = self.config.snap_enabled, "snapping toggled");
        self.config.snap_enabled
    }

    /// Show or hide every measurement label. Returns the new state.
    pub fn toggle_measurements(&mut self) -> bool {
        self.config.measurements_shown = !self.config.measurements_shown;
        self.scene.set_labels_visible(self.config.measurements_shown);
        debug!(shown = self.config.measurements_shown, "measurements toggled");
        self.config.measurements_shown
    }

    /// In pan mode every press pans the view.
    pub fn set_pan_mode(&mut self, enabled: bool) -> Vec<Action> {
        self.ui.pan_mode = enabled;
        let cursor = if enabled { CURSOR_GRAB } else { CURSOR_DEFAULT };
        vec![Action::SetCursor(cursor.to_owned())]
    }

    /// Remove one shape. A gesture on that shape is cancelled first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownShape`] if `id` is not in the scene.
    pub fn remove_shape(&mut self, id: &ShapeGroupId) -> Result<Vec<Action>, EngineError> {
        if !self.scene.contains(id) {
            return Err(EngineError::UnknownShape(*id));
        }
        let mut actions = Vec::new();
        if self.input.session().is_some_and(|s| s.subject.id() == *id) {
            actions.extend(self.cancel_gesture());
        }
        if let InputState::Armed(session) | InputState::Dragging(session) | InputState::AwaitingConfirm(session) =
            &mut self.input
        {
            session.candidates.retain(|c| c.target_id != *id);
            if session.active_snap.is_some_and(|c| c.target_id == *id) {
                session.active_snap = None;
            }
        }
        self.scene.remove(id);
        if self.ui.selected_id == Some(*id) {
            self.ui.selected_id = None;
        }
        debug!(%id, "shape removed");
        actions.push(Action::ShapeRemoved { id: *id });
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Remove every shape, cancelling any gesture in progress.
    pub fn clear_scene(&mut self) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        let ids = self.scene.ids();
        self.scene.clear();
        self.ui.selected_id = None;
        debug!(count = ids.len(), "scene cleared");
        actions.extend(ids.into_iter().map(|id| Action::ShapeRemoved { id }));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Zoom and centre the view on all shapes. No-op on an empty scene.
    pub fn fit_to_content(&mut self, padding: f64) -> Vec<Action> {
        let Some(bounds) = self.scene.content_bounds() else {
            return Vec::new();
        };
        self.camera.fit_to_content(bounds, self.camera.viewport, padding);
        debug!(zoom = self.camera.zoom, "fit to content");
        vec![Action::RenderNeeded]
    }

    /// Answer a confirmation previously reported as [`Confirmation::Deferred`].
    pub fn resolve_confirmation(&mut self, accepted: bool) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::AwaitingConfirm(session) => self.settle(session, accepted),
            other => {
                self.input = other;
                Vec::new()
            }
        }
    }

    // =============================================================
    // Queries
    // =============================================================

    #[must_use]
    pub fn shape(&self, id: &ShapeGroupId) -> Option<&ShapeGroup> {
        self.scene.get(id)
    }

    /// The most recently pressed shape, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeGroupId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        self.camera.zoom_percent()
    }

    /// Candidates surfaced by the last drag step; empty outside a drag.
    #[must_use]
    pub fn snap_candidates(&self) -> &[SnapCandidate] {
        self.input.session().map_or(&[][..], |s| s.candidates.as_slice())
    }

    #[must_use]
    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.input, InputState::AwaitingConfirm(_))
    }

    // =============================================================
    // Input events
    // =============================================================

    /// Dispatch one normalized event.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { x, y, target } => self.on_pointer_down(Point::new(x, y), target),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { x, y } => self.on_pointer_up(Point::new(x, y)),
            InputEvent::PinchUpdate { x, y, scale } => self.on_pinch_update(Point::new(x, y), scale),
            InputEvent::PinchEnd => self.on_pinch_end(),
            InputEvent::ViewportResized { width, height } => self.on_viewport_resized(Size::new(width, height)),
            InputEvent::Cancel => self.on_cancel(),
        }
    }

    /// Start a gesture. Any gesture already in progress is cancelled first.
    ///
    /// `target` is the shape the host saw under the pointer, if it tracks
    /// that itself; otherwise the engine hit-tests.
    pub fn on_pointer_down(&mut self, screen: Point, target: Option<ShapeGroupId>) -> Vec<Action> {
        let mut actions = self.cancel_gesture();

        if self.ui.pan_mode {
            self.input = InputState::Panning { last_screen: screen };
            actions.push(Action::SetCursor(CURSOR_GRABBING.to_owned()));
            return actions;
        }

        let model = self.camera.screen_to_model(screen);
        let Some((hit, bounds)) = self.pick(model, target) else {
            if self.ui.selected_id.take().is_some() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        };

        let subject = match hit.part {
            HitPart::Body => DragSubject::Shape(hit.shape_id),
            HitPart::CornerHandle(corner) => DragSubject::Corner { id: hit.shape_id, corner },
        };
        debug!(id = %hit.shape_id, ?subject, "press on shape");
        self.input = InputState::Armed(DragSession::new(subject, bounds, screen));
        self.ui.selected_id = Some(hit.shape_id);
        actions.push(Action::SetCursor(cursor_for(subject).to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                self.camera.pan(screen - last_screen);
                self.input = InputState::Panning { last_screen: screen };
                vec![Action::RenderNeeded]
            }
            InputState::Armed(session) if distance(screen, session.press_screen) < self.config.drag_dead_zone_px => {
                self.input = InputState::Armed(session);
                Vec::new()
            }
            InputState::Armed(mut session) | InputState::Dragging(mut session) => {
                let actions = self.drag_step(&mut session, screen);
                self.input = InputState::Dragging(session);
                actions
            }
            state @ (InputState::Pinching { .. } | InputState::AwaitingConfirm(_)) => {
                trace!("pointer move dropped");
                self.input = state;
                Vec::new()
            }
        }
    }

    /// Finish the current gesture. A release at a new position counts as a
    /// final move first.
    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Armed(session) if distance(screen, session.press_screen) < self.config.drag_dead_zone_px => {
                vec![Action::SetCursor(CURSOR_DEFAULT.to_owned())]
            }
            InputState::Armed(mut session) | InputState::Dragging(mut session) => {
                let mut actions = Vec::new();
                if screen != session.last_screen {
                    actions.extend(self.drag_step(&mut session, screen));
                }
                actions.extend(self.release(session));
                actions
            }
            InputState::Panning { .. } | InputState::Pinching { .. } => {
                let cursor = if self.ui.pan_mode { CURSOR_GRAB } else { CURSOR_DEFAULT };
                vec![Action::SetCursor(cursor.to_owned())]
            }
            state @ InputState::AwaitingConfirm(_) => {
                self.input = state;
                Vec::new()
            }
        }
    }

    /// Pinch zoom around `anchor`. `scale` is relative to the previous update.
    ///
    /// A shape gesture in progress is cancelled. Anchor movement between
    /// updates pans the view.
    pub fn on_pinch_update(&mut self, anchor: Point, scale: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Pinching { last_anchor } => self.camera.pan(anchor - last_anchor),
            other => {
                self.input = other;
                actions.extend(self.cancel_gesture());
            }
        }
        if scale.is_finite() && scale > 0.0 {
            self.camera.zoom_at(anchor, self.camera.zoom * scale);
        } else {
            trace!(scale, "pinch scale ignored");
        }
        self.input = InputState::Pinching { last_anchor: anchor };
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pinch_end(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::Pinching { .. }) {
            self.input = InputState::Idle;
        }
        Vec::new()
    }

    pub fn on_viewport_resized(&mut self, viewport: Size) -> Vec<Action> {
        self.camera.set_viewport(viewport);
        vec![Action::RenderNeeded]
    }

    /// The host lost the pointer; abandon the current gesture.
    pub fn on_cancel(&mut self) -> Vec<Action> {
        self.cancel_gesture()
    }

    // =============================================================
    // Gesture internals
    // =============================================================

    /// Resolve the press target to a hit part plus the shape's current bounds.
    fn pick(&self, model: Point, target: Option<ShapeGroupId>) -> Option<(Hit, Rect)> {
        let radius = self.config.handle_radius_px;
        let hit = match target {
            Some(id) => {
                let group = self.scene.get(&id)?;
                let part = hit::hit_group(model, group, &self.camera, radius).unwrap_or(HitPart::Body);
                Hit { shape_id: id, part }
            }
            None => hit::hit_test(model, &self.scene, &self.camera, radius)?,
        };
        let bounds = self.scene.get(&hit.shape_id)?.bounds();
        Some((hit, bounds))
    }

    /// Apply one pointer move to the session's subject.
    fn drag_step(&mut self, session: &mut DragSession, screen: Point) -> Vec<Action> {
        let previous = session.last_screen;
        let delta = self.camera.screen_delta_to_model(screen - previous);
        session.last_screen = screen;
        session.last_step = delta.length();

        let padding = self.config.label_padding;
        let min_size = self.config.min_size;
        let Some(group) = self.scene.get_mut(&session.subject.id()) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        match session.subject {
            DragSubject::Shape(_) => {
                group.translate(delta, padding);
                self.refresh_snap(session);
            }
            DragSubject::Corner { id, corner } => match resize_corner(&group.bounds(), corner, delta, min_size) {
                Ok(step) => {
                    group.set_bounds(step.bounds, padding);
                    if let Some(axis) = step.axis
                        && session.axis != Some(axis)
                    {
                        trace!(%id, ?axis, "resize axis changed");
                        session.axis = Some(axis);
                        actions.push(Action::SetCursor(axis_cursor(axis).to_owned()));
                    }
                }
                Err(err) => {
                    // Keep measuring from the last accepted position so the
                    // handle catches up with the pointer once it is valid again.
                    session.last_screen = previous;
                    trace!(%id, %err, "resize frame rejected");
                    return Vec::new();
                }
            },
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Recompute snap candidates for a shape drag.
    fn refresh_snap(&self, session: &mut DragSession) {
        let DragSubject::Shape(id) = session.subject else {
            return;
        };
        if !self.config.snap_enabled {
            session.clear_snap();
            return;
        }
        let Some(group) = self.scene.get(&id) else {
            session.clear_snap();
            return;
        };
        let bounds = group.bounds();
        let targets = self.scene.snap_targets(&id);
        let mut candidates = snap::detect(&bounds, &targets, &self.config);
        if candidates.is_empty() {
            candidates.extend(snap::detect_alignment(&bounds, &targets, &self.config));
        }
        trace!(%id, count = candidates.len(), "snap candidates");
        session.active_snap = candidates.first().copied();
        session.candidates = candidates;
    }

    /// Release a dragged shape: offer the active snap, then finish.
    fn release(&mut self, session: DragSession) -> Vec<Action> {
        let id = session.subject.id();
        let mut actions = Vec::new();

        if let (DragSubject::Shape(_), Some(candidate)) = (session.subject, session.active_snap) {
            if candidate.in_contact() {
                trace!(%id, "already in contact");
            } else if let Some(limit) = self.config.flick_cancel_distance()
                && session.last_step > limit
            {
                debug!(%id, step = session.last_step, limit, "snap cancelled by flick");
                actions.push(Action::SnapDiscarded { id, reason: SnapDiscard::Flick });
            } else {
                let message = confirm_message(&candidate);
                match self.confirmer.confirm(&message) {
                    Confirmation::Accepted => actions.push(self.commit_snap(id, &candidate)),
                    Confirmation::Declined => {
                        debug!(%id, "snap declined");
                        actions.push(Action::SnapDiscarded { id, reason: SnapDiscard::Declined });
                    }
                    Confirmation::Deferred => {
                        debug!(%id, "snap confirmation deferred");
                        self.input = InputState::AwaitingConfirm(session);
                        actions.push(Action::RenderNeeded);
                        return actions;
                    }
                }
            }
        }

        actions.extend(self.finish(id));
        actions
    }

    /// Complete a deferred confirmation.
    fn settle(&mut self, session: DragSession, accepted: bool) -> Vec<Action> {
        let id = session.subject.id();
        let mut actions = Vec::new();
        if let Some(candidate) = session.active_snap {
            if accepted {
                actions.push(self.commit_snap(id, &candidate));
            } else {
                debug!(%id, "snap declined");
                actions.push(Action::SnapDiscarded { id, reason: SnapDiscard::Declined });
            }
        }
        actions.extend(self.finish(id));
        actions
    }

    /// Re-check `candidate` against the current scene and apply it.
    fn commit_snap(&mut self, id: ShapeGroupId, candidate: &SnapCandidate) -> Action {
        let targets = self.scene.snap_targets(&id);
        let padding = self.config.label_padding;
        let Some(group) = self.scene.get_mut(&id) else {
            return Action::SnapDiscarded { id, reason: SnapDiscard::Stale };
        };
        match snap::revalidate(candidate, &group.bounds(), &targets, &self.config) {
            Some(fresh) => {
                group.translate(fresh.translation, padding);
                debug!(%id, kind = ?fresh.kind, distance = fresh.distance, "snap applied");
                Action::SnapApplied { id, candidate: fresh }
            }
            None => {
                debug!(%id, "snap target moved or removed");
                Action::SnapDiscarded { id, reason: SnapDiscard::Stale }
            }
        }
    }

    /// Drop the session and report the shape's final bounds.
    fn finish(&mut self, id: ShapeGroupId) -> Vec<Action> {
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        if let Some(group) = self.scene.get(&id) {
            actions.push(Action::ShapeUpdated { id, bounds: group.bounds() });
        }
        actions.push(Action::SetCursor(CURSOR_DEFAULT.to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Abandon the current gesture.
    ///
    /// A shape gesture reverts to its original bounds. A pending confirmation
    /// is settled as declined; the shape keeps the position it was released at.
    fn cancel_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Panning { .. } | InputState::Pinching { .. } => Vec::new(),
            InputState::Armed(session) | InputState::Dragging(session) => {
                let id = session.subject.id();
                if let Some(group) = self.scene.get_mut(&id) {
                    group.set_bounds(session.original_bounds, self.config.label_padding);
                }
                debug!(%id, "gesture cancelled, bounds reverted");
                vec![Action::GestureCancelled { id }, Action::RenderNeeded]
            }
            InputState::AwaitingConfirm(session) => self.settle(session, false),
        }
    }
}

fn cursor_for(subject: DragSubject) -> &'static str {
    match subject {
        DragSubject::Shape(_) => CURSOR_MOVE,
        DragSubject::Corner { corner: Corner::TopLeft | Corner::BottomRight, .. } => CURSOR_NWSE,
        DragSubject::Corner { corner: Corner::TopRight | Corner::BottomLeft, .. } => CURSOR_NESW,
    }
}

/// A corner drag shows which side is actually moving.
fn axis_cursor(axis: Axis) -> &'static str {
    match axis {
        Axis::X => CURSOR_EW,
        Axis::Y => CURSOR_NS,
    }
}

fn confirm_message(candidate: &SnapCandidate) -> String {
    format!("Snap to the nearby rectangle? It is {:.1} mm away.", candidate.distance)
}
