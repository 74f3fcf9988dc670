//! Gesture scripts: a JSON list of steps replayed against an [`EngineCore`].
//!
//! Shapes created by a script can be given a `name`; later steps refer to
//! them by that name instead of by generated id.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::collections::HashMap;

use rectplan::camera::Size;
use rectplan::config::EngineConfig;
use rectplan::doc::ShapeGroupId;
use rectplan::engine::{Action, EngineCore};
use rectplan::error::EngineError;
use rectplan::geom::{Point, Rect};
use serde::Deserialize;
use tracing::debug;

fn default_viewport() -> Size {
    Size::new(800.0, 600.0)
}

fn default_drag_steps() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    pub steps: Vec<Step>,
}

/// One scripted operation. Coordinates are screen pixels unless noted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Add a rectangle. `at` places its top-left corner in model space;
    /// without it the rectangle is centred on the view.
    Create {
        width: f64,
        height: f64,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        at: Option<Point>,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        target: Option<String>,
    },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// Press at `from`, move to `to` in `steps` equal increments, release.
    Drag {
        from: Point,
        to: Point,
        #[serde(default = "default_drag_steps")]
        steps: u32,
    },
    Pinch { x: f64, y: f64, scale: f64 },
    PinchEnd,
    ResizeViewport { width: f64, height: f64 },
    ToggleSnap,
    ToggleMeasure,
    PanMode { enabled: bool },
    Fit {
        #[serde(default)]
        padding: Option<f64>,
    },
    Remove { name: String },
    Clear,
    Cancel,
    Confirm { accept: bool },
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("step {index}: {source}")]
    Engine {
        index: usize,
        #[source]
        source: EngineError,
    },
    #[error("step {index}: no shape named {name:?}")]
    UnknownName { index: usize, name: String },
}

/// Engine plus the bookkeeping a replay needs.
pub struct Replay {
    pub core: EngineCore,
    names: HashMap<String, ShapeGroupId>,
    /// Every action emitted so far, in order.
    pub actions: Vec<Action>,
}

impl Replay {
    #[must_use]
    pub fn new(config: EngineConfig, viewport: Size) -> Self {
        Self { core: EngineCore::new(config, viewport), names: HashMap::new(), actions: Vec::new() }
    }

    /// Name given to `id` by a `create` step, if any.
    #[must_use]
    pub fn name_of(&self, id: &ShapeGroupId) -> Option<&str> {
        self.names.iter().find(|(_, v)| *v == id).map(|(k, _)| k.as_str())
    }

    /// Run every step in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first step that fails, with its index.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), ScriptError> {
        for (index, step) in steps.iter().enumerate() {
            debug!(index, ?step, "replay step");
            self.apply(index, step)?;
        }
        Ok(())
    }

    fn apply(&mut self, index: usize, step: &Step) -> Result<(), ScriptError> {
        let engine = |source: EngineError| ScriptError::Engine { index, source };
        let actions = match step {
            Step::Create { width, height, name, at } => {
                let id = self.core.create_rectangle(*width, *height).map_err(engine)?;
                if let Some(top_left) = at {
                    let padding = self.core.config.label_padding;
                    if let Some(group) = self.core.scene.get_mut(&id) {
                        group.set_bounds(Rect::new(*top_left, *width, *height), padding);
                    }
                }
                if let Some(name) = name {
                    self.names.insert(name.clone(), id);
                }
                vec![Action::RenderNeeded]
            }
            Step::Down { x, y, target } => {
                let target = target.as_deref().map(|name| self.resolve(index, name)).transpose()?;
                self.core.on_pointer_down(Point::new(*x, *y), target)
            }
            Step::Move { x, y } => self.core.on_pointer_move(Point::new(*x, *y)),
            Step::Up { x, y } => self.core.on_pointer_up(Point::new(*x, *y)),
            Step::Drag { from, to, steps } => self.drag(*from, *to, *steps),
            Step::Pinch { x, y, scale } => self.core.on_pinch_update(Point::new(*x, *y), *scale),
            Step::PinchEnd => self.core.on_pinch_end(),
            Step::ResizeViewport { width, height } => self.core.on_viewport_resized(Size::new(*width, *height)),
            Step::ToggleSnap => {
                self.core.toggle_snapping();
                Vec::new()
            }
            Step::ToggleMeasure => {
                self.core.toggle_measurements();
                vec![Action::RenderNeeded]
            }
            Step::PanMode { enabled } => self.core.set_pan_mode(*enabled),
            Step::Fit { padding } => self
                .core
                .fit_to_content(padding.unwrap_or(rectplan::consts::DEFAULT_FIT_PADDING)),
            Step::Remove { name } => {
                let id = self.resolve(index, name)?;
                self.names.remove(name);
                self.core.remove_shape(&id).map_err(engine)?
            }
            Step::Clear => {
                self.names.clear();
                self.core.clear_scene()
            }
            Step::Cancel => self.core.on_cancel(),
            Step::Confirm { accept } => self.core.resolve_confirmation(*accept),
        };
        self.actions.extend(actions);
        Ok(())
    }

    fn resolve(&self, index: usize, name: &str) -> Result<ShapeGroupId, ScriptError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| ScriptError::UnknownName { index, name: name.to_owned() })
    }

    fn drag(&mut self, from: Point, to: Point, steps: u32) -> Vec<Action> {
        let steps = steps.max(1);
        let mut actions = self.core.on_pointer_down(from, None);
        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            actions.extend(self.core.on_pointer_move(from + (to - from) * t));
        }
        actions.extend(self.core.on_pointer_up(to));
        actions
    }
}
