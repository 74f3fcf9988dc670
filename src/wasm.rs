//! JavaScript binding.
//!
//! [`PlannerHandle`] wraps an [`EngineCore`] for a browser host. The host feeds
//! it pointer and pinch events and receives actions and render output as JSON
//! strings, which keeps the boundary free of hand-written JS glue types.
//!
//! Snap confirmation goes through a JS function installed with
//! `setConfirm(fn)`. It is called with the prompt text: returning `true` or
//! `false` answers immediately; any other return value (typically a promise)
//! defers, and the host answers later through `resolveConfirmation(bool)`.

use js_sys::Function;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::camera::Size;
use crate::config::EngineConfig;
use crate::consts::DEFAULT_FIT_PADDING;
use crate::engine::{Confirmation, Confirmer, EngineCore};
use crate::geom::Point;
use crate::render;

struct JsConfirmer(Function);

impl Confirmer for JsConfirmer {
    fn confirm(&mut self, message: &str) -> Confirmation {
        match self.0.call1(&JsValue::NULL, &JsValue::from_str(message)) {
            Ok(answer) => match answer.as_bool() {
                Some(true) => Confirmation::Accepted,
                Some(false) => Confirmation::Declined,
                None => Confirmation::Deferred,
            },
            Err(err) => {
                warn!(?err, "confirm callback threw; declining snap");
                Confirmation::Declined
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_id(raw: &str) -> Result<Uuid, JsValue> {
    Uuid::parse_str(raw).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Browser-facing planner. All action lists are returned as JSON arrays.
#[wasm_bindgen]
pub struct PlannerHandle {
    core: EngineCore,
}

#[wasm_bindgen]
impl PlannerHandle {
    /// Create a planner for a `width` x `height` viewport. `config_json` is an
    /// optional partial [`EngineConfig`] document.
    ///
    /// # Errors
    ///
    /// Returns the config error if `config_json` is malformed or holds a
    /// value the engine cannot run with.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config_json: Option<String>) -> Result<PlannerHandle, JsValue> {
        let config = match config_json {
            Some(raw) => EngineConfig::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => EngineConfig::default(),
        };
        Ok(Self { core: EngineCore::new(config, Size::new(width, height)) })
    }

    #[wasm_bindgen(js_name = setConfirm)]
    pub fn set_confirm(&mut self, callback: Function) {
        self.core.set_confirmer(JsConfirmer(callback));
    }

    // --- Commands ---

    /// Add a rectangle from the two text fields. Returns the new shape id.
    ///
    /// # Errors
    ///
    /// Returns the validation message if either field is not a positive number.
    #[wasm_bindgen(js_name = createRectangle)]
    pub fn create_rectangle(&mut self, width: &str, height: &str) -> Result<String, JsValue> {
        self.core
            .create_rectangle_from_input(width, height)
            .map(|id| id.to_string())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = toggleSnapping)]
    pub fn toggle_snapping(&mut self) -> bool {
        self.core.toggle_snapping()
    }

    #[wasm_bindgen(js_name = toggleMeasurements)]
    pub fn toggle_measurements(&mut self) -> bool {
        self.core.toggle_measurements()
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = setPanMode)]
    pub fn set_pan_mode(&mut self, enabled: bool) -> Result<String, JsValue> {
        to_json(&self.core.set_pan_mode(enabled))
    }

    /// # Errors
    ///
    /// Returns an error for a malformed or unknown id.
    #[wasm_bindgen(js_name = removeShape)]
    pub fn remove_shape(&mut self, id: &str) -> Result<String, JsValue> {
        let id = parse_id(id)?;
        let actions = self.core.remove_shape(&id).map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_json(&actions)
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = clearScene)]
    pub fn clear_scene(&mut self) -> Result<String, JsValue> {
        to_json(&self.core.clear_scene())
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = fitToContent)]
    pub fn fit_to_content(&mut self, padding: Option<f64>) -> Result<String, JsValue> {
        to_json(&self.core.fit_to_content(padding.unwrap_or(DEFAULT_FIT_PADDING)))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = resolveConfirmation)]
    pub fn resolve_confirmation(&mut self, accepted: bool) -> Result<String, JsValue> {
        to_json(&self.core.resolve_confirmation(accepted))
    }

    // --- Input ---

    /// `target` is the id of the shape under the pointer, if the host knows it.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed target id.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64, target: Option<String>) -> Result<String, JsValue> {
        let target = target.as_deref().map(parse_id).transpose()?;
        to_json(&self.core.on_pointer_down(Point::new(x, y), target))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_move(Point::new(x, y)))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_up(Point::new(x, y)))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = pinchUpdate)]
    pub fn pinch_update(&mut self, x: f64, y: f64, scale: f64) -> Result<String, JsValue> {
        to_json(&self.core.on_pinch_update(Point::new(x, y), scale))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = pinchEnd)]
    pub fn pinch_end(&mut self) -> Result<String, JsValue> {
        to_json(&self.core.on_pinch_end())
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    #[wasm_bindgen(js_name = resizeViewport)]
    pub fn resize_viewport(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        to_json(&self.core.on_viewport_resized(Size::new(width, height)))
    }

    /// # Errors
    ///
    /// Fails only if the actions cannot be serialized.
    pub fn cancel(&mut self) -> Result<String, JsValue> {
        to_json(&self.core.on_cancel())
    }

    // --- Output ---

    /// Render nodes for the current state as a JSON array.
    ///
    /// # Errors
    ///
    /// Fails only if the nodes cannot be serialized.
    pub fn render(&self) -> Result<String, JsValue> {
        to_json(&render::scene_nodes(&self.core))
    }

    #[wasm_bindgen(js_name = zoomPercent)]
    pub fn zoom_percent(&self) -> f64 {
        self.core.zoom_percent()
    }
}
