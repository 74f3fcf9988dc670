//! Interactive rectangle layout engine.
//!
//! Users place axis-aligned rectangles on a millimetre grid, drag them around,
//! reshape them by a corner, and snap them onto one another. The engine owns
//! the scene, the pan/zoom camera and the gesture state machine; hosts feed it
//! a normalized event stream and draw the [`render::SceneNode`] list it
//! returns. The same core runs natively (tests, the replay CLI) and in the
//! browser through [`wasm::PlannerHandle`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: commands, input handlers, actions, snap confirmation |
//! | [`doc`] | Shape groups, measurement labels and the scene |
//! | [`geom`] | Points, segments and rectangles in model space |
//! | [`camera`] | Pan/zoom camera and screen/model conversions |
//! | [`snap`] | Snap candidate search and ranking |
//! | [`resize`] | Single-axis corner resize |
//! | [`input`] | Input events and the gesture state machine |
//! | [`hit`] | Hit-testing of shape bodies and corner handles |
//! | [`render`] | Screen-space render output |
//! | [`config`] | Engine configuration and environment overrides |
//! | [`error`] | Command errors |
//! | [`wasm`] | JavaScript binding |
//! | [`consts`] | Shared numeric constants (thresholds, zoom limits, sizes) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
pub mod resize;
pub mod snap;
pub mod wasm;
