//! Scene host state.
//!
//! - `GridScene`: camera + ground plane + per-frame shader parameters for the
//!   animated grid floor. Owned by the app, advanced once per frame.
//! - `OverlayList`: screen-space quads drawn on top of the floor (HUD).

mod camera;
mod grid_scene;
mod overlay;
mod plane;

pub use camera::PerspectiveCamera;
pub use grid_scene::{scan_at, CameraDrift, FrameParams, GridScene, SCAN_PERIOD};
pub use overlay::{Layer, OverlayList, Quad};
pub use plane::{GroundPlane, PlaneVertex, PLANE_INDICES};
