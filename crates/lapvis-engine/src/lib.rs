//! LapVis engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the landing app:
//! window loop, GPU device, frame timing, the grid-floor scene and its renderers.

pub mod animation;
pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
