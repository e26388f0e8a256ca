//! Color model shared between the grid floor, the HUD and renderers.

pub mod color;

pub use color::Color;
