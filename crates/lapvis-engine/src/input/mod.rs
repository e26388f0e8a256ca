//! Input subsystem.
//!
//! Public API does not expose winit types. The runtime translates platform
//! events through `platform::winit` and feeds them into `InputState`.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};
