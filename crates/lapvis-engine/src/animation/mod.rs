//! Animation driving.
//!
//! `FrameLoop` turns the runtime's redraw callbacks into "elapsed since start"
//! and carries a cancellation handle so the loop can be torn down explicitly.

mod frame_loop;

pub use frame_loop::{FrameLoop, LoopHandle, LoopState};
