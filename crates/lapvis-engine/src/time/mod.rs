//! Time subsystem.
//!
//! - `FrameClock`: one per window, ticked once per presented frame; never runs backwards.
//! - `Interval`: fixed-period schedule polled from the frame callback, used for
//!   work that runs slower than the display refresh (telemetry updates).

mod frame_clock;
mod interval;

pub use frame_clock::FrameClock;
pub use interval::Interval;
