//! GPU device + surface management.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue for the landing window,
//! keeps the swapchain configured across resizes and hands out one
//! encoder + view per frame.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
