use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the landing binary.
pub trait App {
    /// Called after the surface has been resized (physical pixels).
    ///
    /// The runtime has already reconfigured the swapchain; the app updates
    /// whatever depends on the aspect ratio. Repeated identical sizes are
    /// delivered as-is.
    fn on_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called once per display refresh.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
