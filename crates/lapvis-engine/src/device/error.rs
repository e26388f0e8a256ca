/// What the frame driver should do after `get_current_texture` failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame can render normally.
    Reconfigured,
    /// Transient failure; drop this frame and try again on the next refresh.
    SkipFrame,
    /// Unrecoverable (out of memory). The landing window should close.
    Fatal,
}
