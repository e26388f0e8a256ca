/// One acquired swapchain image plus the encoder recording into it.
///
/// Must be handed back to [`Gpu::submit`](super::Gpu::submit) before the next
/// frame is acquired; holding it blocks presentation.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
