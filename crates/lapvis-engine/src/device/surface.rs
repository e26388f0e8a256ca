use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// sRGB formats tried first, in order.
const SRGB_PREFERENCE: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let fallback = *caps.formats.first()?;
    if !prefer_srgb {
        return Some(fallback);
    }
    let srgb = SRGB_PREFERENCE
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.iter().copied().find(wgpu::TextureFormat::is_srgb));
    Some(srgb.unwrap_or(fallback))
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    match requested {
        Some(mode) if caps.alpha_modes.contains(&mode) => mode,
        _ => caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
    }
}

/// The window surface together with its current configuration.
///
/// `size` tracks the window and may be 0x0 (minimized); `config` only ever
/// holds sizes wgpu accepted.
pub(crate) struct SwapChain<'w> {
    pub surface: wgpu::Surface<'w>,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl<'w> SwapChain<'w> {
    pub fn configure(&self, device: &wgpu::Device) {
        self.surface.configure(device, &self.config);
    }

    /// Returns `true` when the surface was reconfigured.
    pub fn resize(&mut self, device: &wgpu::Device, new_size: PhysicalSize<u32>) -> bool {
        self.size = new_size;
        if !is_drawable(new_size) {
            return false;
        }
        if (self.config.width, self.config.height) == (new_size.width, new_size.height) {
            return false;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.configure(device);
        log::debug!("surface resized to {}x{}", new_size.width, new_size.height);
        true
    }

    /// Recovers from a failed `get_current_texture` where possible.
    pub fn recover(&self, device: &wgpu::Device, err: &wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = action_for(err);
        if action == SurfaceErrorAction::Reconfigured && is_drawable(self.size) {
            self.configure(device);
        }
        action
    }
}

fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

pub(crate) fn action_for(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    use wgpu::SurfaceError as E;
    match err {
        E::Lost | E::Outdated => SurfaceErrorAction::Reconfigured,
        E::OutOfMemory => SurfaceErrorAction::Fatal,
        E::Timeout | E::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as A, TextureFormat as F};

    fn caps(formats: &[F], alpha_modes: &[A]) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats: formats.to_vec(),
            alpha_modes: alpha_modes.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn prefers_srgb_when_offered() {
        let c = caps(&[F::Bgra8Unorm, F::Rgba8UnormSrgb], &[]);
        assert_eq!(choose_surface_format(&c, true), Some(F::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&c, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        let c = caps(&[F::Rgba16Float, F::Bgra8Unorm], &[]);
        assert_eq!(choose_surface_format(&c, true), Some(F::Rgba16Float));
        assert_eq!(choose_surface_format(&caps(&[], &[]), true), None);
    }

    #[test]
    fn alpha_mode_honors_supported_request() {
        let c = caps(&[], &[A::Opaque, A::PreMultiplied]);
        assert_eq!(choose_alpha_mode(&c, Some(A::PreMultiplied)), A::PreMultiplied);
        assert_eq!(choose_alpha_mode(&c, Some(A::PostMultiplied)), A::Opaque);
        assert_eq!(choose_alpha_mode(&caps(&[], &[]), None), A::Auto);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(action_for(&wgpu::SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(action_for(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(action_for(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
