use bytemuck::{Pod, Zeroable};

use crate::scene::GridScene;

use super::math::{GridStyle, MIN_FOOTPRINT};

/// Uniform block of `grid_floor.wgsl`. Field order and padding must match.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct GridUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub accent: [f32; 4],
    pub layers: [f32; 4],
    pub shape: [f32; 4],
    pub params: [f32; 4],
}

impl GridUniforms {
    pub fn new(scene: &GridScene, style: &GridStyle) -> Self {
        let params = scene.params();
        Self {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            model: scene.plane.model().to_cols_array_2d(),
            accent: style.accent.extend(1.0).to_array(),
            layers: [
                style.coarse.scale,
                style.coarse.weight,
                style.fine.scale,
                style.fine.weight,
            ],
            shape: [
                style.beam_sharpness,
                style.beam_weight,
                style.min_divisor,
                MIN_FOOTPRINT,
            ],
            params: [params.time, params.scan, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn block_size_matches_shader_layout() {
        // 2 x mat4x4 + 4 x vec4
        assert_eq!(std::mem::size_of::<GridUniforms>(), 2 * 64 + 4 * 16);
    }

    #[test]
    fn carries_frame_params_and_style() {
        let mut scene = GridScene::new(1280, 720);
        scene.advance(Duration::from_millis(2500));
        let u = GridUniforms::new(&scene, &GridStyle::default());

        assert_eq!(u.params[0], 2.5);
        assert_eq!(u.params[1], 0.5);
        assert_eq!(u.layers, [20.0, 0.4, 80.0, 0.15]);
        assert_eq!(u.shape[0], 20.0);
        assert_eq!(u.shape[1], 0.8);
        assert_eq!(u.accent, [0.0, 0.9, 1.0, 1.0]);
    }
}
