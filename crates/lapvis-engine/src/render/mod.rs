//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipeline, buffers) and rebuilds
//! them lazily when the surface format changes.
//!
//! - `grid_floor`: the animated perspective grid on the tilted ground plane.
//! - `quads`: screen-space overlay quads (HUD), logical pixels, top-left origin.

mod common;
mod ctx;
pub mod grid_floor;
pub mod quads;

pub use ctx::{RenderCtx, RenderTarget};
pub use grid_floor::{GridFloorRenderer, GridLayer, GridStyle};
pub use quads::QuadRenderer;

#[cfg(test)]
mod tests {
    use naga::ShaderStage;
    use naga::valid::{Capabilities, ValidationFlags, Validator};
    use rstest::rstest;

    #[rstest]
    #[case::grid_floor(include_str!("shaders/grid_floor.wgsl"))]
    #[case::quads(include_str!("shaders/quads.wgsl"))]
    fn shader_parses_and_validates(#[case] source: &str) {
        let module = naga::front::wgsl::parse_str(source).unwrap_or_else(|e| panic!("{}", e.emit_to_string(source)));
        Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .unwrap_or_else(|e| panic!("{e:?}"));

        let stages: Vec<_> = module.entry_points.iter().map(|ep| (ep.name.as_str(), ep.stage)).collect();
        assert!(stages.contains(&("vs_main", ShaderStage::Vertex)));
        assert!(stages.contains(&("fs_main", ShaderStage::Fragment)));
    }
}
