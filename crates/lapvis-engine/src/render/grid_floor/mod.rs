//! Grid floor renderer.
//!
//! Draws the ground plane of a [`GridScene`] with the grid/beam fragment
//! program. Uniforms are rewritten every frame before the pass is recorded;
//! the GPU reads them for every fragment of that frame.

mod math;
mod uniforms;

use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{GridScene, PlaneVertex, PLANE_INDICES};

use super::common::{build_pipeline, PipelineSpec, UniformSlot};
use uniforms::GridUniforms;

pub use math::{
    grid_line, intensity, perspective_warp, safe_divisor, scan_beam, shade, GridLayer, GridStyle,
    MIN_FOOTPRINT,
};

/// Renders the animated grid floor.
pub struct GridFloorRenderer {
    style: GridStyle,
    gpu: Option<FloorGpu>,
}

/// Device objects; rebuilt when the surface format changes.
struct FloorGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformSlot<GridUniforms>,
    /// Last uploaded plane; the vertex buffer is rewritten when it changes.
    vertices: [PlaneVertex; 4],
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
}

impl Default for GridFloorRenderer {
    fn default() -> Self {
        Self::new(GridStyle::default())
    }
}

impl GridFloorRenderer {
    pub fn new(style: GridStyle) -> Self {
        Self { style, gpu: None }
    }

    /// Uploads this frame's uniforms and draws the plane over `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &GridScene) {
        if !ctx.viewport.is_valid() {
            return;
        }

        let vertices = scene.plane.vertices();
        let gpu = match self.gpu.take() {
            Some(g) if g.format == ctx.surface_format => g,
            _ => FloorGpu::new(ctx, vertices),
        };

        if gpu.vertices != vertices {
            ctx.queue.write_buffer(&gpu.vbo, 0, bytemuck::cast_slice(&vertices));
        }
        gpu.uniforms.write(ctx.queue, &GridUniforms::new(scene, &self.style));

        {
            let mut rpass = target.load_pass("lapvis grid floor pass");
            rpass.set_pipeline(&gpu.pipeline);
            rpass.set_bind_group(0, &gpu.uniforms.bind_group, &[]);
            rpass.set_vertex_buffer(0, gpu.vbo.slice(..));
            rpass.set_index_buffer(gpu.ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..PLANE_INDICES.len() as u32, 0, 0..1);
        }

        self.gpu = Some(FloorGpu { vertices, ..gpu });
    }
}

impl FloorGpu {
    fn new(ctx: &RenderCtx<'_>, vertices: [PlaneVertex; 4]) -> Self {
        log::debug!("building grid floor pipeline for {:?}", ctx.surface_format);

        let uniforms = UniformSlot::new(ctx.device, "lapvis grid floor uniforms", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let pipeline = build_pipeline(
            ctx.device,
            ctx.surface_format,
            &uniforms.layout,
            PipelineSpec {
                label: "lapvis grid floor",
                wgsl: include_str!("../shaders/grid_floor.wgsl"),
                buffers: &[PlaneVertex::layout()],
                // The floor is opaque; it overwrites the clear color.
                blend: wgpu::BlendState::REPLACE,
            },
        );

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lapvis grid floor vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lapvis grid floor indices"),
            contents: bytemuck::cast_slice(&PLANE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self { format: ctx.surface_format, pipeline, uniforms, vertices, vbo, ibo }
    }
}
