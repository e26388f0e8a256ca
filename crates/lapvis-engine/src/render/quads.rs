use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::OverlayList;

use super::common::{build_pipeline, premul_alpha_blend, PipelineSpec, UniformSlot, QUAD_INDICES};

/// Instanced renderer for solid overlay quads.
///
/// Geometry is in logical pixels and converted to NDC in the vertex shader
/// using the viewport uniform. Colors are premultiplied.
#[derive(Default)]
pub struct QuadRenderer {
    gpu: Option<QuadGpu>,
    /// Instance data of the current frame; reused across frames.
    scratch: Vec<QuadInstance>,
}

struct QuadGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    viewport: UniformSlot<ViewportUniform>,
    corners: wgpu::Buffer,
    indices: wgpu::Buffer,
    instances: wgpu::Buffer,
    /// In quads.
    capacity: usize,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every quad in `list` (paint order) over `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, list: &mut OverlayList) {
        if list.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        self.scratch.clear();
        self.scratch.extend(list.iter_in_paint_order().map(|q| QuadInstance {
            origin: [q.rect.origin.x, q.rect.origin.y],
            size: [q.rect.size.x, q.rect.size.y],
            color: q.color.to_array(),
        }));
        let count = self.scratch.len();

        let mut gpu = match self.gpu.take() {
            Some(g) if g.format == ctx.surface_format => g,
            _ => QuadGpu::new(ctx),
        };
        gpu.reserve(ctx.device, count);

        gpu.viewport.write(
            ctx.queue,
            &ViewportUniform {
                size: [ctx.viewport.width, ctx.viewport.height],
                _pad: [0.0; 2],
            },
        );
        ctx.queue.write_buffer(&gpu.instances, 0, bytemuck::cast_slice(&self.scratch));

        {
            let mut rpass = target.load_pass("lapvis overlay pass");
            rpass.set_pipeline(&gpu.pipeline);
            rpass.set_bind_group(0, &gpu.viewport.bind_group, &[]);
            rpass.set_vertex_buffer(0, gpu.corners.slice(..));
            rpass.set_vertex_buffer(1, gpu.instances.slice(..));
            rpass.set_index_buffer(gpu.indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..count as u32);
        }

        self.gpu = Some(gpu);
    }
}

impl QuadGpu {
    const MIN_CAPACITY: usize = 64;

    fn new(ctx: &RenderCtx<'_>) -> Self {
        log::debug!("building overlay pipeline for {:?}", ctx.surface_format);

        let viewport = UniformSlot::new(ctx.device, "lapvis overlay viewport", wgpu::ShaderStages::VERTEX);
        let pipeline = build_pipeline(
            ctx.device,
            ctx.surface_format,
            &viewport.layout,
            PipelineSpec {
                label: "lapvis overlay",
                wgsl: include_str!("shaders/quads.wgsl"),
                buffers: &[Corner::layout(), QuadInstance::layout()],
                blend: premul_alpha_blend(),
            },
        );

        let corners = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lapvis overlay corners"),
            contents: bytemuck::cast_slice(&CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lapvis overlay indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            format: ctx.surface_format,
            pipeline,
            viewport,
            corners,
            indices,
            instances: instance_buffer(ctx.device, Self::MIN_CAPACITY),
            capacity: Self::MIN_CAPACITY,
        }
    }

    /// Grows the instance buffer to hold at least `quads` instances.
    fn reserve(&mut self, device: &wgpu::Device, quads: usize) {
        if quads <= self.capacity {
            return;
        }
        self.capacity = quads.next_power_of_two();
        self.instances = instance_buffer(device, self.capacity);
    }
}

fn instance_buffer(device: &wgpu::Device, quads: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("lapvis overlay instances"),
        size: (quads * std::mem::size_of::<QuadInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Logical viewport size, padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

/// Unit-square corner; the vertex shader scales it by the instance rect.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Corner([f32; 2]);

const CORNERS: [Corner; 4] = [
    Corner([0.0, 0.0]),
    Corner([1.0, 0.0]),
    Corner([1.0, 1.0]),
    Corner([0.0, 1.0]),
];

impl Corner {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Corner>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl QuadInstance {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2, 3 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_covers_struct() {
        let layout = QuadInstance::layout();
        assert_eq!(layout.array_stride, 32);
        let last = layout.attributes.last().map(|a| a.offset + a.format.size());
        assert_eq!(last, Some(layout.array_stride));
    }

    #[test]
    fn corners_span_unit_square() {
        let xs: Vec<f32> = CORNERS.iter().map(|c| c.0[0]).collect();
        let ys: Vec<f32> = CORNERS.iter().map(|c| c.0[1]).collect();
        assert_eq!(xs, [0.0, 1.0, 1.0, 0.0]);
        assert_eq!(ys, [0.0, 0.0, 1.0, 1.0]);
    }
}
