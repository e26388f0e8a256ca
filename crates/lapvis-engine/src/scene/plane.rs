use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Vertex of the ground plane mesh: local position + surface coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl PlaneVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const PLANE_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Flat rectangle in its local XY plane, tilted into a floor by `rotation_x`.
///
/// `uv` runs from (0, 0) at the near-left corner to (1, 1) at the far-right
/// corner once tilted, so `uv.y` grows toward the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPlane {
    pub width: f32,
    pub depth: f32,
    /// Rotation about the X axis in radians.
    pub rotation_x: f32,
    pub position: Vec3,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 50.0,
            rotation_x: -std::f32::consts::PI / 2.4,
            position: Vec3::new(0.0, -2.0, -10.0),
        }
    }
}

impl GroundPlane {
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_x(self.rotation_x)
    }

    pub fn vertices(&self) -> [PlaneVertex; 4] {
        let hw = self.width * 0.5;
        let hd = self.depth * 0.5;
        [
            PlaneVertex { position: [-hw, -hd, 0.0], uv: [0.0, 0.0] },
            PlaneVertex { position: [hw, -hd, 0.0], uv: [1.0, 0.0] },
            PlaneVertex { position: [hw, hd, 0.0], uv: [1.0, 1.0] },
            PlaneVertex { position: [-hw, hd, 0.0], uv: [0.0, 1.0] },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_edge_recedes_and_rises() {
        let plane = GroundPlane::default();
        let model = plane.model();
        let v = plane.vertices();

        let near = model.transform_point3(Vec3::from(v[0].position));
        let far = model.transform_point3(Vec3::from(v[3].position));
        assert!(far.z < near.z, "uv.y = 1 must be farther from the camera");
        assert!(far.y > near.y);
    }

    #[test]
    fn uv_covers_unit_square() {
        let v = GroundPlane::default().vertices();
        for vert in v {
            assert!(vert.uv.iter().all(|c| *c == 0.0 || *c == 1.0));
        }
        assert_eq!(v[0].uv, [0.0, 0.0]);
        assert_eq!(v[2].uv, [1.0, 1.0]);
    }
}
