use glam::{Mat4, Vec3};

use crate::renderer::vertex::{Vertex, FLOATS_PER_VERTEX};
use crate::scene::transform::normal_matrix;

/// CPU-side triangle mesh: interleaved vertices plus a `u32` index list.
///
/// Triangles wind counter-clockwise when viewed from their outward face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex attributes flattened to `[px, py, pz, nx, ny, nz, u, v, ...]`.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn float_len(&self) -> usize {
        self.vertices.len() * FLOATS_PER_VERTEX
    }

    /// Applies `model` to every position and its normal matrix to every normal.
    ///
    /// Normals are left unnormalized; shading renormalizes per fragment.
    pub fn transform(&mut self, model: Mat4) {
        let normal_mat = normal_matrix(&model);
        for vertex in &mut self.vertices {
            let pos = model.transform_point3(Vec3::from_array(vertex.pos));
            let normal = normal_mat * Vec3::from_array(vertex.normal);
            vertex.pos = pos.to_array();
            vertex.normal = normal.to_array();
        }
    }

    pub fn transformed(mut self, model: Mat4) -> Self {
        self.transform(model);
        self
    }
}
