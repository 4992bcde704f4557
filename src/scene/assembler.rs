use crate::renderer::vertex::{Vertex, FLOATS_PER_VERTEX};
use crate::scene::mesh::Mesh;

/// All scene geometry merged into one vertex and one index list, so the
/// whole scene draws with a single indexed call.
#[derive(Clone, Debug, Default)]
pub struct SceneBuffer {
    mesh: Mesh,
    objects: usize,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `mesh`, rebasing its indices onto the vertices already stored.
    pub fn add_object(&mut self, mesh: &Mesh) {
        let start = (self.mesh.as_floats().len() / FLOATS_PER_VERTEX) as u32;
        self.mesh.vertices.extend_from_slice(&mesh.vertices);
        self.mesh
            .indices
            .extend(mesh.indices.iter().map(|&index| index + start));
        self.objects += 1;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.mesh.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    pub fn as_floats(&self) -> &[f32] {
        self.mesh.as_floats()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.mesh.index_count()
    }

    pub fn object_count(&self) -> usize {
        self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::primitives::{cube_mesh, plane_mesh};

    #[test]
    fn second_object_indices_are_offset_by_first_vertex_count() {
        let a = cube_mesh();
        let b = plane_mesh();
        let mut scene = SceneBuffer::new();
        scene.add_object(&a);
        scene.add_object(&b);

        let offset = a.vertex_count() as u32;
        let tail = &scene.indices()[a.index_count()..];
        assert_eq!(tail.len(), b.index_count());
        for (merged, local) in tail.iter().zip(&b.indices) {
            assert_eq!(*merged, local + offset);
        }
        assert_eq!(scene.vertex_count(), a.vertex_count() + b.vertex_count());
        assert_eq!(scene.object_count(), 2);
    }

    #[test]
    fn vertices_are_copied_verbatim_in_order() {
        let a = plane_mesh();
        let b = cube_mesh();
        let mut scene = SceneBuffer::new();
        scene.add_object(&a);
        scene.add_object(&b);

        assert_eq!(&scene.as_floats()[..a.float_len()], a.as_floats());
        assert_eq!(&scene.as_floats()[a.float_len()..], b.as_floats());
    }

    #[test]
    fn empty_scene_has_no_geometry() {
        let scene = SceneBuffer::new();
        assert!(scene.is_empty());
        assert_eq!(scene.index_count(), 0);
    }
}
