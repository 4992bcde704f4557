use glam::{Mat4, Quat, Vec3};

use shadow_cubes::renderer::vertex::FLOATS_PER_VERTEX;
use shadow_cubes::scene::{cube_mesh, plane_mesh, SceneBuffer, Transform};

const EPSILON: f32 = 1e-5;

fn demo_buffer() -> SceneBuffer {
    let mut buffer = SceneBuffer::new();
    buffer.add_object(&cube_mesh().transformed(Mat4::from_translation(Vec3::new(-0.75, 0.0, 0.0))));
    buffer.add_object(&cube_mesh().transformed(Mat4::from_translation(Vec3::new(0.75, 0.0, 0.0))));
    let floor = Transform::from_trs(Vec3::new(0.0, -0.5, 0.0), Quat::IDENTITY, Vec3::splat(5.0));
    buffer.add_object(&plane_mesh().transformed(floor.matrix()));
    buffer
}

#[test]
fn assembled_scene_has_expected_counts() {
    let buffer = demo_buffer();
    assert_eq!(buffer.vertex_count(), 52);
    assert_eq!(buffer.index_count(), 78);
    assert_eq!(buffer.as_floats().len(), 52 * FLOATS_PER_VERTEX);
    assert_eq!(buffer.as_floats().len(), 416);
}

#[test]
fn every_index_addresses_a_vertex() {
    let buffer = demo_buffer();
    let max = buffer.indices().iter().copied().max().unwrap();
    assert_eq!(max, 51);
    assert!(buffer
        .indices()
        .iter()
        .all(|&i| (i as usize) < buffer.vertex_count()));
}

#[test]
fn later_objects_index_past_earlier_ones() {
    let buffer = demo_buffer();
    let indices = buffer.indices();
    assert!(indices[..36].iter().all(|&i| i < 24));
    assert!(indices[36..72].iter().all(|&i| (24..48).contains(&i)));
    assert!(indices[72..].iter().all(|&i| (48..52).contains(&i)));
}

#[test]
fn identity_transform_leaves_mesh_unchanged() {
    let original = cube_mesh();
    let moved = cube_mesh().transformed(Mat4::IDENTITY);
    for (a, b) in original.vertices.iter().zip(&moved.vertices) {
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.normal, b.normal);
        assert_eq!(a.uv, b.uv);
    }
}

#[test]
fn translation_moves_positions_but_not_normals() {
    let offset = Vec3::new(1.0, -2.0, 3.5);
    let original = cube_mesh();
    let moved = cube_mesh().transformed(Mat4::from_translation(offset));
    for (a, b) in original.vertices.iter().zip(&moved.vertices) {
        let delta = Vec3::from(b.pos) - Vec3::from(a.pos);
        assert!(delta.abs_diff_eq(offset, EPSILON));
        assert_eq!(a.normal, b.normal);
    }
}

#[test]
fn non_uniform_scale_keeps_normal_directions_on_a_box() {
    let scale = Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5));
    let original = cube_mesh();
    let scaled = cube_mesh().transformed(scale);
    for (a, b) in original.vertices.iter().zip(&scaled.vertices) {
        let before = Vec3::from(a.normal);
        let after = Vec3::from(b.normal);
        assert!(after.length() > 0.0);
        assert!(before.cross(after).length() < EPSILON);
        assert!(before.dot(after) > 0.0);
    }
}
