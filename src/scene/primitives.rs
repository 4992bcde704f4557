use glam::Vec3;

use crate::renderer::vertex::v;
use crate::scene::mesh::Mesh;

const HALF: f32 = 0.5;

// (outward normal, tangent along +u) per cube face. Side faces run +u to the
// right as seen from outside, so +v points down the world Y axis on all four.
const CUBE_FACES: [(Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_X, Vec3::Z),
    (Vec3::Y, Vec3::X),
    (Vec3::NEG_Y, Vec3::X),
    (Vec3::Z, Vec3::X),
    (Vec3::NEG_Z, Vec3::NEG_X),
];

// bottom-left, bottom-right, top-right, top-left
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Unit cube centred on the origin with half-extent 0.5.
///
/// Every face owns four vertices so it keeps a flat outward normal, giving
/// 24 vertices and 12 triangles.
pub fn cube_mesh() -> Mesh {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, tangent) in CUBE_FACES {
        let bitangent = normal.cross(tangent);
        let center = normal * HALF;
        let base = vertices.len() as u32;

        for uv in QUAD_UVS {
            let pos = center + tangent * (uv[0] - 0.5) + bitangent * (0.5 - uv[1]);
            vertices.push(v(pos.to_array(), normal.to_array(), uv));
        }

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(vertices, indices)
}

/// Unit square in the XZ plane at y = 0, facing +Y.
pub fn plane_mesh() -> Mesh {
    let up = [0.0, 1.0, 0.0];
    let vertices = vec![
        v([HALF, 0.0, HALF], up, [1.0, 0.0]),
        v([-HALF, 0.0, HALF], up, [0.0, 0.0]),
        v([-HALF, 0.0, -HALF], up, [0.0, 1.0]),
        v([HALF, 0.0, -HALF], up, [1.0, 1.0]),
    ];
    let indices = vec![0, 3, 1, 2, 1, 3];
    Mesh::new(vertices, indices)
}
