// renderer/uniforms.rs
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::renderer::lighting::{DIFFUSE_REFLECTANCE, LIGHT_INTENSITY};

/// Uniform block shared by the color-pass vertex and fragment stages.
///
/// Field order mirrors `SceneUniforms` in `scene.wgsl`; every `vec3` is
/// followed by a scalar so the block matches WGSL's 16-byte alignment.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug)]
pub struct SceneUniforms {
    /// `projection * inverse(camera_world)`.
    pub camera_space_mat: [[f32; 4]; 4],
    pub light_space_matrix: [[f32; 4]; 4],
    pub light_pos: [f32; 3],
    pub intensity: f32,
    pub camera_pos: [f32; 3],
    pub _padding0: f32,
    pub diff: [f32; 3],
    pub _padding1: f32,
}

impl SceneUniforms {
    pub fn new(
        camera_space_mat: Mat4,
        light_space_matrix: Mat4,
        light_pos: Vec3,
        camera_pos: Vec3,
    ) -> Self {
        Self {
            camera_space_mat: camera_space_mat.to_cols_array_2d(),
            light_space_matrix: light_space_matrix.to_cols_array_2d(),
            light_pos: light_pos.to_array(),
            intensity: LIGHT_INTENSITY,
            camera_pos: camera_pos.to_array(),
            _padding0: 0.0,
            diff: DIFFUSE_REFLECTANCE.to_array(),
            _padding1: 0.0,
        }
    }
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO, Vec3::ZERO)
    }
}

/// Uniform block of the depth-only shadow pass.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug)]
pub struct ShadowUniforms {
    pub light_space_matrix: [[f32; 4]; 4],
}

impl ShadowUniforms {
    pub fn new(light_space_matrix: Mat4) -> Self {
        Self {
            light_space_matrix: light_space_matrix.to_cols_array_2d(),
        }
    }
}
