//! CPU mirror of the color-pass shading model.
//!
//! The constants here are the values written into the uniform block and
//! baked into `scene.wgsl`; the functions follow the shader line by line so
//! the lighting and shadow rules can be exercised without a GPU.

use glam::{Mat4, Vec3};

/// Diffuse reflectance (`diff`).
pub const DIFFUSE_REFLECTANCE: Vec3 = Vec3::new(0.8, 0.8, 0.8);
/// Light energy received at unit distance (`i`).
pub const LIGHT_INTENSITY: f32 = 500.0;
/// Fraction of the diffuse reflectance used as unshadowed ambient.
pub const AMBIENT_FACTOR: f32 = 0.4;
/// Gray tint of specular highlights.
pub const SPECULAR_TINT: Vec3 = Vec3::new(0.5, 0.5, 0.5);
pub const SHININESS: f32 = 200.0;
/// Subtracted from fragment depth before the shadow comparison.
pub const SHADOW_BIAS: f32 = 0.004;

/// Light-space clip position mapped to shadow-texture space.
///
/// `x`/`y` become texture coordinates (v grows downward), `z` stays the
/// `[0, 1]` depth written by the orthographic light projection.
pub fn shadow_coords(light_space_matrix: Mat4, world_pos: Vec3) -> Vec3 {
    let clip = light_space_matrix * world_pos.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    Vec3::new(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5, ndc.z)
}

/// Binary shadow test against the depth stored in the shadow map.
///
/// Lit (1.0) when the biased fragment depth is not farther from the light
/// than the stored occluder depth.
pub fn shadow_visibility(fragment_depth: f32, stored_depth: f32) -> f32 {
    if fragment_depth - SHADOW_BIAS <= stored_depth {
        1.0
    } else {
        0.0
    }
}

/// Whether shadow coordinates land inside the light frustum. Fragments
/// outside it are treated as lit.
pub fn inside_shadow_frustum(coords: Vec3) -> bool {
    (0.0..=1.0).contains(&coords.x) && (0.0..=1.0).contains(&coords.y) && coords.z <= 1.0
}

#[derive(Clone, Copy, Debug)]
pub struct ShadingInput {
    pub world_pos: Vec3,
    pub normal: Vec3,
    pub light_pos: Vec3,
    pub camera_pos: Vec3,
    pub albedo: Vec3,
    pub shadow: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingTerms {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl ShadingTerms {
    pub fn evaluate(input: &ShadingInput) -> Self {
        let norm = input.normal.normalize_or_zero();
        let to_light = input.light_pos - input.world_pos;
        let light_dir = to_light.normalize_or_zero();
        let energy = LIGHT_INTENSITY / to_light.length_squared().max(f32::EPSILON);

        let diffuse = energy * DIFFUSE_REFLECTANCE * norm.dot(light_dir).max(0.0);

        let view_dir = (input.camera_pos - input.world_pos).normalize_or_zero();
        let half_dir = (view_dir + light_dir).normalize_or_zero();
        let specular = SPECULAR_TINT * energy * norm.dot(half_dir).max(0.0).powf(SHININESS);

        Self {
            ambient: DIFFUSE_REFLECTANCE * AMBIENT_FACTOR,
            diffuse,
            specular,
        }
    }

    /// `(ambient + shadow * (diffuse + specular)) * albedo`; ambient is never shadowed.
    pub fn combine(&self, shadow: f32, albedo: Vec3) -> Vec3 {
        (self.ambient + (self.diffuse + self.specular) * shadow) * albedo
    }
}

pub fn shade(input: &ShadingInput) -> Vec3 {
    ShadingTerms::evaluate(input).combine(input.shadow, input.albedo)
}
