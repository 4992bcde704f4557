//! WGSL sources for the shadow and color passes.

use crate::renderer::lighting::{AMBIENT_FACTOR, SHADOW_BIAS, SHININESS, SPECULAR_TINT};

pub const SHADOW_WGSL: &str = include_str!("../shader/shadow.wgsl");
const SCENE_WGSL: &str = include_str!("../shader/scene.wgsl");

/// Shading constants declared in WGSL from the values `lighting` uses on the CPU.
pub fn lighting_constants() -> String {
    let tint = SPECULAR_TINT;
    format!(
        "const AMBIENT_FACTOR: f32 = {AMBIENT_FACTOR:?};\n\
         const SPECULAR_TINT: vec3<f32> = vec3<f32>({:?}, {:?}, {:?});\n\
         const SHININESS: f32 = {SHININESS:?};\n\
         const SHADOW_BIAS: f32 = {SHADOW_BIAS:?};\n",
        tint.x, tint.y, tint.z
    )
}

/// Full color-pass source: the constant header followed by `scene.wgsl`.
pub fn scene_wgsl() -> String {
    format!("{}\n{}", lighting_constants(), SCENE_WGSL)
}
