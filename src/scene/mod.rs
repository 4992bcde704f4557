// scene/mod.rs

pub mod assembler;
pub mod camera;
pub mod light;
pub mod mesh;
pub mod primitives;
pub mod transform;

use glam::{Quat, Vec3};

use crate::renderer::SceneUniforms;
use crate::settings::RenderSettings;

// Re-export commonly used types
pub use assembler::SceneBuffer;
pub use camera::{CameraController, Direction, Projection};
pub use light::LightRig;
pub use mesh::Mesh;
pub use primitives::{cube_mesh, plane_mesh};
pub use transform::Transform;

/// Everything the host mutates between frames, plus the static geometry.
pub struct Scene {
    buffer: SceneBuffer,
    pub camera: CameraController,
    pub projection: Projection,
    pub light: LightRig,
}

impl Scene {
    /// Two unit cubes side by side resting above a 5x5 floor.
    pub fn demo(settings: &RenderSettings) -> Self {
        let mut buffer = SceneBuffer::new();

        let placements = [
            Transform::from_translation(Vec3::new(-0.75, 0.0, 0.0)),
            Transform::from_translation(Vec3::new(0.75, 0.0, 0.0)),
        ];
        for placement in &placements {
            buffer.add_object(&cube_mesh().transformed(placement.matrix()));
        }

        let floor = Transform::from_trs(Vec3::new(0.0, -0.5, 0.0), Quat::IDENTITY, Vec3::splat(5.0));
        buffer.add_object(&plane_mesh().transformed(floor.matrix()));

        Self::new(buffer, settings)
    }

    pub fn new(buffer: SceneBuffer, settings: &RenderSettings) -> Self {
        let resolution = &settings.resolution;
        Self {
            buffer,
            camera: CameraController::new(&settings.camera),
            projection: Projection::new(&settings.camera, resolution.width, resolution.height),
            light: LightRig::default(),
        }
    }

    pub fn buffer(&self) -> &SceneBuffer {
        &self.buffer
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    /// Per-frame uniforms from the current camera and light.
    pub fn uniforms(&self) -> SceneUniforms {
        SceneUniforms::new(
            self.projection.camera_space(&self.camera),
            self.light.light_space_matrix(),
            self.light.position(),
            self.camera.position(),
        )
    }
}
