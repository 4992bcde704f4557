use glam::{Mat4, Vec3};

/// Fixed point light plus the orthographic frustum its shadow map covers.
#[derive(Clone, Copy, Debug)]
pub struct LightRig {
    position: Vec3,
    target: Vec3,
    projection: Mat4,
    view: Mat4,
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION)
    }
}

impl LightRig {
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(-15.0, 5.0, 10.0);

    /// Half-width of the square shadow frustum in world units.
    pub const SHADOW_EXTENT: f32 = 5.0;
    pub const SHADOW_NEAR: f32 = 1.0;
    pub const SHADOW_FAR: f32 = 50.0;

    pub fn new(position: Vec3) -> Self {
        let target = Vec3::ZERO;
        let extent = Self::SHADOW_EXTENT;
        let projection = Mat4::orthographic_rh(
            -extent,
            extent,
            -extent,
            extent,
            Self::SHADOW_NEAR,
            Self::SHADOW_FAR,
        );
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        Self {
            position,
            target,
            projection,
            view,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// World to light clip space, the `lightSpaceMatrix` uniform.
    pub fn light_space_matrix(&self) -> Mat4 {
        self.projection * self.view
    }
}
