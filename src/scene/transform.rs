use glam::{Mat3, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn from_trs(t: Vec3, r: Quat, s: Vec3) -> Self {
        Self {
            translation: t,
            rotation: r,
            scale: s,
        }
    }

    pub fn from_translation(t: Vec3) -> Self {
        Self {
            translation: t,
            ..Self::default()
        }
    }
}

/// Inverse-transpose of the upper 3x3 of `model`.
///
/// Maps surface normals so they stay perpendicular to transformed surfaces
/// under non-uniform scale and shear. A singular matrix yields `Mat3::ZERO`,
/// so normals collapse to zero instead of turning into NaNs.
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    inverse_transpose(Mat3::from_mat4(*model))
}

fn inverse_transpose(m: Mat3) -> Mat3 {
    let det = m.determinant();
    if det.abs() <= f32::EPSILON * f32::EPSILON || !det.is_finite() {
        return Mat3::ZERO;
    }
    m.inverse().transpose()
}

/// Pulls a nearly-orthonormal matrix back onto the rotation group.
///
/// One Newton step of the polar decomposition, `(R + R^-T) / 2`. The error
/// shrinks quadratically, so repeated small rotations never accumulate drift.
pub fn orthonormalize(rotation: Mat3) -> Mat3 {
    let inv_t = inverse_transpose(rotation);
    if inv_t == Mat3::ZERO {
        return Mat3::IDENTITY;
    }
    (rotation + inv_t) * 0.5
}
