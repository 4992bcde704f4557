use glam::{Mat3, Mat4, Vec2, Vec3};
use winit::keyboard::KeyCode;

use crate::scene::transform::orthonormalize;
use crate::settings::CameraSettings;

/// Discrete movement requested by a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(Self::Forward),
            KeyCode::KeyS => Some(Self::Back),
            KeyCode::KeyA => Some(Self::Left),
            KeyCode::KeyD => Some(Self::Right),
            KeyCode::KeyE => Some(Self::Up),
            KeyCode::KeyQ => Some(Self::Down),
            _ => None,
        }
    }
}

/// First-person camera driven by pointer drags and key presses.
///
/// Position and rotation are stored apart so the rotation can be
/// re-orthonormalized after every update. Vertical key moves are counted in
/// whole steps on top of `base`, so an up/down pair always cancels exactly.
#[derive(Clone, Debug)]
pub struct CameraController {
    base: Vec3,
    lift: i32,
    rotation: Mat3,
    move_step: f32,
    pixels_per_degree: f32,
    drag_anchor: Option<Vec2>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

impl CameraController {
    pub const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);

    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            base: Self::START_POSITION,
            lift: 0,
            rotation: Mat3::IDENTITY,
            move_step: settings.move_step,
            pixels_per_degree: settings.pixels_per_degree,
            drag_anchor: None,
        }
    }

    pub fn with_pose(mut self, position: Vec3, rotation: Mat3) -> Self {
        self.base = position;
        self.lift = 0;
        self.rotation = orthonormalize(rotation);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.base + Vec3::Y * (self.lift as f32 * self.move_step)
    }

    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Yaw about world +Y, pitch about the camera's right axis.
    ///
    /// The right axis is sampled before either rotation is applied and the
    /// result is composed as `yaw * pitch * old`.
    pub fn on_drag_delta(&mut self, dx: f32, dy: f32) {
        let right = (self.rotation * Vec3::X).try_normalize().unwrap_or(Vec3::X);
        let yaw = Mat3::from_rotation_y((-dx / self.pixels_per_degree).to_radians());
        let pitch = Mat3::from_axis_angle(right, (-dy / self.pixels_per_degree).to_radians());
        self.rotation = orthonormalize(yaw * pitch * self.rotation);
    }

    pub fn on_key(&mut self, direction: Direction) {
        let step = self.move_step;
        match direction {
            Direction::Forward => self.base += self.rotation * Vec3::NEG_Z * step,
            Direction::Back => self.base += self.rotation * Vec3::Z * step,
            Direction::Left => self.base += self.rotation * Vec3::NEG_X * step,
            Direction::Right => self.base += self.rotation * Vec3::X * step,
            Direction::Up => self.lift += 1,
            Direction::Down => self.lift -= 1,
        }
        log::debug!("camera moved {:?} to {}", direction, self.position());
    }

    pub fn press(&mut self, pointer: Vec2) {
        self.drag_anchor = Some(pointer);
    }

    /// Rotates by the offset from the previous pointer sample. Ignored unless
    /// a press is active.
    pub fn pointer_move(&mut self, pointer: Vec2) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        let delta = pointer - anchor;
        self.on_drag_delta(delta.x, delta.y);
        self.drag_anchor = Some(pointer);
    }

    pub fn release(&mut self) {
        self.drag_anchor = None;
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position()) * Mat4::from_mat3(self.rotation)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }
}

/// Perspective projection tracking the viewport aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
    aspect: f32,
}

impl Projection {
    pub fn new(settings: &CameraSettings, width: u32, height: u32) -> Self {
        let mut projection = Self {
            fov_y_radians: settings.fov_y_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            aspect: 1.0,
        };
        projection.set_viewport(width, height);
        projection
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, self.aspect, self.near, self.far)
    }

    /// `projection * view`, the `cameraSpaceMat` uniform.
    pub fn camera_space(&self, camera: &CameraController) -> Mat4 {
        self.matrix() * camera.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(m: Mat3, eps: f32) {
        let cols = [m.x_axis, m.y_axis, m.z_axis];
        for (i, a) in cols.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < eps, "column {i} length {}", a.length());
            for b in &cols[i + 1..] {
                assert!(a.dot(*b).abs() < eps);
            }
        }
        assert!(m.determinant() > 0.0);
    }

    #[test]
    fn starts_at_origin_pose() {
        let cam = CameraController::default();
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(cam.rotation(), Mat3::IDENTITY);
        assert!(!cam.is_dragging());
    }

    #[test]
    fn rotation_stays_orthonormal_under_many_drags() {
        let mut cam = CameraController::default();
        for step in 0..20_000 {
            let dx = ((step * 7) % 13) as f32 - 6.0;
            let dy = ((step * 5) % 11) as f32 - 5.0;
            cam.on_drag_delta(dx * 0.37, dy * 0.41);
        }
        assert_orthonormal(cam.rotation(), 1e-4);
    }

    #[test]
    fn drag_composes_yaw_then_pitch_about_old_right_axis() {
        let start = Mat3::from_rotation_y(0.4) * Mat3::from_rotation_x(0.3);
        let mut cam = CameraController::default().with_pose(Vec3::ZERO, start);
        let old = cam.rotation();

        cam.on_drag_delta(10.0, -15.0);

        let right = old * Vec3::X;
        let expected = Mat3::from_rotation_y((-2.0f32).to_radians())
            * Mat3::from_axis_angle(right, 3.0f32.to_radians())
            * old;
        assert!(cam.rotation().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn dragging_left_turns_left_and_dragging_up_looks_up() {
        let mut cam = CameraController::default();
        cam.on_drag_delta(-450.0, 0.0);
        let forward = cam.rotation() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_X, 1e-5));

        let mut cam = CameraController::default();
        cam.on_drag_delta(0.0, -450.0);
        let forward = cam.rotation() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn up_then_down_restores_position_for_any_orientation() {
        for (dx, dy) in [(0.0, 0.0), (123.0, -40.0), (-900.0, 300.0)] {
            let mut cam = CameraController::default();
            cam.on_drag_delta(dx, dy);
            let before = cam.position();
            cam.on_key(Direction::Up);
            assert!((cam.position().y - before.y - 0.1).abs() < 1e-6);
            cam.on_key(Direction::Down);
            assert_eq!(cam.position(), before);
        }
    }

    #[test]
    fn up_down_round_trips_are_exact_at_any_height() {
        for start_y in [0.0, -0.5, 0.2, 1.7, 123.456] {
            let mut cam = CameraController::default()
                .with_pose(Vec3::new(0.3, start_y, -2.0), Mat3::IDENTITY);
            for round in 0..50 {
                let before = cam.position();
                cam.on_key(Direction::Up);
                cam.on_key(Direction::Down);
                assert_eq!(cam.position(), before, "start {start_y}, round {round}");
                cam.on_key(Direction::Up);
            }
            for _ in 0..50 {
                cam.on_key(Direction::Down);
            }
            assert_eq!(cam.position(), Vec3::new(0.3, start_y, -2.0));
        }
    }

    #[test]
    fn horizontal_moves_follow_orientation() {
        let mut cam = CameraController::default();
        cam.on_key(Direction::Forward);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 2.9), 1e-6));
        cam.on_key(Direction::Right);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.1, 0.0, 2.9), 1e-6));

        let mut turned = CameraController::default();
        turned.on_drag_delta(-450.0, 0.0);
        turned.on_key(Direction::Forward);
        assert!(turned.position().abs_diff_eq(Vec3::new(-0.1, 0.0, 3.0), 1e-5));
        turned.on_key(Direction::Back);
        turned.on_key(Direction::Left);
        assert!(turned.position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.1), 1e-5));
    }

    #[test]
    fn pointer_moves_without_press_are_ignored() {
        let mut cam = CameraController::default();
        cam.pointer_move(Vec2::new(50.0, 80.0));
        assert_eq!(cam.rotation(), Mat3::IDENTITY);

        cam.press(Vec2::ZERO);
        cam.release();
        cam.pointer_move(Vec2::new(50.0, 80.0));
        assert_eq!(cam.rotation(), Mat3::IDENTITY);
    }

    #[test]
    fn drag_deltas_are_incremental() {
        let mut dragged = CameraController::default();
        dragged.press(Vec2::new(100.0, 100.0));
        dragged.pointer_move(Vec2::new(110.0, 100.0));
        dragged.pointer_move(Vec2::new(120.0, 100.0));
        assert!(dragged.is_dragging());

        let mut direct = CameraController::default();
        direct.on_drag_delta(10.0, 0.0);
        direct.on_drag_delta(10.0, 0.0);

        assert!(dragged.rotation().abs_diff_eq(direct.rotation(), 1e-6));
    }

    #[test]
    fn view_is_inverse_of_world() {
        let mut cam = CameraController::default();
        cam.on_drag_delta(37.0, -12.0);
        cam.on_key(Direction::Forward);
        let id = cam.world_matrix() * cam.view_matrix();
        assert!(id.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn projection_tracks_aspect_ratio() {
        let settings = CameraSettings::default();
        let mut projection = Projection::new(&settings, 1280, 720);
        assert!((projection.aspect() - 16.0 / 9.0).abs() < 1e-6);
        projection.set_viewport(600, 600);
        assert_eq!(projection.aspect(), 1.0);
        projection.set_viewport(600, 0);
        assert!(projection.aspect().is_finite());
    }

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(Direction::from_key(KeyCode::KeyW), Some(Direction::Forward));
        assert_eq!(Direction::from_key(KeyCode::KeyQ), Some(Direction::Down));
        assert_eq!(Direction::from_key(KeyCode::Space), None);
    }
}
