use glam::{Mat4, Quat, Vec2, Vec3};

/// Free-look camera with position, yaw, pitch, and movement parameters.
///
/// Orientation is pitch-about-X composed after yaw-about-Y, so mouse look
/// stays roll-free. The view matrix is `rotation * translate(-position)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, -5.0),
            yaw: 2.93,
            pitch: -0.0132,
            speed: 2.0,
            sensitivity: 0.03,
        }
    }
}

impl FreeCamera {
    /// World-to-view rotation for the current yaw and pitch.
    pub fn view_rotation(&self) -> Quat {
        (Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw)).normalize()
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.view_rotation().inverse() * Vec3::NEG_Z
    }

    /// Unit vector to the camera's right.
    pub fn right(&self) -> Vec3 {
        self.view_rotation().inverse() * Vec3::X
    }

    pub fn move_forward(&mut self, dt: f32) {
        self.position += self.forward() * self.speed * dt;
    }

    pub fn move_backward(&mut self, dt: f32) {
        self.position -= self.forward() * self.speed * dt;
    }

    pub fn move_left(&mut self, dt: f32) {
        self.position -= self.right() * self.speed * dt;
    }

    pub fn move_right(&mut self, dt: f32) {
        self.position += self.right() * self.speed * dt;
    }

    /// Applies an incremental rotation, clamping pitch short of the poles.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch =
            (self.pitch + pitch_delta).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.view_rotation()) * Mat4::from_translation(-self.position)
    }
}

/// Incremental (yaw, pitch) rotation for a pointer drag.
///
/// Pure function of the previous and current pointer positions; feed the
/// result to [`FreeCamera::rotate`]. No frame-to-frame accumulator state.
pub fn drag_delta(previous: Vec2, current: Vec2, sensitivity: f32) -> (f32, f32) {
    let delta = current - previous;
    (delta.x * sensitivity, delta.y * sensitivity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_has_valid_view() {
        let cam = FreeCamera::default();
        let view = cam.view_matrix();
        assert!(!view.col(0).x.is_nan());
    }

    #[test]
    fn view_sends_camera_position_to_origin() {
        let cam = FreeCamera {
            position: Vec3::new(3.0, 4.0, -5.0),
            yaw: 0.8,
            pitch: -0.2,
            ..FreeCamera::default()
        };
        let at_origin = cam.view_matrix().transform_point3(cam.position);
        assert!(at_origin.length() < 1e-4);
    }

    #[test]
    fn level_camera_looks_down_negative_z() {
        let cam = FreeCamera {
            yaw: 0.0,
            pitch: 0.0,
            ..FreeCamera::default()
        };
        assert!(cam.forward().distance(Vec3::NEG_Z) < 1e-5);
        assert!(cam.right().distance(Vec3::X) < 1e-5);
    }

    #[test]
    fn movement_walks_along_forward_axis() {
        let mut cam = FreeCamera::default();
        let start = cam.position;
        let forward = cam.forward();
        cam.move_forward(1.0);
        let moved = cam.position - start;
        assert!(moved.normalize().distance(forward) < 1e-5);
        assert!((moved.length() - cam.speed).abs() < 1e-5);
    }

    #[test]
    fn rotate_clamps_pitch() {
        let mut cam = FreeCamera::default();
        cam.rotate(0.0, 10.0);
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
        cam.rotate(0.0, -20.0);
        assert!(cam.pitch >= -89.0_f32.to_radians() - 1e-6);
    }

    #[test]
    fn drag_delta_is_zero_for_stationary_pointer() {
        let p = Vec2::new(120.0, 45.0);
        assert_eq!(drag_delta(p, p, 0.03), (0.0, 0.0));
    }

    #[test]
    fn drag_delta_scales_with_sensitivity() {
        let (yaw, pitch) = drag_delta(Vec2::ZERO, Vec2::new(10.0, -4.0), 0.03);
        assert!((yaw - 0.3).abs() < 1e-6);
        assert!((pitch + 0.12).abs() < 1e-6);
    }
}
