use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use skyway_common::Transform;
use skyway_path::PathSampler;

/// Chase camera trailing a path-driven pose at a fixed local offset.
///
/// The view is composed as `translate(-offset) * view_rotation *
/// pose_matrix^-1`: the world is carried into the followed pose's local
/// frame, turned by the fixed view rotation, then pushed back by the offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowCamera {
    /// Offset from the followed pose, in its local space.
    pub offset: Vec3,
    /// Seconds the camera trails behind the followed clock.
    pub trail: f32,
    /// Fixed view yaw in radians; half a turn looks back along the path.
    pub view_yaw: f32,
    /// Fixed view pitch in radians; slightly negative looks down onto
    /// the followed pose.
    pub view_pitch: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(2.0, 3.0, 8.0),
            trail: 0.0,
            view_yaw: std::f32::consts::PI,
            view_pitch: -0.0132,
        }
    }
}

impl FollowCamera {
    /// World-space eye position for a followed pose.
    pub fn eye(&self, pose: &Transform) -> Vec3 {
        pose.to_matrix().transform_point3(self.offset)
    }

    /// Fixed view rotation applied in the followed pose's local space.
    pub fn view_rotation(&self) -> Quat {
        (Quat::from_rotation_x(self.view_pitch) * Quat::from_rotation_y(self.view_yaw)).normalize()
    }

    /// View matrix looking at the followed pose from the local offset.
    pub fn view_matrix(&self, pose: &Transform) -> Mat4 {
        Mat4::from_translation(-self.offset)
            * Mat4::from_quat(self.view_rotation())
            * pose.to_matrix().inverse()
    }

    /// Samples the followed pose at `time` minus the trail and returns the
    /// eye position plus view matrix.
    pub fn follow(&self, sampler: &PathSampler, time: f32) -> (Vec3, Mat4) {
        let pose = sampler.sample(time - self.trail);
        (self.eye(&pose), self.view_matrix(&pose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyway_path::{SamplerConfig, TailOrientationPolicy, WaypointPath};

    fn sampler() -> PathSampler {
        let path = WaypointPath::from_waypoints(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 10.0, 0.0),
                Vec3::new(0.0, 10.0, 0.0),
            ],
            TailOrientationPolicy::Keep,
        )
        .unwrap();
        PathSampler::new(path, SamplerConfig::default())
    }

    #[test]
    fn eye_of_identity_pose_is_the_offset() {
        let cam = FollowCamera::default();
        let eye = cam.eye(&Transform::default());
        assert!(eye.distance(cam.offset) < 1e-6);
    }

    #[test]
    fn identity_pose_view_is_offset_and_rotation_only() {
        let cam = FollowCamera::default();
        let view = cam.view_matrix(&Transform::default());
        let expected =
            Mat4::from_translation(-cam.offset) * Mat4::from_quat(cam.view_rotation());
        assert!(view.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn eye_tracks_the_sampled_pose() {
        let cam = FollowCamera::default();
        let sampler = sampler();
        let (eye, view) = cam.follow(&sampler, 4.0);
        let pose = sampler.sample(4.0);
        assert!(eye.distance(cam.eye(&pose)) < 1e-5);
        assert!(!view.col(0).x.is_nan());
    }

    #[test]
    fn trail_samples_behind_the_clock() {
        let cam = FollowCamera {
            trail: 2.0,
            ..FollowCamera::default()
        };
        let sampler = sampler();
        let (eye_trailed, _) = cam.follow(&sampler, 6.0);
        let pose_behind = sampler.sample(4.0);
        assert!(eye_trailed.distance(cam.eye(&pose_behind)) < 1e-5);
    }

    #[test]
    fn followed_pose_sits_at_minus_offset_in_view_space() {
        let cam = FollowCamera::default();
        let sampler = sampler();
        let pose = sampler.sample(7.0);
        let view = cam.view_matrix(&pose);
        // The pose collapses to its local origin before the final translate,
        // independent of the fixed view rotation.
        let in_view = view.transform_point3(pose.position);
        assert!(in_view.distance(-cam.offset) < 1e-4);
    }
}
