use glam::{Mat4, Vec3};
use skyway_path::PathSampler;

use crate::follow::FollowCamera;
use crate::free::FreeCamera;

/// Which transform source drives the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Free,
    Follow,
}

/// Both camera states plus the active mode.
///
/// Toggling keeps the inactive camera's state, so flipping back resumes
/// where the viewer left off.
#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    pub free: FreeCamera,
    pub follow: FollowCamera,
    pub mode: CameraMode,
}

impl CameraRig {
    /// Flips between free-look and follow mode.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            CameraMode::Free => CameraMode::Follow,
            CameraMode::Follow => CameraMode::Free,
        };
    }

    /// Eye position and view matrix for the active mode.
    ///
    /// Follow mode samples `sampler` at `time`; free mode ignores both.
    pub fn view(&self, sampler: &PathSampler, time: f32) -> (Vec3, Mat4) {
        match self.mode {
            CameraMode::Free => (self.free.position, self.free.view_matrix()),
            CameraMode::Follow => self.follow.follow(sampler, time),
        }
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
            ],
            TailOrientationPolicy::Keep,
        )
        .unwrap();
        PathSampler::new(path, SamplerConfig::default())
    }

    #[test]
    fn starts_in_free_mode() {
        let rig = CameraRig::default();
        assert_eq!(rig.mode, CameraMode::Free);
    }

    #[test]
    fn toggle_round_trips() {
        let mut rig = CameraRig::default();
        rig.toggle();
        assert_eq!(rig.mode, CameraMode::Follow);
        rig.toggle();
        assert_eq!(rig.mode, CameraMode::Free);
    }

    #[test]
    fn free_mode_uses_the_free_camera() {
        let rig = CameraRig::default();
        let (eye, view) = rig.view(&sampler(), 3.0);
        assert_eq!(eye, rig.free.position);
        assert!(view.abs_diff_eq(rig.free.view_matrix(), 1e-6));
    }

    #[test]
    fn follow_mode_tracks_the_path() {
        let mut rig = CameraRig::default();
        rig.toggle();
        let sampler = sampler();
        let (eye, _) = rig.view(&sampler, 3.0);
        let pose = sampler.sample(3.0);
        assert!(eye.distance(rig.follow.eye(&pose)) < 1e-5);
    }

    #[test]
    fn toggling_preserves_free_camera_state() {
        let mut rig = CameraRig::default();
        rig.free.position = Vec3::new(9.0, 9.0, 9.0);
        rig.toggle();
        rig.toggle();
        assert_eq!(rig.free.position, Vec3::new(9.0, 9.0, 9.0));
    }
}
