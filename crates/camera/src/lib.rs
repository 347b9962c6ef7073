//! Camera rigs: free-look state and the path-trailing follow camera.
//!
//! # Invariants
//! - Camera state is explicit and owned by the caller; no file-scope
//!   accumulators.
//! - Pointer-drag rotation is a pure function of two pointer positions.
//! - The follow camera only consumes sampled poses; it never drives the
//!   path itself.

mod follow;
mod free;
mod rig;

pub use follow::FollowCamera;
pub use free::{FreeCamera, drag_delta};
pub use rig::{CameraMode, CameraRig};

pub fn crate_info() -> &'static str {
    "skyway-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}
