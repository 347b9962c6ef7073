//! Path Sampler: a sparse waypoint list becomes a continuous, looping
//! pose trajectory.
//!
//! # Invariants
//! - A constructed path is immutable: segment lengths and orientation keys
//!   are validated and cached once; sampling never mutates.
//! - Query time is reduced modulo the total path length with a non-negative
//!   remainder, so every real time and either traversal direction is valid.
//! - The sampled pose is continuous across segment boundaries and periodic
//!   in time.

mod path;
mod sampler;
pub mod spline;

pub use path::{
    BoundaryPolicy, PathError, TailOrientationPolicy, WaypointPath, orientations_from_headings,
};
pub use sampler::{PathCursor, PathSampler, SamplerConfig};
pub use spline::Spacing;

pub fn crate_info() -> &'static str {
    "skyway-path v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("path"));
    }
}
