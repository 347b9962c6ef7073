use glam::Mat4;
use serde::{Deserialize, Serialize};
use skyway_common::Transform;

use crate::path::{BoundaryPolicy, WaypointPath};
use crate::spline::{self, Spacing};

/// Where a query lands on the path: active segment plus local parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCursor {
    /// Index of the active segment.
    pub segment: usize,
    /// Local interpolation parameter within the segment, in [0, 1].
    pub t: f32,
}

/// Sampling configuration: traversal speed plus spline policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Multiplier applied to query time before arc-length reduction.
    /// Negative values traverse the path backwards.
    pub speed: f32,
    /// Knot spacing for the position spline.
    pub spacing: Spacing,
    /// Control-window behavior at the ends of the waypoint list.
    pub boundary: BoundaryPolicy,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            spacing: Spacing::Centripetal,
            boundary: BoundaryPolicy::ClampToEdge,
        }
    }
}

/// Maps a time value to a pose along a waypoint path.
///
/// Pure after construction: each call reduces the scaled time modulo the
/// total path length, locates the active segment, and interpolates position
/// and orientation over the segment's 4-point control window.
#[derive(Debug, Clone)]
pub struct PathSampler {
    path: WaypointPath,
    config: SamplerConfig,
}

impl PathSampler {
    pub fn new(path: WaypointPath, config: SamplerConfig) -> Self {
        Self { path, config }
    }

    /// The sampled path.
    pub fn path(&self) -> &WaypointPath {
        &self.path
    }

    /// The sampling configuration.
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Time after which the trajectory repeats: `total_length / |speed|`.
    /// Infinite for speed 0 (the pose parks at the first waypoint).
    pub fn period(&self) -> f32 {
        self.path.total_length() / self.config.speed.abs()
    }

    /// Locates the active segment and local parameter for a query time.
    ///
    /// The scaled time is reduced with a non-negative remainder, so negative
    /// time or speed walks the loop backwards instead of underflowing. If
    /// float error ever walks past the final segment, the cursor clamps to
    /// that segment's end rather than running off the path.
    pub fn locate(&self, time: f32) -> PathCursor {
        let mut remaining = (time * self.config.speed).rem_euclid(self.path.total_length());
        let lengths = self.path.lengths();
        for (segment, &length) in lengths.iter().enumerate() {
            if remaining < length {
                return PathCursor {
                    segment,
                    t: remaining / length,
                };
            }
            remaining -= length;
        }
        PathCursor {
            segment: lengths.len() - 1,
            t: 1.0,
        }
    }

    /// Samples the pose at `time`.
    pub fn sample(&self, time: f32) -> Transform {
        self.sample_cursor(self.locate(time))
    }

    /// Samples the pose at an already-located cursor.
    pub fn sample_cursor(&self, cursor: PathCursor) -> Transform {
        let [i0, i1, i2, i3] = self.path.window(cursor.segment, self.config.boundary);

        let points = self.path.waypoints();
        let position = spline::catmull_rom(
            points[i0],
            points[i1],
            points[i2],
            points[i3],
            cursor.t,
            self.config.spacing,
        );

        let keys = self.path.orientations();
        let a1 = spline::squad_inner(keys[i0], keys[i1], keys[i2]);
        let a2 = spline::squad_inner(keys[i1], keys[i2], keys[i3]);
        let rotation = spline::squad(keys[i1], keys[i2], a1, a2, cursor.t);

        Transform::from_position_rotation(position, rotation)
    }

    /// Sampled pose as the composed matrix `translation * rotation`.
    pub fn sample_matrix(&self, time: f32) -> Mat4 {
        self.sample(time).to_matrix()
    }
}
