use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest representable segment. Anything at or below this is degenerate:
/// the arc-length walk would divide by zero.
const MIN_SEGMENT_LENGTH: f32 = 1e-6;

/// Errors from waypoint path construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// Too few waypoints, or orientation keys do not line up with them.
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// Consecutive waypoints coincide, producing a zero-length segment.
    #[error("degenerate segment {index}: consecutive waypoints coincide")]
    DegenerateSegment { index: usize },
}

/// How the 4-point control window behaves at the ends of the waypoint list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Outer controls reuse the first/last waypoint at the ends.
    #[default]
    ClampToEdge,
    /// Outer controls wrap around to the other end of the list.
    Wrap,
}

/// Policy for the tail of a derived orientation key sequence.
///
/// Heading-derived keys steer hard through the end of a circuit; levelling
/// the last few keys to identity settles the pose before the loop restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailOrientationPolicy {
    /// Keep the derived keys untouched.
    #[default]
    Keep,
    /// Overwrite the last `count` keys with the identity orientation.
    Identity { count: usize },
}

impl TailOrientationPolicy {
    /// Applies the policy to a key sequence in place.
    pub fn apply(self, keys: &mut [Quat]) {
        match self {
            TailOrientationPolicy::Keep => {}
            TailOrientationPolicy::Identity { count } => {
                let start = keys.len().saturating_sub(count);
                for key in &mut keys[start..] {
                    *key = Quat::IDENTITY;
                }
            }
        }
    }
}

/// Derives one orientation key per waypoint from segment headings.
///
/// Keys accumulate the arc rotation carrying each heading onto the next,
/// starting from the model forward axis `+Z`, so a model facing `+Z` at rest
/// faces along the path at every key. The final waypoint has no outgoing
/// heading and keys to identity.
pub fn orientations_from_headings(waypoints: &[Vec3]) -> Vec<Quat> {
    if waypoints.is_empty() {
        return Vec::new();
    }
    let mut keys = Vec::with_capacity(waypoints.len());
    let mut heading = Vec3::Z;
    let mut rotation = Quat::IDENTITY;
    for pair in waypoints.windows(2) {
        let next = (pair[1] - pair[0]).normalize_or_zero();
        if next != Vec3::ZERO {
            rotation = (Quat::from_rotation_arc(heading, next) * rotation).normalize();
            heading = next;
        }
        keys.push(rotation);
    }
    keys.push(Quat::IDENTITY);
    keys
}

/// A validated waypoint path: ordered positions, aligned orientation keys,
/// cached segment lengths.
///
/// Construction is the only fallible step; afterwards the path is read-only
/// and sampling needs no further checks. Orientation keys are hemisphere
/// aligned at construction (a key may be stored negated, which is the same
/// rotation), keeping slerp and the quaternion log on the short arc.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPath {
    waypoints: Vec<Vec3>,
    orientations: Vec<Quat>,
    lengths: Vec<f32>,
    total_length: f32,
}

impl WaypointPath {
    /// Builds a path from waypoints and caller-supplied orientation keys.
    pub fn new(waypoints: Vec<Vec3>, orientations: Vec<Quat>) -> Result<Self, PathError> {
        let lengths = segment_lengths(&waypoints)?;
        if orientations.len() != waypoints.len() {
            return Err(PathError::InvalidPath(format!(
                "{} orientation keys for {} waypoints",
                orientations.len(),
                waypoints.len()
            )));
        }
        let mut orientations = orientations;
        align_hemispheres(&mut orientations);
        let total_length: f32 = lengths.iter().sum();
        tracing::debug!(
            waypoints = waypoints.len(),
            total_length = %total_length,
            "waypoint path validated"
        );
        Ok(Self {
            waypoints,
            orientations,
            lengths,
            total_length,
        })
    }

    /// Builds a path deriving orientation keys from segment headings, then
    /// applying `tail`.
    pub fn from_waypoints(
        waypoints: Vec<Vec3>,
        tail: TailOrientationPolicy,
    ) -> Result<Self, PathError> {
        let mut orientations = orientations_from_headings(&waypoints);
        tail.apply(&mut orientations);
        Self::new(waypoints, orientations)
    }

    /// Waypoint positions in path order.
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Orientation keys aligned 1:1 with waypoints.
    pub fn orientations(&self) -> &[Quat] {
        &self.orientations
    }

    /// Cached segment lengths; `lengths()[i]` spans waypoint `i` to `i + 1`.
    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    /// Sum of all segment lengths.
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Number of waypoints.
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Number of segments, one less than the waypoint count.
    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    /// Cumulative arc length from the start to waypoint `index`.
    ///
    /// At speed 1 this is the sample time at which the path passes through
    /// that waypoint.
    pub fn waypoint_distance(&self, index: usize) -> f32 {
        self.lengths[..index.min(self.lengths.len())].iter().sum()
    }

    /// Control indices for the 4-point window around `segment`.
    pub fn window(&self, segment: usize, policy: BoundaryPolicy) -> [usize; 4] {
        let last = self.waypoints.len() - 1;
        match policy {
            BoundaryPolicy::ClampToEdge => [
                segment.saturating_sub(1),
                segment.min(last),
                (segment + 1).min(last),
                (segment + 2).min(last),
            ],
            BoundaryPolicy::Wrap => {
                let n = self.waypoints.len();
                [
                    (segment + n - 1) % n,
                    segment % n,
                    (segment + 1) % n,
                    (segment + 2) % n,
                ]
            }
        }
    }
}

fn segment_lengths(waypoints: &[Vec3]) -> Result<Vec<f32>, PathError> {
    if waypoints.len() < 2 {
        return Err(PathError::InvalidPath(format!(
            "need at least 2 waypoints, got {}",
            waypoints.len()
        )));
    }
    let mut lengths = Vec::with_capacity(waypoints.len() - 1);
    for (index, pair) in waypoints.windows(2).enumerate() {
        let length = pair[0].distance(pair[1]);
        if length <= MIN_SEGMENT_LENGTH {
            return Err(PathError::DegenerateSegment { index });
        }
        lengths.push(length);
    }
    Ok(lengths)
}

/// Flips keys into the hemisphere of their predecessor so consecutive keys
/// interpolate along the short arc.
fn align_hemispheres(keys: &mut [Quat]) {
    for i in 1..keys.len() {
        if keys[i - 1].dot(keys[i]) < 0.0 {
            keys[i] = -keys[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ]
    }

    #[test]
    fn lengths_and_total() {
        let path = WaypointPath::from_waypoints(square(), TailOrientationPolicy::Keep).unwrap();
        assert_eq!(path.lengths(), &[10.0, 10.0, 10.0][..]);
        assert_eq!(path.total_length(), 30.0);
        assert_eq!(path.segment_count(), 3);
        assert_eq!(path.waypoint_count(), 4);
    }

    #[test]
    fn waypoint_distances_accumulate() {
        let path = WaypointPath::from_waypoints(square(), TailOrientationPolicy::Keep).unwrap();
        assert_eq!(path.waypoint_distance(0), 0.0);
        assert_eq!(path.waypoint_distance(1), 10.0);
        assert_eq!(path.waypoint_distance(2), 20.0);
        assert_eq!(path.waypoint_distance(3), 30.0);
    }

    #[test]
    fn single_waypoint_is_invalid() {
        let err =
            WaypointPath::from_waypoints(vec![Vec3::ZERO], TailOrientationPolicy::Keep).unwrap_err();
        assert!(matches!(err, PathError::InvalidPath(_)));
    }

    #[test]
    fn duplicate_consecutive_waypoints_are_degenerate() {
        let err = WaypointPath::from_waypoints(
            vec![Vec3::ZERO, Vec3::ZERO, Vec3::X],
            TailOrientationPolicy::Keep,
        )
        .unwrap_err();
        assert_eq!(err, PathError::DegenerateSegment { index: 0 });
    }

    #[test]
    fn orientation_count_must_match() {
        let err = WaypointPath::new(square(), vec![Quat::IDENTITY; 3]).unwrap_err();
        assert!(matches!(err, PathError::InvalidPath(_)));
    }

    #[test]
    fn clamped_window_reuses_edge_points() {
        let path = WaypointPath::from_waypoints(square(), TailOrientationPolicy::Keep).unwrap();
        assert_eq!(path.window(0, BoundaryPolicy::ClampToEdge), [0, 0, 1, 2]);
        assert_eq!(path.window(1, BoundaryPolicy::ClampToEdge), [0, 1, 2, 3]);
        assert_eq!(path.window(2, BoundaryPolicy::ClampToEdge), [1, 2, 3, 3]);
    }

    #[test]
    fn wrapped_window_closes_the_loop() {
        let path = WaypointPath::from_waypoints(square(), TailOrientationPolicy::Keep).unwrap();
        assert_eq!(path.window(0, BoundaryPolicy::Wrap), [3, 0, 1, 2]);
        assert_eq!(path.window(2, BoundaryPolicy::Wrap), [1, 2, 3, 0]);
    }

    #[test]
    fn derived_keys_rotate_forward_onto_headings() {
        let waypoints = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(4.0, 0.0, 5.0),
            Vec3::new(4.0, 0.0, 9.0),
        ];
        let keys = orientations_from_headings(&waypoints);
        assert_eq!(keys.len(), waypoints.len());
        for (i, pair) in waypoints.windows(2).enumerate() {
            let heading = (pair[1] - pair[0]).normalize();
            let steered = keys[i] * Vec3::Z;
            assert!(steered.distance(heading) < 1e-5, "key {i}");
        }
        assert_eq!(keys[waypoints.len() - 1], Quat::IDENTITY);
    }

    #[test]
    fn straight_path_keys_are_identity() {
        let keys = orientations_from_headings(&[Vec3::ZERO, Vec3::Z * 3.0, Vec3::Z * 8.0]);
        for key in keys {
            assert!(key.dot(Quat::IDENTITY).abs() > 1.0 - 1e-6);
        }
    }

    #[test]
    fn identity_tail_levels_last_keys() {
        let mut keys = vec![Quat::from_rotation_y(1.0); 5];
        TailOrientationPolicy::Identity { count: 2 }.apply(&mut keys);
        assert_ne!(keys[2], Quat::IDENTITY);
        assert_eq!(keys[3], Quat::IDENTITY);
        assert_eq!(keys[4], Quat::IDENTITY);
    }

    #[test]
    fn identity_tail_larger_than_sequence_levels_everything() {
        let mut keys = vec![Quat::from_rotation_y(1.0); 3];
        TailOrientationPolicy::Identity { count: 10 }.apply(&mut keys);
        assert!(keys.iter().all(|k| *k == Quat::IDENTITY));
    }

    #[test]
    fn construction_aligns_hemispheres() {
        let path = WaypointPath::new(
            vec![Vec3::ZERO, Vec3::X * 5.0, Vec3::X * 9.0],
            vec![Quat::IDENTITY, -Quat::IDENTITY, Quat::IDENTITY],
        )
        .unwrap();
        for pair in path.orientations().windows(2) {
            assert!(pair[0].dot(pair[1]) >= 0.0);
        }
    }
}
