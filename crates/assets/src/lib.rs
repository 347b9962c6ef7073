//! Track files: loadable waypoint circuits plus the demo parameters that
//! ride along with them.
//!
//! A track is the on-disk form of everything the tour needs: the ordered
//! waypoint list, sampling configuration, follow-camera placement and convoy
//! layout. Parsing is glue, not core: [`TrackFile::build_sampler`] funnels
//! into validated path construction, so a malformed track fails fast with a
//! descriptive error instead of producing a degraded path.
//!
//! # Layout
//! Tracks are stored as YAML (`.yaml`/`.yml`) or JSON (`.json`); the format
//! is chosen by file extension on both load and save.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use skyway_camera::FollowCamera;
use skyway_path::{
    BoundaryPolicy, PathError, PathSampler, SamplerConfig, Spacing, TailOrientationPolicy,
    WaypointPath,
};

/// Content fingerprint computed from the track data.
///
/// Two tracks with the same content hash to the same fingerprint, wherever
/// the files live. Shown in validation output and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackFingerprint(pub u64);

impl std::fmt::Display for TrackFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Errors from track file operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown track format {0:?} (expected .yaml, .yml or .json)")]
    UnknownFormat(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Vehicle convoy layout along the track.
///
/// Vehicle `i` samples the shared path at `clock + lead - i * spacing`, so
/// the whole convoy is staggered behind one lead vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvoyParams {
    /// Number of vehicles driven along the path.
    pub vehicles: usize,
    /// Seconds between consecutive vehicles.
    pub spacing: f32,
    /// Seconds the lead vehicle runs ahead of the tour clock.
    pub lead: f32,
}

impl Default for ConvoyParams {
    fn default() -> Self {
        Self {
            vehicles: 30,
            spacing: 3.0,
            lead: 15.0,
        }
    }
}

impl ConvoyParams {
    /// Sample time for vehicle `index` at the given tour clock.
    pub fn vehicle_time(&self, index: usize, clock: f32) -> f32 {
        clock + self.lead - index as f32 * self.spacing
    }
}

/// A loadable track: waypoints plus sampling and demo parameters.
///
/// Every field except the waypoints has a default, so a minimal track file
/// is just a name and a coordinate list. The waypoint list itself is not
/// validated here; [`TrackFile::build_path`] is the validation funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackFile {
    /// Track name, shown in validation output.
    pub name: String,
    /// Ordered waypoint positions in world space.
    pub waypoints: Vec<Vec3>,
    /// Traversal speed multiplier; negative runs the circuit backwards.
    pub speed: f32,
    /// Knot spacing for the position spline.
    pub spacing: Spacing,
    /// Control-window behavior at the ends of the waypoint list.
    pub boundary: BoundaryPolicy,
    /// Tail policy applied to the derived orientation keys.
    pub tail: TailOrientationPolicy,
    /// Follow-camera placement relative to the followed pose.
    pub follow: FollowCamera,
    /// Convoy layout for the tour.
    pub convoy: ConvoyParams,
}

impl Default for TrackFile {
    fn default() -> Self {
        Self {
            name: "unnamed".into(),
            waypoints: Vec::new(),
            speed: 1.0,
            spacing: Spacing::default(),
            boundary: BoundaryPolicy::default(),
            tail: TailOrientationPolicy::default(),
            follow: FollowCamera::default(),
            convoy: ConvoyParams::default(),
        }
    }
}

impl TrackFile {
    /// Loads a track, choosing the format by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let track: Self = match extension_of(path)? {
            TrackFormat::Yaml => {
                let data = std::fs::read_to_string(path)?;
                serde_yaml::from_str(&data)?
            }
            TrackFormat::Json => {
                let file = std::fs::File::open(path)?;
                serde_json::from_reader(file)?
            }
        };
        tracing::debug!(
            path = %path.display(),
            name = %track.name,
            waypoints = track.waypoints.len(),
            "track loaded"
        );
        Ok(track)
    }

    /// Saves the track, choosing the format by file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        match extension_of(path)? {
            TrackFormat::Yaml => {
                let file = std::fs::File::create(path)?;
                serde_yaml::to_writer(file, self)?;
            }
            TrackFormat::Json => {
                let file = std::fs::File::create(path)?;
                serde_json::to_writer_pretty(file, self)?;
            }
        }
        tracing::debug!(path = %path.display(), name = %self.name, "track saved");
        Ok(())
    }

    /// Content fingerprint over every field of the track.
    pub fn fingerprint(&self) -> TrackFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        for point in &self.waypoints {
            hasher.update(point.x.to_le_bytes());
            hasher.update(point.y.to_le_bytes());
            hasher.update(point.z.to_le_bytes());
        }
        hasher.update(self.speed.to_le_bytes());
        hasher.update(self.spacing.alpha().to_le_bytes());
        let boundary_tag: u8 = match self.boundary {
            BoundaryPolicy::ClampToEdge => 0,
            BoundaryPolicy::Wrap => 1,
        };
        hasher.update([boundary_tag]);
        match self.tail {
            TailOrientationPolicy::Keep => hasher.update([0u8; 9]),
            TailOrientationPolicy::Identity { count } => {
                hasher.update([1u8]);
                hasher.update((count as u64).to_le_bytes());
            }
        }
        hasher.update(self.follow.offset.x.to_le_bytes());
        hasher.update(self.follow.offset.y.to_le_bytes());
        hasher.update(self.follow.offset.z.to_le_bytes());
        hasher.update(self.follow.trail.to_le_bytes());
        hasher.update(self.follow.view_yaw.to_le_bytes());
        hasher.update(self.follow.view_pitch.to_le_bytes());
        hasher.update((self.convoy.vehicles as u64).to_le_bytes());
        hasher.update(self.convoy.spacing.to_le_bytes());
        hasher.update(self.convoy.lead.to_le_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        TrackFingerprint(u64::from_le_bytes(bytes))
    }

    /// Sampler configuration described by this track.
    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            speed: self.speed,
            spacing: self.spacing,
            boundary: self.boundary,
        }
    }

    /// Validates the waypoints into a path, deriving orientation keys.
    pub fn build_path(&self) -> Result<WaypointPath, AssetError> {
        Ok(WaypointPath::from_waypoints(
            self.waypoints.clone(),
            self.tail,
        )?)
    }

    /// Validates the track into a ready-to-query sampler.
    pub fn build_sampler(&self) -> Result<PathSampler, AssetError> {
        Ok(PathSampler::new(self.build_path()?, self.sampler_config()))
    }
}

enum TrackFormat {
    Yaml,
    Json,
}

fn extension_of(path: &Path) -> Result<TrackFormat, AssetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "yaml" | "yml" => Ok(TrackFormat::Yaml),
        "json" => Ok(TrackFormat::Json),
        _ => Err(AssetError::UnknownFormat(ext)),
    }
}

/// The built-in city circuit: the 17-waypoint loop the demo flies.
///
/// Climbs out of the corner of the city, rings the center and descends onto
/// its own tail, with the last four orientation keys levelled so the loop
/// restart does not snap.
pub fn demo_track() -> TrackFile {
    TrackFile {
        name: "city-circuit".into(),
        waypoints: vec![
            Vec3::new(-711.745, 89.9272, -626.537),
            Vec3::new(-687.635, 100.428, -503.943),
            Vec3::new(-667.635, 128.428, -433.943),
            Vec3::new(-547.654, 180.445, -401.846),
            Vec3::new(-365.357, 261.268, -304.93),
            Vec3::new(-346.51, 146.605, -85.3702),
            Vec3::new(-461.105, 120.275, 115.596),
            Vec3::new(-507.395, 76.497, 338.408),
            Vec3::new(-181.343, 58.7994, 403.918),
            Vec3::new(-148.073, 72.7797, 522.283),
            Vec3::new(-76.8437, 85.1488, 524.396),
            Vec3::new(-30.0008, 81.3007, 367.907),
            Vec3::new(20.808, 117.73, 109.607),
            Vec3::new(8.72873, 135.983, -130.435),
            Vec3::new(8.72873, 115.983, -132.435),
            Vec3::new(8.72873, 104.983, -132.435),
            Vec3::new(8.72873, 100.983, -132.435),
        ],
        speed: 1.0,
        tail: TailOrientationPolicy::Identity { count: 4 },
        ..TrackFile::default()
    }
}

pub fn crate_info() -> &'static str {
    "skyway-assets v0.1.0"
}
