use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::Vec3;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use skyway_assets::{TrackFile, demo_track};
use skyway_camera::{CameraMode, CameraRig, FreeCamera};
use skyway_common::Transform;
use skyway_input::{Action, Keymap, step_waypoint};
use skyway_path::WaypointPath;
use skyway_render::{RenderView, Renderer, TextFrameRenderer};
use skyway_scene::SceneGraph;

/// Offset used when teleporting the free camera to a waypoint.
const TELEPORT_OFFSET: Vec3 = Vec3::new(-3.0, 20.0, -3.0);
/// Offset above the first waypoint for the jump-to-start action.
const FIRST_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 0.0);
/// Offset above the first waypoint where the free camera spawns.
const SPAWN_OFFSET: Vec3 = Vec3::new(0.0, 10.0, -5.0);

#[derive(Parser)]
#[command(name = "skyway-cli", about = "CLI driver for skyway track demos")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Load a track and print its validated path summary
    Validate {
        /// Track file (.yaml/.yml/.json); built-in demo track when omitted
        track: Option<PathBuf>,
    },
    /// Print sampled poses along a track
    Sample {
        /// Track file (.yaml/.yml/.json); built-in demo track when omitted
        track: Option<PathBuf>,
        /// Clock of the first sample, in seconds
        #[arg(short, long, default_value = "0")]
        time: f32,
        /// Number of samples to print
        #[arg(short, long, default_value = "1")]
        count: usize,
        /// Samples per second of clock time
        #[arg(short, long, default_value = "60")]
        rate: f32,
        /// Emit one JSON object per sample instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run a headless tour: vehicle convoy plus camera, frame by frame
    Tour {
        /// Track file (.yaml/.yml/.json); built-in demo track when omitted
        track: Option<PathBuf>,
        /// Number of frames to render
        #[arg(short, long, default_value = "5")]
        frames: u32,
        /// Frames per second of clock time
        #[arg(short, long, default_value = "10")]
        rate: f32,
        /// Start in free-look instead of the follow camera
        #[arg(long)]
        free: bool,
        /// Scripted key presses fed through the keymap, one per frame
        #[arg(short, long, default_value = "")]
        keys: String,
    },
}

/// One sampled pose, shaped for JSON-lines output.
#[derive(Serialize)]
struct SampleRecord {
    time: f32,
    position: [f32; 3],
    rotation: [f32; 4],
}

impl SampleRecord {
    fn new(time: f32, pose: &Transform) -> Self {
        let p = pose.position;
        let r = pose.rotation;
        Self {
            time,
            position: [p.x, p.y, p.z],
            rotation: [r.x, r.y, r.z, r.w],
        }
    }
}

fn load_track(path: Option<PathBuf>) -> anyhow::Result<TrackFile> {
    match path {
        Some(path) => Ok(TrackFile::load(path)?),
        None => Ok(demo_track()),
    }
}

/// Applies one mapped action to the tour's camera state.
fn apply_action(
    action: Action,
    rig: &mut CameraRig,
    waypoint_index: &mut usize,
    path: &WaypointPath,
    dt: f32,
) {
    let waypoints = path.waypoints();
    match action {
        Action::MoveForward => rig.free.move_forward(dt),
        Action::MoveBackward => rig.free.move_backward(dt),
        Action::MoveLeft => rig.free.move_left(dt),
        Action::MoveRight => rig.free.move_right(dt),
        Action::ToggleFollow => rig.toggle(),
        Action::NextWaypoint => {
            *waypoint_index = step_waypoint(*waypoint_index, waypoints.len(), 1);
            rig.free.position = waypoints[*waypoint_index] + TELEPORT_OFFSET;
        }
        Action::PrevWaypoint => {
            *waypoint_index = step_waypoint(*waypoint_index, waypoints.len(), -1);
            rig.free.position = waypoints[*waypoint_index] + TELEPORT_OFFSET;
        }
        Action::FirstWaypoint => {
            *waypoint_index = 0;
            rig.free.position = waypoints[0] + FIRST_OFFSET;
        }
        Action::ResetCamera => {
            rig.free = FreeCamera {
                position: waypoints[0] + SPAWN_OFFSET,
                ..FreeCamera::default()
            };
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("skyway-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("path: {}", skyway_path::crate_info());
            println!("camera: {}", skyway_camera::crate_info());
            println!("input: {}", skyway_input::crate_info());
            println!("scene: {}", skyway_scene::crate_info());
            println!("render: {}", skyway_render::crate_info());
            println!("assets: {}", skyway_assets::crate_info());
        }
        Commands::Validate { track } => {
            let track = load_track(track)?;
            let sampler = track.build_sampler()?;
            let path = sampler.path();

            println!("Track: {} [{}]", track.name, track.fingerprint());
            println!("Waypoints: {}", path.waypoint_count());
            println!("Segments: {}", path.segment_count());
            println!("Total length: {:.2}", path.total_length());
            println!(
                "Speed: {} ({:?} spacing, {:?} boundary)",
                track.speed, track.spacing, track.boundary
            );
            println!("Period: {:.2} s", sampler.period());
            println!(
                "Convoy: {} vehicles, {:.1} s apart, {:.1} s lead",
                track.convoy.vehicles, track.convoy.spacing, track.convoy.lead
            );
            for (i, point) in path.waypoints().iter().enumerate() {
                println!(
                    "  wp{i:02}  d={:8.2}  ({:9.2}, {:9.2}, {:9.2})",
                    path.waypoint_distance(i),
                    point.x,
                    point.y,
                    point.z
                );
            }
        }
        Commands::Sample {
            track,
            time,
            count,
            rate,
            json,
        } => {
            anyhow::ensure!(rate > 0.0, "sample rate must be positive");
            let track = load_track(track)?;
            let sampler = track.build_sampler()?;

            let step = 1.0 / rate;
            for i in 0..count {
                let t = time + i as f32 * step;
                let pose = sampler.sample(t);
                if json {
                    println!("{}", serde_json::to_string(&SampleRecord::new(t, &pose))?);
                } else {
                    let p = pose.position;
                    let r = pose.rotation;
                    println!(
                        "t={t:8.3}  pos=({:9.2}, {:9.2}, {:9.2})  rot=({:+.3}, {:+.3}, {:+.3}, {:+.3})",
                        p.x, p.y, p.z, r.x, r.y, r.z, r.w
                    );
                }
            }
        }
        Commands::Tour {
            track,
            frames,
            rate,
            free,
            keys,
        } => {
            anyhow::ensure!(rate > 0.0, "frame rate must be positive");
            let track = load_track(track)?;
            let sampler = track.build_sampler()?;
            let dt = 1.0 / rate;

            let mut scene = SceneGraph::new();
            let root = scene.add_root("world", Transform::default());
            scene.add_child("city", root, Transform::default())?;
            let mut vehicles = Vec::with_capacity(track.convoy.vehicles);
            for i in 0..track.convoy.vehicles {
                let node = scene.add_child(format!("car.{i}"), root, Transform::default())?;
                vehicles.push(node);
            }

            let mut rig = CameraRig {
                follow: track.follow,
                mode: if free {
                    CameraMode::Free
                } else {
                    CameraMode::Follow
                },
                ..CameraRig::default()
            };
            rig.free.position = sampler.path().waypoints()[0] + SPAWN_OFFSET;

            let keymap = Keymap::default();
            let mut key_feed = keys.chars();
            let mut waypoint_index = 0usize;
            let renderer = TextFrameRenderer::new();

            let mut clock = 0.0f32;
            for frame in 0..frames {
                let _span = tracing::info_span!("tour_frame", frame).entered();

                if let Some(key) = key_feed.next() {
                    match keymap.action(key) {
                        Some(action) => {
                            tracing::debug!(%key, ?action, "applying scripted key");
                            apply_action(action, &mut rig, &mut waypoint_index, sampler.path(), dt);
                        }
                        None => tracing::debug!(%key, "unbound key ignored"),
                    }
                }

                for (i, &node) in vehicles.iter().enumerate() {
                    let pose = sampler.sample(track.convoy.vehicle_time(i, clock));
                    scene.set_local(node, pose);
                }

                let (eye, view) = rig.view(&sampler, clock);
                let frame_view = RenderView {
                    eye,
                    view,
                    ..RenderView::default()
                };
                println!("--- frame {frame} clock={clock:.2}s mode={:?} ---", rig.mode);
                print!("{}", renderer.render(&scene, &frame_view));

                clock += dt;
            }
        }
    }

    Ok(())
}
