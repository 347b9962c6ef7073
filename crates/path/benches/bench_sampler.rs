use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use skyway_path::{PathSampler, SamplerConfig, Spacing, TailOrientationPolicy, WaypointPath};

fn ring(waypoint_count: usize, radius: f32) -> Vec<Vec3> {
    (0..waypoint_count)
        .map(|i| {
            let angle = i as f32 / waypoint_count as f32 * std::f32::consts::TAU;
            Vec3::new(
                angle.cos() * radius,
                (i % 5) as f32 * 2.0,
                angle.sin() * radius,
            )
        })
        .collect()
}

fn bench_locate(waypoint_count: usize, iterations: usize) {
    let path =
        WaypointPath::from_waypoints(ring(waypoint_count, 120.0), TailOrientationPolicy::Keep)
            .expect("ring path is valid");
    let sampler = PathSampler::new(path, SamplerConfig::default());

    let start = Instant::now();
    for i in 0..iterations {
        let time = i as f32 * 0.73;
        let _ = black_box(sampler.locate(black_box(time)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  locate ({waypoint_count} waypoints, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_sample(waypoint_count: usize, spacing: Spacing, iterations: usize) {
    let path = WaypointPath::from_waypoints(
        ring(waypoint_count, 120.0),
        TailOrientationPolicy::Identity { count: 4 },
    )
    .expect("ring path is valid");
    let config = SamplerConfig {
        speed: 10.0,
        spacing,
        ..SamplerConfig::default()
    };
    let sampler = PathSampler::new(path, config);

    let start = Instant::now();
    for i in 0..iterations {
        let time = i as f32 * 0.016;
        let _ = black_box(sampler.sample(black_box(time)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  sample ({waypoint_count} waypoints, {spacing:?}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Path Sampler Benchmarks ===\n");

    println!("Segment walk:");
    bench_locate(16, 100000);
    bench_locate(256, 100000);
    bench_locate(4096, 10000);

    println!("\nFull pose sample:");
    bench_sample(16, Spacing::Uniform, 100000);
    bench_sample(16, Spacing::Centripetal, 100000);
    bench_sample(256, Spacing::Centripetal, 100000);
    bench_sample(4096, Spacing::Centripetal, 10000);

    println!("\n=== Done ===");
}
