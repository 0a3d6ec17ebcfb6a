//! Traversal Comparison
//!
//! Runs the same scene through every traversal, vertex sharing and seed
//! fallback combination and checks that the meshes agree.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin traversal_comparison -- 96
//! ```

use std::env;

use instant::Instant;

use isoblob_core::{Point3, Skeleton};
use isoblob_rs::{
    ExtractionConfig, Extractor, GridConfig, Mesh, PassStats, SeedFallback, Traversal,
    VertexDedup,
};

/// Two clusters far enough apart to mesh as separate shells.
fn scene() -> Vec<Skeleton> {
    let mut skeletons = Vec::new();
    for (cx, n) in [(-0.6f32, 3), (0.6, 4)] {
        for i in 0..n {
            let a = i as f32 / n as f32 * std::f32::consts::TAU;
            let p = Point3::new(cx + a.cos() * 0.1, a.sin() * 0.1, 0.05 * i as f32);
            skeletons.push(Skeleton::new(p).with_scale(0.7));
        }
    }
    skeletons
}

/// Sorted bit patterns of every triangle's sorted corners.
fn triangle_set(mesh: &Mesh) -> Vec<[[u32; 3]; 3]> {
    let mut set: Vec<[[u32; 3]; 3]> = mesh
        .triangle_positions()
        .map(|tri| {
            let mut tri = tri.map(|p| p.as_array().map(f32::to_bits));
            tri.sort_unstable();
            tri
        })
        .collect();
    set.sort_unstable();
    set
}

fn run(config: ExtractionConfig, skeletons: &[Skeleton]) -> (Mesh, PassStats, f64) {
    let extractor = match Extractor::new(config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let start = Instant::now();
    match extractor.extract_with_stats(skeletons) {
        Ok((mesh, stats)) => (mesh, stats, start.elapsed().as_secs_f64()),
        Err(e) => {
            eprintln!("Extraction failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          isoblob Traversal Comparison");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let size: u32 = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(96);
    let grid = GridConfig::new(size, 2.4 / size as f32, Point3::splat(0.0));
    let skeletons = scene();

    println!("  Grid:            {}³ points ({} cubes)", size, grid.cube_count());
    println!("  Skeletons:       {}", skeletons.len());
    println!();

    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Strategy Runs                                               │");
    println!("└─────────────────────────────────────────────────────────────┘");
    println!(
        "  {:<38} {:>8} {:>9} {:>9} {:>8}",
        "strategy", "tris", "evals", "cubes", "ms"
    );

    let (reference, _, _) = run(
        ExtractionConfig::new(grid).with_traversal(Traversal::Exhaustive),
        &skeletons,
    );
    let reference_set = triangle_set(&reference);

    let mut mismatches = 0;
    for traversal in [Traversal::Exhaustive, Traversal::FloodFill] {
        for dedup in [VertexDedup::EdgeMap, VertexDedup::NeighborProbe] {
            for fallback in [
                SeedFallback::Origin,
                SeedFallback::AxisSearch,
                SeedFallback::BoundingBox,
            ] {
                if traversal == Traversal::Exhaustive && fallback != SeedFallback::BoundingBox {
                    continue;
                }
                let config = ExtractionConfig::new(grid)
                    .with_traversal(traversal)
                    .with_dedup(dedup)
                    .with_seed_fallback(fallback);
                let (mesh, stats, secs) = run(config, &skeletons);

                let label = match traversal {
                    Traversal::Exhaustive => format!("{:?}/{:?}", traversal, dedup),
                    Traversal::FloodFill => format!("{:?}/{:?}/{:?}", traversal, dedup, fallback),
                };
                let agrees = triangle_set(&mesh) == reference_set;
                if !agrees {
                    mismatches += 1;
                }
                println!(
                    "  {:<38} {:>8} {:>9} {:>9} {:>8.2}{}",
                    label,
                    stats.triangles,
                    stats.evaluations,
                    stats.cubes_visited,
                    secs * 1000.0,
                    if agrees { "" } else { "  (differs)" }
                );
            }
        }
    }
    println!();

    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Reference Mesh                                              │");
    println!("└─────────────────────────────────────────────────────────────┘");
    let stats = reference.stats();
    println!("  Triangles:       {}", stats.triangle_count);
    println!("  Vertices:        {}", stats.vertex_count);
    println!("  Components:      {}", reference.connected_components());
    println!("  Boundary edges:  {}", reference.boundary_edge_count());
    println!("  Surface area:    {:.4}", stats.surface_area);
    println!(
        "  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
        stats.bbox_min.x,
        stats.bbox_min.y,
        stats.bbox_min.z,
        stats.bbox_max.x,
        stats.bbox_max.y,
        stats.bbox_max.z
    );
    println!();

    if mismatches > 0 {
        println!("  {} strategy runs differ from the exhaustive mesh", mismatches);
        std::process::exit(1);
    }
    println!("  All strategies agree with the exhaustive mesh");
}
