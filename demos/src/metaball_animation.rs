//! Metaball Animation
//!
//! Meshes a short animation of orbiting metaballs:
//! 1. Build one skeleton set per frame
//! 2. Extract all frames in parallel
//! 3. Report per-frame topology
//! 4. Export every frame as OBJ
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --bin metaball_animation -- output/frames 24
//! ```

use std::env;
use std::path::Path;

use instant::Instant;

use isoblob_core::{PotentialKind, Point3, Skeleton};
use isoblob_rs::{extract_frames, influence_radii, ExtractionConfig, GridConfig};

/// Three blobs orbiting the origin at different heights, plus a soft core.
fn frame_skeletons(frame: usize, frame_count: usize) -> Vec<Skeleton> {
    let phase = frame as f32 / frame_count as f32 * std::f32::consts::TAU;
    let mut skeletons: Vec<Skeleton> = (0..3)
        .map(|i| {
            let angle = phase + i as f32 * std::f32::consts::TAU / 3.0;
            let radius = 0.45 + 0.15 * (phase * 2.0).sin();
            Point3::new(angle.cos() * radius, 0.1 * (i as f32 - 1.0), angle.sin() * radius)
        })
        .map(|p| Skeleton::new(p).with_scale(0.8))
        .collect();
    skeletons.push(
        Skeleton::new(Point3::splat(0.0))
            .with_kind(PotentialKind::SoftObject)
            .with_scale(0.45),
    );
    skeletons
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          isoblob Metaball Animation");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let args: Vec<String> = env::args().collect();
    let output_dir = args.get(1).cloned().unwrap_or_else(|| "output/frames".to_string());
    let frame_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(24);

    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        eprintln!("Error creating output directory '{}': {}", output_dir, e);
        std::process::exit(1);
    }

    // =========================================================================
    // Step 1: Build frames
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 1: Build Frames                                        │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let frames: Vec<Vec<Skeleton>> = (0..frame_count)
        .map(|f| frame_skeletons(f, frame_count))
        .collect();
    let config = ExtractionConfig::new(GridConfig::new(64, 0.03, Point3::splat(0.0)));

    println!("  Frames:          {}", frames.len());
    println!("  Skeletons/frame: {}", frames.first().map_or(0, Vec::len));
    println!("  Grid:            {}³ points, step {}", config.grid.size, config.grid.step);
    println!("  Traversal:       {:?}", config.traversal);
    match frames.first().map(|f| influence_radii(f)) {
        Some(Ok(radii)) => {
            let radii: Vec<String> = radii.iter().map(|r| format!("{:.3}", r)).collect();
            println!("  Blob radii:      {}", radii.join(", "));
        }
        Some(Err(e)) => {
            eprintln!("Error computing blob radii: {}", e);
            std::process::exit(1);
        }
        None => {}
    }
    println!();

    // =========================================================================
    // Step 2: Extract
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 2: Extract Meshes                                      │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let start = Instant::now();
    let meshes = match extract_frames(&frames, &config) {
        Ok(meshes) => meshes,
        Err(e) => {
            eprintln!("Error extracting frames: {}", e);
            std::process::exit(1);
        }
    };
    let extract_time = start.elapsed();

    let total_triangles: usize = meshes.iter().map(|m| m.triangle_count()).sum();
    println!("  Total triangles: {}", total_triangles);
    println!("  Time:            {:.3}s", extract_time.as_secs_f64());
    println!(
        "  Throughput:      {:.1} frames/sec",
        meshes.len() as f64 / extract_time.as_secs_f64()
    );
    println!();

    // =========================================================================
    // Step 3: Topology report
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 3: Per-Frame Topology                                  │");
    println!("└─────────────────────────────────────────────────────────────┘");
    println!("  frame  triangles  vertices  components  closed  volume");

    for (i, mesh) in meshes.iter().enumerate() {
        println!(
            "  {:>5}  {:>9}  {:>8}  {:>10}  {:>6}  {:.4}",
            i,
            mesh.triangle_count(),
            mesh.vertex_count(),
            mesh.connected_components(),
            mesh.is_closed(),
            mesh.signed_volume()
        );
    }
    println!();

    // =========================================================================
    // Step 4: Export
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 4: Export to OBJ                                       │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let start = Instant::now();
    for (i, mesh) in meshes.iter().enumerate() {
        let path = Path::new(&output_dir).join(format!("frame_{:03}.obj", i));
        if let Err(e) = std::fs::write(&path, mesh.to_obj()) {
            eprintln!("Error writing '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
    println!("  Output:          {}/frame_*.obj", output_dir);
    println!("  Write time:      {:.3}s", start.elapsed().as_secs_f64());
    println!();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Done");
    println!("═══════════════════════════════════════════════════════════════");
}
