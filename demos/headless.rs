//! Headless walkthrough of the engine against an in-memory scene.
//!
//! ```text
//! cargo run --example headless                      # built-in defaults
//! cargo run --example headless -- engine.toml       # custom config
//! RUST_LOG=cloudpath=debug cargo run --example headless
//! ```
//!
//! Draws one path on a synthetic point cloud and one on the drawing plane,
//! stitches and smooths them, then prints a CSV export and saves the
//! collection to a file store in the system temp directory.

use std::f64::consts::FRAC_PI_3;

use cloudpath::feedback::FeedbackAnimator;
use cloudpath::geometry::{Camera, Viewport};
use cloudpath::io::{ExportFormat, FileStore};
use cloudpath::math::Point3;
use cloudpath::resolver::resolve;
use cloudpath::scene::RecordingScene;
use cloudpath::{EngineConfig, PathEditor, PointCloud};

fn main() -> cloudpath::Result<()> {
    // Default: WARN for everything, INFO for cloudpath.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("headless=info".parse().unwrap_or_default())
        .add_directive("cloudpath=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let cloud = PointCloud::new(terrain());
    let camera = Camera::perspective(
        Point3::new(0.0, 6.0, 8.0),
        Point3::new(0.0, 0.0, 0.0),
        FRAC_PI_3,
        16.0 / 9.0,
    );
    let viewport = Viewport::new(0.0, 0.0, 1280.0, 720.0);

    let mut editor = PathEditor::with_config(RecordingScene::new(), &config)?;
    let mut feedback = FeedbackAnimator::new(config.feedback);

    // First path: clicks across the terrain, snapped onto cloud samples.
    editor.begin_drawing();
    for px in [320.0, 480.0, 640.0, 800.0, 960.0] {
        let ndc = viewport.to_ndc(px, 400.0)?;
        let hit = resolve(ndc, &camera, Some(&cloud), editor.drawing_plane(), &config.resolver)?;
        if hit.is_snapped() {
            feedback.pulse(editor.scene_mut(), hit.point, &config.resolver);
        }
        editor.add_point(hit.point)?;
        feedback.tick(editor.scene_mut());
    }
    editor.end_drawing();

    // Second path: no cloud, so anchors land on the drawing plane.
    editor.begin_drawing();
    for px in [1000.0, 1100.0, 1200.0] {
        let ndc = viewport.to_ndc(px, 500.0)?;
        let hit = resolve(ndc, &camera, None, editor.drawing_plane(), &config.resolver)?;
        editor.add_point(hit.point)?;
    }
    editor.end_drawing();

    while feedback.tick(editor.scene_mut()) > 0 {}

    let editing = config.editing;
    let stitched = editor.stitch(&[0, 1], editing.stitch_method)?;
    if let Err(e) = editor.simplify(stitched, editing.simplify_tolerance) {
        tracing::debug!(%e, "simplify skipped");
    }
    editor.smooth(stitched, editing.smooth_segments)?;

    let stats = editor.statistics();
    tracing::info!(
        paths = stats.total_paths,
        points = stats.total_points,
        distance = stats.total_distance,
        primitives = editor.scene().live_count(),
        "editing finished"
    );

    let csv = editor.export(ExportFormat::Csv)?;
    println!("{} ({} bytes)", csv.filename, csv.content.len());
    for line in csv.content.lines().take(5) {
        println!("  {line}");
    }

    let mut store = FileStore::open(std::env::temp_dir().join("cloudpath-demo"))?;
    editor.save_to(&mut store)?;
    println!("saved to {}", store.dir().display());
    Ok(())
}

/// Gently rolling ground sampled on a 0.1 grid.
fn terrain() -> Vec<Point3> {
    let mut points = Vec::new();
    for i in -40..=40 {
        for j in -40..=40 {
            let (x, z) = (f64::from(i) * 0.1, f64::from(j) * 0.1);
            points.push(Point3::new(x, 0.2 * (x * 1.3).sin() * (z * 0.7).cos(), z));
        }
    }
    points
}
