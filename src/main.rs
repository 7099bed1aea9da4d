use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wirepipe::demo::demo_scene;
use wirepipe::prelude::*;

#[derive(Parser)]
#[command(name = "wirepipe", about = "Render the built-in wireframe demo scene to an image")]
struct Cli {
    /// Output file; the extension picks the format (.ppm or .png)
    #[arg(default_value = "wirepipe.ppm")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Near plane distance
    #[arg(long, default_value_t = 1.0)]
    near: f32,

    /// Rotation of the demo cube, in degrees
    #[arg(long, default_value_t = 30.0)]
    angle: f32,

    /// Use an orthographic camera
    #[arg(long)]
    ortho: bool,

    /// Anti-alias lines
    #[arg(long)]
    aa: bool,

    /// Gamma-correct output colors
    #[arg(long)]
    gamma: bool,

    /// Drop primitives touching the near plane instead of cutting them
    #[arg(long)]
    no_near_clip: bool,

    /// Log per-model stage counts
    #[arg(long)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose || cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let aspect = cli.width as f32 / cli.height.max(1) as f32;
    let camera = if cli.ortho {
        Camera::orthographic_fov(cli.fov, aspect, cli.near)
    } else {
        Camera::perspective_fov(cli.fov, aspect, cli.near)
    }
    .context("building camera")?;

    let scene = demo_scene(camera, cli.angle.to_radians())?;
    let options = RenderOptions::default()
        .with_anti_aliasing(cli.aa)
        .with_gamma_correction(cli.gamma)
        .with_near_clipping(!cli.no_near_clip)
        .with_debug(cli.debug);

    let mut fb = FrameBuffer::with_background(cli.width, cli.height, Color::DARK_GRAY)?;
    let stats = render(&scene, &mut fb.viewport(), &options)?;
    info!(
        models = stats.models_rendered,
        primitives = stats.primitives_in,
        visible = stats.primitives_after_clip,
        pixels = stats.pixels_written,
        "rendered {}x{} {} frame",
        cli.width,
        cli.height,
        scene.camera().kind()
    );

    let extension = cli
        .output
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("ppm") => fb.save_ppm(&cli.output)?,
        Some("png") => fb.save_png(&cli.output)?,
        _ => bail!("unsupported output format: {}", cli.output.display()),
    }
    println!("wrote {}", cli.output.display());

    Ok(())
}
