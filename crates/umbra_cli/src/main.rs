use std::time::Instant;

use anyhow::{Context, Result};
use umbra_renderer::{render_gradient, render_ray_directions, Camera, RenderConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RenderConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => {
            log::info!("No config given, using defaults");
            RenderConfig::default()
        }
    };
    let resolution = config.resolution();
    log::info!(
        "Rendering {}x{} ({})",
        resolution.x,
        resolution.y,
        if config.srgb { "sRGB" } else { "linear" }
    );

    let start = Instant::now();
    let gradient = render_gradient(resolution, config.encoding());
    gradient
        .write_png(&config.gradient_output)
        .context("Failed to write gradient image")?;
    log::info!("Gradient rendered in {:.2?}", start.elapsed());

    if let Some(rays_output) = &config.rays_output {
        let camera = config.camera();
        let camera: &dyn Camera = &camera;

        let start = Instant::now();
        let rays = render_ray_directions(camera, resolution, config.encoding());
        rays.write_png(rays_output)
            .context("Failed to write ray direction image")?;
        log::info!("Ray directions rendered in {:.2?}", start.elapsed());
    }

    Ok(())
}
