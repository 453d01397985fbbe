//! Simple path tracer example.
//!
//! Renders a small version of the cover scene and saves it as PPM.

use glint_renderer::{
    random_scene, render, save_image, CameraSettings, RenderConfig, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Build the scene
    let mut rng = StdRng::seed_from_u64(2024);
    let world = random_scene(&mut rng).build()?;

    let config = RenderConfig {
        width: 400,
        height: 240,
        samples_per_pixel: 32,
        max_depth: 50,
        seed: 2024,
    };

    let camera = CameraSettings::default()
        .with_position(
            Vec3::new(13.0, 2.0, 3.0), // look_from
            Vec3::new(0.0, 0.0, 0.0),  // look_at
            Vec3::new(0.0, 1.0, 0.0),  // vup
        )
        .with_lens(20.0, 0.1, 10.0)
        .build(config.aspect_ratio());

    let image = render(&camera, &world, &config);
    save_image(&image, "simple_render.ppm")?;

    Ok(())
}
