//! `glint` - render a sphere scene to an image file.

use anyhow::{Context, Result};
use glint_renderer::{random_scene, render, save_image, RenderSettings, SceneDescription};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "glint", rename_all = "kebab-case")]
struct Opt {
    /// JSON render settings; flags below override individual fields
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// JSON scene description; the random cover scene is used when absent
    #[structopt(long, parse(from_os_str))]
    scene: Option<PathBuf>,
    /// Output image (.ppm, .png, .jpg, .bmp, .tga)
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    #[structopt(long)]
    width: Option<u32>,
    #[structopt(long)]
    height: Option<u32>,
    /// Samples per pixel
    #[structopt(short, long)]
    samples: Option<u32>,
    /// Bounce budget per path
    #[structopt(long)]
    max_depth: Option<u32>,
    /// Base seed for the scene generator and the render
    #[structopt(long)]
    seed: Option<u64>,
    /// Worker threads; absent or 0 uses rayon's default of one per core
    #[structopt(long)]
    threads: Option<usize>,
    #[structopt(long, default_value = "info")]
    log_level: String,
}

fn parse_log_level(level: &str, default: LevelFilter) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => default,
    }
}

fn thread_pool(threads: Option<usize>) -> Option<rayon::ThreadPoolBuilder> {
    threads.map(|threads| rayon::ThreadPoolBuilder::new().num_threads(threads))
}

fn load_settings(opts: &Opt) -> Result<RenderSettings> {
    let mut settings = match &opts.config {
        Some(path) => RenderSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };

    if let Some(width) = opts.width {
        settings.render.width = width;
    }
    if let Some(height) = opts.height {
        settings.render.height = height;
    }
    if let Some(samples) = opts.samples {
        settings.render.samples_per_pixel = samples;
    }
    if let Some(max_depth) = opts.max_depth {
        settings.render.max_depth = max_depth;
    }
    if let Some(seed) = opts.seed {
        settings.render.seed = seed;
    }
    if let Some(output) = &opts.output {
        settings.output = output.clone();
    }

    settings.validate().context("Invalid render settings")?;
    Ok(settings)
}

fn load_scene(opts: &Opt, seed: u64) -> Result<SceneDescription> {
    match &opts.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene from {}", path.display())),
        None => {
            log::info!("No scene file given, generating cover scene");
            Ok(random_scene(&mut StdRng::seed_from_u64(seed)))
        }
    }
}

fn main() -> Result<()> {
    let opts = Opt::from_args();

    env_logger::Builder::from_default_env()
        .filter_level(parse_log_level(&opts.log_level, LevelFilter::Info))
        .init();

    log::info!("Starting Glint");

    if let Some(pool) = thread_pool(opts.threads) {
        pool.build_global().context("Failed to configure worker threads")?;
    }

    let settings = load_settings(&opts)?;

    let start = Instant::now();
    let world = load_scene(&opts, settings.render.seed)?
        .build()
        .context("Failed to build scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = settings.camera.build(settings.render.aspect_ratio());
    let image = render(&camera, &world, &settings.render);

    save_image(&image, &settings.output)
        .with_context(|| format!("Failed to save {}", settings.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG", LevelFilter::Info), LevelFilter::Debug);
        assert_eq!(parse_log_level("warn", LevelFilter::Info), LevelFilter::Warn);
        assert_eq!(parse_log_level("loud", LevelFilter::Info), LevelFilter::Info);
    }

    #[test]
    fn test_flags_override_defaults() {
        let opts = Opt::from_iter(&[
            "glint",
            "--width",
            "320",
            "--height",
            "200",
            "-s",
            "16",
            "--seed",
            "9",
            "-o",
            "frame.png",
        ]);

        let settings = load_settings(&opts).unwrap();
        assert_eq!(settings.render.width, 320);
        assert_eq!(settings.render.height, 200);
        assert_eq!(settings.render.samples_per_pixel, 16);
        assert_eq!(settings.render.seed, 9);
        assert_eq!(settings.render.max_depth, 50);
        assert_eq!(settings.output, PathBuf::from("frame.png"));
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let opts = Opt::from_iter(&["glint", "--samples", "0"]);
        assert!(load_settings(&opts).is_err());
    }

    #[test]
    fn test_threads_flag_sizes_pool() {
        let opts = Opt::from_iter(&["glint", "--threads", "3"]);
        assert_eq!(opts.threads, Some(3));
        let pool = thread_pool(opts.threads).unwrap().build().unwrap();
        assert_eq!(pool.current_num_threads(), 3);

        // Zero falls back to rayon's own default
        let pool = thread_pool(Some(0)).unwrap().build().unwrap();
        assert!(pool.current_num_threads() >= 1);

        assert!(thread_pool(Opt::from_iter(&["glint"]).threads).is_none());
    }

    #[test]
    fn test_missing_config_file() {
        let opts = Opt::from_iter(&["glint", "--config", "/nonexistent/glint.json"]);
        let err = load_settings(&opts).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load settings"));
    }

    #[test]
    fn test_default_scene_is_cover_scene() {
        let opts = Opt::from_iter(&["glint"]);
        let scene = load_scene(&opts, 3).unwrap();
        assert_eq!(scene, random_scene(&mut StdRng::seed_from_u64(3)));
    }
}
