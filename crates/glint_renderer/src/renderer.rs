//! Parallel path tracing driver.
//!
//! Rows render in parallel with rayon. Each row owns a generator seeded from
//! the base seed and its row index, so a given seed always produces the same
//! image no matter how many threads run or in which order rows finish.

use crate::integrator::{ray_color, DEFAULT_MAX_DEPTH};
use crate::sampling::uniform01;
use crate::{Camera, Hittable};
use glint_math::{Color, Interval};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-row generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            samples_per_pixel: 1000,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Averaged linear colors of a rendered image.
///
/// Row 0 is the top of the image, so rows are stored in scanline order.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y counted from the top.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-corrected 8-bit RGB triples, row-major in scanline order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
///
/// Each channel is gamma corrected, scaled by 255.99 and truncated.
/// Out-of-range and NaN input saturates into [0, 255].
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 255.0);
    let quantize = |c: f32| intensity.clamp(255.99 * linear_to_gamma(c)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Derive the generator seed for one image row.
///
/// SplitMix64 finalizer over the base seed and row index, so neighbouring
/// rows get unrelated streams.
pub fn row_seed(base_seed: u64, row: u32) -> u64 {
    let mut z = base_seed.wrapping_add((row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Render a single pixel with multi-sampling.
///
/// `(i, j)` are pixel coordinates with `j = 0` at the bottom of the image.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (i as f32 + uniform01(rng)) / config.width as f32;
        let v = (j as f32 + uniform01(rng)) / config.height as f32;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, 0, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel.max(1) as f32
}

/// Render one row into `row`, bottom-up index `j`.
fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    j: u32,
    config: &RenderConfig,
    row: &mut [Color],
) {
    let mut rng = StdRng::seed_from_u64(row_seed(config.seed, j));
    for (i, pixel) in row.iter_mut().enumerate() {
        *pixel = render_pixel(camera, world, i as u32, j, config, &mut rng);
    }
}

/// Render the entire scene to an image buffer.
///
/// The scene is only read, so it is shared across workers without locking;
/// every worker writes a disjoint row of the buffer.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);
    if config.width == 0 || config.height == 0 {
        return image;
    }

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, seed {} on {} threads",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        config.seed,
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let rows_done = AtomicU32::new(0);
    let height = config.height;

    image
        .pixels
        .par_chunks_mut(config.width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            // Buffer row 0 is the top, world row 0 the bottom
            let j = height - 1 - y as u32;
            render_row(camera, world, j, config, row);

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Row {} finished ({}/{})", j, done, height);
        });

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraSettings, HittableList, Material, Sphere};
    use glint_math::Vec3;

    fn single_sphere() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Color::new(0.5, 0.5, 0.5)),
        )));
        world
    }

    fn small_config(seed: u64) -> RenderConfig {
        RenderConfig {
            width: 16,
            height: 8,
            samples_per_pixel: 4,
            max_depth: DEFAULT_MAX_DEPTH,
            seed,
        }
    }

    fn camera_for(config: &RenderConfig) -> Camera {
        CameraSettings::default()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .build(config.aspect_ratio())
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        // sqrt(0.25) * 255.99 = 127.995
        assert_eq!(color_to_rgb(Color::splat(0.25)), [127, 127, 127]);
        assert_eq!(
            color_to_rgb(Color::new(f32::NAN, -3.0, 4.0)),
            [0, 0, 255]
        );
    }

    #[test]
    fn test_row_seeds_differ() {
        let seeds: Vec<u64> = (0..64).map(|row| row_seed(7, row)).collect();
        for (a, sa) in seeds.iter().enumerate() {
            for sb in &seeds[a + 1..] {
                assert_ne!(sa, sb);
            }
        }
        assert_ne!(row_seed(7, 0), row_seed(8, 0));
        assert_eq!(row_seed(7, 3), row_seed(7, 3));
    }

    #[test]
    fn test_image_buffer_indexing() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(3, 2, Color::ONE);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.pixels[11], Color::ONE);
        assert_eq!(image.to_rgb8().len(), 4 * 3 * 3);
    }

    #[test]
    fn test_render_pixel() {
        let world = single_sphere();
        let config = small_config(42);
        let camera = camera_for(&config);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel looks straight at the sphere
        let color = render_pixel(&camera, &world, 8, 4, &config, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.max_element() <= 0.5 + 1e-5);
    }

    #[test]
    fn test_render_is_deterministic_for_seed() {
        let world = single_sphere();
        let config = small_config(1234);
        let camera = camera_for(&config);

        let first = render(&camera, &world, &config);
        let second = render(&camera, &world, &config);

        assert_eq!(first.pixels, second.pixels);
        assert_eq!(first.to_rgb8(), second.to_rgb8());

        let other = render(&camera, &world, &small_config(4321));
        assert_ne!(first.pixels, other.pixels);
    }

    #[test]
    fn test_render_independent_of_thread_count() {
        let world = single_sphere();
        let config = small_config(99);
        let camera = camera_for(&config);

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| render(&camera, &world, &config));
        let many = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| render(&camera, &world, &config));

        assert_eq!(single.pixels, many.pixels);
    }

    #[test]
    fn test_render_output_is_well_formed() {
        let world = single_sphere();
        let config = small_config(5);
        let camera = camera_for(&config);

        let image = render(&camera, &world, &config);
        assert_eq!(image.pixels.len(), 16 * 8);

        for color in &image.pixels {
            assert!(color.is_finite());
            assert!(color.min_element() >= 0.0);
            assert!(color.max_element() <= 1.0);
        }
        // u8 output cannot exceed 255 by construction; check the sphere is
        // darker than the sky around it
        let center = image.get(8, 4);
        let corner = image.get(0, 0);
        assert!(center.length() < corner.length());
    }

    #[test]
    fn test_rows_stored_top_first() {
        // Nothing in the scene: each pixel is the sky gradient, which gets
        // bluer (less red) toward the top
        let world = HittableList::new();
        let config = small_config(3);
        let camera = camera_for(&config);

        let image = render(&camera, &world, &config);
        let top = image.get(8, 0);
        let bottom = image.get(8, config.height - 1);
        assert!(top.x < bottom.x, "top={:?} bottom={:?}", top, bottom);
    }

    #[test]
    fn test_empty_image() {
        let world = single_sphere();
        let config = RenderConfig {
            width: 0,
            ..small_config(1)
        };
        let camera = camera_for(&small_config(1));
        assert!(render(&camera, &world, &config).pixels.is_empty());
    }
}
