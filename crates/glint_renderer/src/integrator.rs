//! Recursive radiance estimate for a single ray.

use crate::Hittable;
use glint_math::{Color, Interval, Ray};
use rand::RngCore;

/// Default bounce budget before a path is cut off as black.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Lower bound on hit distance, keeps scattered rays from re-hitting the
/// surface they left ("shadow acne").
pub const T_MIN: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// `depth` counts bounces taken so far. A hit at `depth >= max_depth`
/// contributes black, so recursion never goes deeper than `max_depth` calls.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    if depth >= max_depth {
        return Color::ZERO;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth + 1, max_depth, rng)
        }
        // Ray was absorbed
        None => Color::ZERO,
    }
}

/// Background for rays that escape the scene.
///
/// Blends white at the bottom to sky blue at the top by the normalized
/// direction's y component.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - t) * white + t * blue
}
