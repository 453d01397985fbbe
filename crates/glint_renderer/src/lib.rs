//! Glint - CPU path tracing of sphere scenes
//!
//! A Monte Carlo path tracer: many jittered rays per pixel, bounced off
//! diffuse, metal and glass spheres, averaged into an image.
//!
//! Data flow: [`render`] asks the [`Camera`] for a ray, [`ray_color`] finds
//! the nearest hit in the scene and recurses through [`Material::scatter`]
//! until the ray is absorbed, escapes to the sky, or runs out of bounces.

mod camera;
mod config;
mod hittable;
mod integrator;
mod material;
mod output;
mod renderer;
mod sampling;
mod scene;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use config::{ConfigError, RenderSettings};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::{ray_color, sky_gradient, DEFAULT_MAX_DEPTH, T_MIN};
pub use material::{Material, ScatterResult};
pub use output::{save_image, write_ppm, OutputError};
pub use renderer::{
    color_to_rgb, linear_to_gamma, render, render_pixel, row_seed, ImageBuffer, RenderConfig,
};
pub use sampling::{random_in_unit_disk, random_in_unit_sphere, uniform01};
pub use scene::{random_scene, SceneDescription, SceneError, SphereDescription};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Color, Interval, Ray, Vec3};
