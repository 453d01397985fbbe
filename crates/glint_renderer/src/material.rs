//! Surface scattering models.
//!
//! The set of materials is closed, so they live in a single enum and
//! dispatch with `match` instead of through a trait object.

use crate::hittable::HitRecord;
use crate::sampling::{random_in_unit_sphere, uniform01};
use glint_math::{reflect, refract, Color, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// How light interacts with a surface.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "metal", "albedo": [0.7, 0.6, 0.5], "fuzz": 0.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    /// Diffuse surface.
    Lambertian { albedo: Color },
    /// Specular surface. `fuzz` is 0.0 for a perfect mirror, 1.0 for very rough.
    Metal { albedo: Color, fuzz: f32 },
    /// Transparent refractive surface (1.0 = air, 1.5 = glass, 2.4 = diamond).
    Dielectric { ior: f32 },
}

/// Outcome of a scattering event that did not absorb the ray.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of light kept per channel
    pub attenuation: Color,
    /// Continuation ray leaving the hit point
    pub scattered: Ray,
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Fuzz is clamped to `[0.0, 1.0]`; NaN becomes 0.0.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.max(0.0).min(1.0),
        }
    }

    pub fn dielectric(ior: f32) -> Self {
        Material::Dielectric { ior }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_in_unit_sphere(rng);

                // Catch degenerate scatter direction
                if direction.length_squared() < 1e-8 {
                    direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * random_in_unit_sphere(rng);

                // A fuzzed reflection pointing into the surface is absorbed
                if direction.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, direction),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { ior } => {
                let direction = dielectric_direction(ray_in, rec, ior, rng);
                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

/// Pick reflection or refraction for a dielectric hit.
///
/// The stored normal is the outward one, so the sign of its dot product with
/// the incoming direction tells whether the ray is entering or leaving.
fn dielectric_direction(
    ray_in: &Ray,
    rec: &HitRecord<'_>,
    ior: f32,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let direction = ray_in.direction();
    let reflected = reflect(direction, rec.normal);
    let d = direction.dot(rec.normal);

    let (facing_normal, ni_over_nt, cosine) = if d > 0.0 {
        (-rec.normal, ior, ior * d / direction.length())
    } else {
        (rec.normal, 1.0 / ior, -d / direction.length())
    };

    match refract(direction, facing_normal, ni_over_nt) {
        Some(refracted) => {
            if uniform01(rng) < schlick(cosine, ior) {
                reflected
            } else {
                refracted
            }
        }
        // Total internal reflection
        None => reflected,
    }
}

/// Schlick's approximation for Fresnel reflectance.
fn schlick(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
