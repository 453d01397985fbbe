//! Scene construction.
//!
//! Scenes are plain lists of spheres. They come either from a JSON
//! description or from the procedural cover scene generator.

use crate::sampling::uniform01;
use crate::{HittableList, Material, Sphere};
use glint_math::{Color, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index}: {message}")]
    InvalidSphere { index: usize, message: String },
}

/// One sphere in a scene description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

/// A scene as data, before it is turned into hittable geometry.
///
/// ```json
/// { "spheres": [
///     { "center": [0, -1000, 0], "radius": 1000,
///       "material": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] } }
/// ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Parse a scene description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene description from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Add a sphere.
    pub fn push(&mut self, center: Vec3, radius: f32, material: Material) {
        self.spheres.push(SphereDescription {
            center,
            radius,
            material,
        });
    }

    /// Check every sphere is renderable.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            validate_sphere(sphere).map_err(|message| SceneError::InvalidSphere {
                index,
                message: message.to_string(),
            })?;
        }
        Ok(())
    }

    /// Validate and build the geometry.
    pub fn build(&self) -> Result<HittableList, SceneError> {
        self.validate()?;

        let mut world = HittableList::new();
        for sphere in &self.spheres {
            world.add(Box::new(Sphere::new(
                sphere.center,
                sphere.radius,
                sphere.material,
            )));
        }

        log::info!("Built scene with {} spheres", world.len());
        Ok(world)
    }
}

fn validate_sphere(sphere: &SphereDescription) -> Result<(), &'static str> {
    if !sphere.center.is_finite() {
        return Err("center must be finite");
    }
    if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
        return Err("radius must be finite and positive");
    }

    match sphere.material {
        Material::Lambertian { albedo } => check_albedo(albedo),
        Material::Metal { albedo, fuzz } => {
            check_albedo(albedo)?;
            if !(0.0..=1.0).contains(&fuzz) {
                return Err("metal fuzz must be within [0, 1]");
            }
            Ok(())
        }
        Material::Dielectric { ior } => {
            if !(ior.is_finite() && ior > 0.0) {
                return Err("refractive index must be finite and positive");
            }
            Ok(())
        }
    }
}

fn check_albedo(albedo: Color) -> Result<(), &'static str> {
    if !albedo.is_finite() || albedo.min_element() < 0.0 {
        return Err("albedo components must be finite and non-negative");
    }
    Ok(())
}

/// The cover scene: a large ground sphere, a grid of small random spheres,
/// and three large feature spheres (glass, diffuse and mirror).
pub fn random_scene(rng: &mut dyn RngCore) -> SceneDescription {
    let mut scene = SceneDescription::default();

    // Ground
    scene.push(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    );

    let clearance = Vec3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = uniform01(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * uniform01(rng),
                0.2,
                b as f32 + 0.9 * uniform01(rng),
            );

            if (center - clearance).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                // Diffuse
                Material::lambertian(Color::new(
                    uniform01(rng) * uniform01(rng),
                    uniform01(rng) * uniform01(rng),
                    uniform01(rng) * uniform01(rng),
                ))
            } else if choose_mat < 0.95 {
                // Metal
                Material::metal(
                    Color::new(
                        0.5 * (1.0 + uniform01(rng)),
                        0.5 * (1.0 + uniform01(rng)),
                        0.5 * (1.0 + uniform01(rng)),
                    ),
                    0.5 * uniform01(rng),
                )
            } else {
                // Glass
                Material::dielectric(1.5)
            };
            scene.push(center, 0.2, material);
        }
    }

    scene.push(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::dielectric(1.5));
    scene.push(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    );
    scene.push(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    );

    log::debug!("Generated cover scene with {} spheres", scene.spheres.len());
    scene
}
