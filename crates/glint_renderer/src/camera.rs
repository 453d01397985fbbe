//! Thin-lens camera for ray generation.

use crate::sampling::random_in_unit_disk;
use glint_math::{Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// User-facing camera placement and lens settings.
///
/// Deserializes from the `camera` block of a render config. Missing fields
/// fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter; 0.0 gives a pinhole
    pub aperture: f32,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 20.0,
            aperture: 0.1,
            focus_dist: 10.0,
        }
    }
}

impl CameraSettings {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Derive the camera for an image of the given aspect ratio (width / height).
    pub fn build(&self, aspect: f32) -> Camera {
        Camera::new(
            self.look_from,
            self.look_at,
            self.vup,
            self.vfov,
            aspect,
            self.aperture,
            self.focus_dist,
        )
    }
}

/// Immutable camera mapping image-plane coordinates to world-space rays.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Build the camera basis and image plane.
    ///
    /// `vup` must not be parallel to the view direction and `look_from` must
    /// differ from `look_at`, otherwise the basis degenerates.
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let lower_left_corner =
            look_from - focus_dist * (half_width * u + half_height * v + w);

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate a ray through normalized image-plane coordinates.
    ///
    /// `(s, t) = (0, 0)` is the lower-left corner and `(1, 1)` the upper-right.
    /// The origin is jittered across the lens to give depth of field.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let origin = self.origin + offset;

        Ray::new(
            origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - origin,
        )
    }
}
