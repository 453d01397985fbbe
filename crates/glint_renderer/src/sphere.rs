//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::{Interval, Ray, Vec3};

/// A sphere primitive owning its material.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Half-b form of |origin + t*dir - center|^2 = r^2
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: (p - self.center) / self.radius,
            material: &self.material,
        })
    }
}
