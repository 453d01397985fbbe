//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use glint_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Borrows the material of the surface that was hit, so it lives no longer
/// than the scene it came from.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit surface normal at the intersection
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with parameter strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// A list of hittable objects.
///
/// Intersection is brute force: every member is tested, keeping the closest.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let interval = match &closest {
                Some(rec) => ray_t.with_max(rec.t),
                None => ray_t,
            };
            if let Some(rec) = object.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }
}
