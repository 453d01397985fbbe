use crate::Vec3;

/// A half-line in 3D space.
///
/// Points along the ray are `origin + t * direction`. The direction is not
/// required to be unit length; hit distances are measured in multiples of it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}
