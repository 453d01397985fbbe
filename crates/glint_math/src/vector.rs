//! Vector helpers shared by the scattering models.

use crate::Vec3;

/// Linear RGB color. Components are in [0, 1] before gamma correction.
pub type Color = Vec3;

/// Mirror `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` using Snell's law.
///
/// `n` must face against `v`, and `ni_over_nt` is the ratio of the refractive
/// index on the incoming side to the one on the transmitted side. Returns
/// `None` on total internal reflection.
#[inline]
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}
