//! Random sampling helpers.
//!
//! Every routine draws from an explicit generator so that each render worker
//! can own an independently seeded stream.
//!
//! The rejection loops below have no iteration cap. They terminate with
//! probability one (roughly 1.27 draws per disk point and 1.91 per ball point
//! on average), so they preserve the distribution but do not bound latency.

use glint_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub fn uniform01(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform point inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            uniform01(rng) * 2.0 - 1.0,
            uniform01(rng) * 2.0 - 1.0,
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform point inside the unit ball.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            uniform01(rng) * 2.0 - 1.0,
            uniform01(rng) * 2.0 - 1.0,
            uniform01(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
