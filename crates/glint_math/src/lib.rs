//! Glint math - vectors, rays and intervals for the path tracer.
//!
//! `Vec3` comes straight from glam and doubles as the point, direction and
//! linear color type.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, refract, Color};
