//! Prism math - vectors, rays and bounding boxes.
//!
//! All geometry is carried in double precision. `Vec3`, `Point3` and `Color`
//! are aliases of glam's `DVec3`, so the usual glam arithmetic (`dot`,
//! `cross`, `normalize`, component-wise `*`) applies to all three.

pub use glam::DVec3;

mod aabb;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::{Channel, Ray};
pub use vector::{near_zero, reflect, refract};

/// 3-component double vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = DVec3;
