//! Prism Renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal, dispersive
//! glass and emissive materials.
//!
//! - [`World`] turns a [`prism_core::Scene`] into a BVH plus a shared
//!   [`MaterialPool`]
//! - [`ray_color`] estimates the radiance along one ray
//! - [`render_image`] renders synchronously on the rayon pool
//! - [`RenderManager`] runs renders on a background thread with progress
//!   and cancellation
//!
//! # Example
//!
//! ```
//! use prism_core::{Background, GeometryObject, MaterialSpec, RenderSettings, Scene, Shape};
//! use prism_math::{Color, Point3};
//! use prism_renderer::render_image;
//!
//! let scene = Scene::new(Background::sky(), Point3::ZERO, Point3::new(0.0, 0.0, -1.0))?
//!     .with_objects([GeometryObject::new(
//!         Shape::sphere(Point3::new(0.0, 0.0, -1.0), 0.5),
//!         MaterialSpec::matte(Color::splat(0.5)),
//!     )?]);
//! let settings = RenderSettings::new(8, 8, 1, 0.0)?.with_seed(1);
//!
//! let output = render_image(&settings, &scene, |_| {}, || false)?;
//! assert_eq!(output.image.dimensions(), (8, 8));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bvh;
mod camera;
mod error;
mod hittable;
mod manager;
mod material;
mod pool;
mod renderer;
mod sampling;
mod sphere;
mod texture;
mod world;

pub use bvh::BvhNode;
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use manager::{Canceller, RenderEvent, RenderHandle, RenderManager, RenderState};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterRecord};
pub use pool::{MaterialId, MaterialPool};
pub use renderer::{
    linear_to_gamma, quantize, ray_color, render_image, render_pixel, RenderOutput, T_MIN,
};
pub use sampling::{pixel_rng, random_in_unit_disk, random_in_unit_sphere, random_unit_vector};
pub use sphere::Sphere;
pub use texture::Texture;
pub use world::World;
