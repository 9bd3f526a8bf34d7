//! Prism Core - scene description for the path tracer.
//!
//! This crate provides the renderer-agnostic inputs of a render request:
//!
//! - **Scene types**: `Scene`, `Background`, `GeometryObject`, `Shape`
//! - **Material descriptions**: `MaterialSpec`, `TextureSpec`
//! - **Settings**: `RenderSettings`
//! - **Editing**: `ObjectDraft` for building objects from partial selections
//!
//! Everything here is validated on construction, so the renderer can assume
//! positive radii, distinct camera points and at least one sample per pixel.
//!
//! # Example
//!
//! ```
//! use prism_core::{Background, GeometryObject, MaterialSpec, Scene, Shape};
//! use prism_math::{Color, Point3};
//!
//! let mut scene = Scene::new(Background::sky(), Point3::ZERO, Point3::new(0.0, 0.0, -1.0))?;
//! scene.add_object(GeometryObject::new(
//!     Shape::sphere(Point3::new(0.0, 0.0, -1.0), 0.5),
//!     MaterialSpec::matte(Color::splat(0.5)),
//! )?);
//! assert_eq!(scene.len(), 1);
//! # Ok::<(), prism_core::SceneError>(())
//! ```

pub mod color;
pub mod draft;
pub mod error;
pub mod material;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use color::color_from_rgb8;
pub use draft::ObjectDraft;
pub use error::{SceneError, SceneResult};
pub use material::{MaterialSpec, TextureSpec};
pub use scene::{Background, GeometryObject, Scene, Shape};
pub use settings::RenderSettings;
