//! Scene snapshot types.
//!
//! A `Scene` is what the UI hands to the renderer: background, camera
//! placement and the list of objects. It is edited between renders and
//! read-only while a render is running.

use std::fmt;

use prism_math::{Color, Point3, Vec3};

use crate::error::{SceneError, SceneResult};
use crate::material::MaterialSpec;

/// Camera points closer than this are treated as equal.
const MIN_CAMERA_DISTANCE_SQ: f64 = 1e-12;

/// What a ray sees when it leaves the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Background {
    /// Uniform color.
    Solid(Color),

    /// Vertical blend from `horizon` (looking down) to `zenith` (looking up).
    Gradient { horizon: Color, zenith: Color },
}

impl Background {
    /// White to light blue sky.
    pub fn sky() -> Self {
        Background::Gradient {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }

    /// Background radiance seen along `direction`.
    pub fn color_for(&self, direction: Vec3) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::Gradient { horizon, zenith } => {
                let a = 0.5 * (direction.normalize_or_zero().y + 1.0);
                (1.0 - a) * horizon + a * zenith
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

/// Geometric shape of an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { center: Point3, radius: f64 },
}

impl Shape {
    pub fn sphere(center: Point3, radius: f64) -> Self {
        Shape::Sphere { center, radius }
    }

    pub fn validate(&self) -> SceneResult<()> {
        match *self {
            Shape::Sphere { center, radius } => {
                if !center.is_finite() {
                    return Err(SceneError::invalid(format!(
                        "sphere center {center} is not finite"
                    )));
                }
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(SceneError::invalid(format!(
                        "sphere radius must be positive, got {radius}"
                    )));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Sphere { center, radius } => write!(
                f,
                "sphere at ({:.2}, {:.2}, {:.2}) r={:.2}",
                center.x, center.y, center.z, radius
            ),
        }
    }
}

/// A shape paired with the material covering it.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryObject {
    shape: Shape,
    material: MaterialSpec,
}

impl GeometryObject {
    /// Create a validated object.
    pub fn new(shape: Shape, material: MaterialSpec) -> SceneResult<Self> {
        shape.validate()?;
        material.validate()?;
        Ok(Self { shape, material })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &MaterialSpec {
        &self.material
    }
}

impl fmt::Display for GeometryObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.shape, self.material)
    }
}

/// Immutable snapshot handed to the renderer.
#[derive(Clone, Debug)]
pub struct Scene {
    background: Background,
    camera_from: Point3,
    camera_to: Point3,
    objects: Vec<GeometryObject>,
}

impl Scene {
    /// Create an empty scene.
    ///
    /// Fails if the camera points coincide, since no view direction exists.
    pub fn new(background: Background, camera_from: Point3, camera_to: Point3) -> SceneResult<Self> {
        if !camera_from.is_finite() || !camera_to.is_finite() {
            return Err(SceneError::invalid("camera points must be finite"));
        }
        if camera_from.distance_squared(camera_to) < MIN_CAMERA_DISTANCE_SQ {
            return Err(SceneError::invalid(format!(
                "camera from and to are both {camera_from}"
            )));
        }
        Ok(Self {
            background,
            camera_from,
            camera_to,
            objects: Vec::new(),
        })
    }

    /// Builder-style variant of [`Scene::add_object`].
    pub fn with_objects(mut self, objects: impl IntoIterator<Item = GeometryObject>) -> Self {
        self.objects.extend(objects);
        self
    }

    /// Append an object, returning its index.
    pub fn add_object(&mut self, object: GeometryObject) -> usize {
        log::debug!("Adding object {}: {}", self.objects.len(), object);
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Remove and return the object at `index`.
    pub fn remove_object(&mut self, index: usize) -> SceneResult<GeometryObject> {
        if index >= self.objects.len() {
            return Err(SceneError::OutOfRange {
                index,
                len: self.objects.len(),
            });
        }
        let removed = self.objects.remove(index);
        log::debug!("Removed object {}: {}", index, removed);
        Ok(removed)
    }

    pub fn objects(&self) -> &[GeometryObject] {
        &self.objects
    }

    /// One line per object, as shown in the object list.
    pub fn descriptions(&self) -> Vec<String> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| format!("{}: {}", i, object))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn camera_from(&self) -> Point3 {
        self.camera_from
    }

    pub fn camera_to(&self) -> Point3 {
        self.camera_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_sphere(z: f64) -> GeometryObject {
        GeometryObject::new(
            Shape::sphere(Point3::new(0.0, 0.0, z), 0.5),
            MaterialSpec::matte(Color::splat(0.5)),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_radius_is_rejected() {
        let result = GeometryObject::new(
            Shape::sphere(Point3::ZERO, 0.0),
            MaterialSpec::matte(Color::ONE),
        );
        assert!(matches!(result, Err(SceneError::InvalidConfiguration(_))));

        let negative = GeometryObject::new(
            Shape::sphere(Point3::ZERO, -1.0),
            MaterialSpec::matte(Color::ONE),
        );
        assert!(negative.is_err());
    }

    #[test]
    fn test_equal_camera_points_are_rejected() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = Scene::new(Background::default(), p, p);
        assert!(matches!(result, Err(SceneError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_add_and_remove_objects() {
        let mut scene = Scene::new(Background::sky(), Point3::ZERO, -Point3::Z).unwrap();
        assert_eq!(scene.add_object(gray_sphere(-1.0)), 0);
        assert_eq!(scene.add_object(gray_sphere(-2.0)), 1);

        let removed = scene.remove_object(0).unwrap();
        assert_eq!(removed, gray_sphere(-1.0));
        assert_eq!(scene.objects(), &[gray_sphere(-2.0)]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut scene = Scene::new(Background::sky(), Point3::ZERO, -Point3::Z)
            .unwrap()
            .with_objects([gray_sphere(-1.0)]);

        assert_eq!(
            scene.remove_object(3),
            Err(SceneError::OutOfRange { index: 3, len: 1 })
        );
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_descriptions() {
        let scene = Scene::new(Background::sky(), Point3::ZERO, -Point3::Z)
            .unwrap()
            .with_objects([gray_sphere(-1.0)]);
        let lines = scene.descriptions();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("0: sphere at (0.00, 0.00, -1.00) r=0.50, matte"));
    }

    #[test]
    fn test_gradient_background() {
        let sky = Background::sky();
        let up = sky.color_for(Vec3::Y);
        let down = sky.color_for(-Vec3::Y);
        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down, Color::ONE);

        // Direction length does not matter
        assert_eq!(sky.color_for(Vec3::new(0.0, 5.0, 0.0)), up);
        assert_eq!(Background::Solid(Color::X).color_for(Vec3::Z), Color::X);
    }
}
