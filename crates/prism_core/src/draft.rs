//! Partially filled object from an editing form.

use crate::error::{SceneError, SceneResult};
use crate::material::MaterialSpec;
use crate::scene::{GeometryObject, Shape};

/// Shape and material picked so far in the add-object form.
///
/// Both selections are required; building a draft with either missing is an
/// error rather than a silent default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectDraft {
    pub shape: Option<Shape>,
    pub material: Option<MaterialSpec>,
}

impl ObjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_material(mut self, material: MaterialSpec) -> Self {
        self.material = Some(material);
        self
    }

    /// Turn the draft into a validated object.
    pub fn build(self) -> SceneResult<GeometryObject> {
        let shape = self.shape.ok_or(SceneError::UnspecifiedSelection("shape"))?;
        let material = self
            .material
            .ok_or(SceneError::UnspecifiedSelection("material"))?;
        GeometryObject::new(shape, material)
    }
}
