//! Shared, immutable material storage.

use prism_core::MaterialSpec;

use crate::material::Material;

/// Handle to a material stored in a [`MaterialPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        MaterialId(index)
    }
}

/// Owns every material of a render; geometry refers to entries by id.
#[derive(Debug, Default)]
pub struct MaterialPool {
    materials: Vec<Material>,
    specs: Vec<MaterialSpec>,
}

impl MaterialPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `spec`, creating the material on first use.
    ///
    /// Objects described with equal specs end up sharing one material.
    pub fn intern(&mut self, spec: &MaterialSpec) -> MaterialId {
        if let Some(index) = self.specs.iter().position(|s| s == spec) {
            return MaterialId(index);
        }
        self.materials.push(Material::from_spec(spec));
        self.specs.push(spec.clone());
        MaterialId(self.materials.len() - 1)
    }

    /// Material behind `id`.
    ///
    /// Ids are only handed out by this pool, so a foreign id is a logic error
    /// and panics.
    pub fn get(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::Color;

    #[test]
    fn test_intern_shares_equal_specs() {
        let mut pool = MaterialPool::new();
        let gray = MaterialSpec::matte(Color::splat(0.5));

        let a = pool.intern(&gray);
        let b = pool.intern(&MaterialSpec::bk7_glass());
        let c = pool.intern(&gray);

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(a), &Material::from_spec(&gray));
    }
}
