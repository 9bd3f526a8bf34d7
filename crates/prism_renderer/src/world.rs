//! Render-ready form of a scene.

use prism_core::{Background, Scene, Shape};
use prism_math::{Interval, Ray};

use crate::bvh::BvhNode;
use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;
use crate::pool::{MaterialId, MaterialPool};
use crate::sphere::Sphere;

/// Geometry, materials and background of one render.
///
/// Built once per render and shared read-only by every worker.
#[derive(Debug)]
pub struct World {
    root: Hittable,
    materials: MaterialPool,
    background: Background,
}

impl World {
    pub fn new(root: impl Into<Hittable>, materials: MaterialPool, background: Background) -> Self {
        Self {
            root: root.into(),
            materials,
            background,
        }
    }

    /// Intern the scene's materials and build a BVH over its objects.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut materials = MaterialPool::new();

        let objects: Vec<Hittable> = scene
            .objects()
            .iter()
            .map(|object| {
                let material = materials.intern(object.material());
                match *object.shape() {
                    Shape::Sphere { center, radius } => {
                        Hittable::from(Sphere::new(center, radius, material))
                    }
                }
            })
            .collect();

        let bvh = BvhNode::new(objects);
        log::debug!(
            "Built BVH over {} objects (depth {}), {} distinct materials",
            bvh.primitive_count(),
            bvh.depth(),
            materials.len()
        );

        Self::new(bvh, materials, scene.background())
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.root.hit(ray, ray_t)
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        self.materials.get(id)
    }

    pub fn materials(&self) -> &MaterialPool {
        &self.materials
    }

    pub fn background(&self) -> Background {
        self.background
    }
}
