//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree of bounding boxes over the scene's primitives. Traversal
//! returns the same nearest hit as a linear scan, but skips every subtree
//! whose box the ray misses or that starts beyond the best hit so far.

use prism_math::{Aabb, Interval, Ray};

use crate::hittable::{HitRecord, Hittable};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitives.
#[derive(Debug)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf { objects: Vec<Hittable>, bbox: Aabb },
    /// Tree over zero primitives; never hit.
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects.
    pub fn new(objects: Vec<Hittable>) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }
        Self::build(objects)
    }

    /// Simple median split: sort objects by centroid on the longest axis of
    /// the centroid bounds, split in half, recurse.
    fn build(mut objects: Vec<Hittable>) -> Self {
        let bbox = objects.iter().fold(Aabb::EMPTY, |acc, o| {
            Aabb::surrounding(&acc, &o.bounding_box())
        });

        if objects.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf { objects, bbox };
        }

        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, o| {
            let c = o.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_unstable_by(|a, b| {
            let a_val = a.bounding_box().centroid()[axis];
            let b_val = b.bounding_box().centroid()[axis];
            a_val.total_cmp(&b_val)
        });

        let right_objects = objects.split_off(objects.len() / 2);

        BvhNode::Branch {
            left: Box::new(Self::build(objects)),
            right: Box::new(Self::build(right_objects)),
            bbox,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Empty => Aabb::EMPTY,
        }
    }

    /// Number of primitives stored in the tree.
    pub fn primitive_count(&self) -> usize {
        match self {
            BvhNode::Branch { left, right, .. } => left.primitive_count() + right.primitive_count(),
            BvhNode::Leaf { objects, .. } => objects.len(),
            BvhNode::Empty => 0,
        }
    }

    /// Levels below and including this node.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
            BvhNode::Leaf { .. } => 1,
            BvhNode::Empty => 0,
        }
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut closest: Option<HitRecord> = None;
                for obj in objects {
                    let max = closest.map_or(ray_t.max, |rec| rec.t);
                    if let Some(rec) = obj.hit(ray, ray_t.with_max(max)) {
                        closest = Some(rec);
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.hit(ray, ray_t);

                // Only check right up to closest hit
                let right_max = hit_left.map_or(ray_t.max, |rec| rec.t);
                right.hit(ray, ray_t.with_max(right_max)).or(hit_left)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::pool::MaterialId;
    use crate::sphere::Sphere;
    use prism_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_spheres(rng: &mut StdRng, count: usize) -> Vec<Sphere> {
        (0..count)
            .map(|i| {
                let center = Point3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                );
                Sphere::new(center, rng.gen_range(0.1..2.0), MaterialId::from_index(i))
            })
            .collect()
    }

    fn random_ray(rng: &mut StdRng) -> Ray {
        let origin = Point3::new(
            rng.gen_range(-15.0..15.0),
            rng.gen_range(-15.0..15.0),
            rng.gen_range(-15.0..15.0),
        );
        let target = Point3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        Ray::new_simple(origin, target - origin)
    }

    fn assert_encloses_children(node: &BvhNode) {
        match node {
            BvhNode::Branch { left, right, bbox } => {
                assert!(bbox.encloses(&left.bounding_box()));
                assert!(bbox.encloses(&right.bounding_box()));
                assert_encloses_children(left);
                assert_encloses_children(right);
            }
            BvhNode::Leaf { objects, bbox } => {
                assert!(objects.len() <= LEAF_MAX_SIZE);
                for object in objects {
                    assert!(bbox.encloses(&object.bounding_box()));
                }
            }
            BvhNode::Empty => {}
        }
    }

    #[test]
    fn test_empty_bvh_never_hits() {
        let bvh = BvhNode::new(Vec::new());
        let ray = Ray::new_simple(Point3::ZERO, Vec3::Z);
        assert!(bvh.hit(&ray, Interval::UNIVERSE).is_none());
        assert_eq!(bvh.primitive_count(), 0);
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(42);

        for count in [1, 3, 4, 5, 17, 64, 200] {
            let spheres = random_spheres(&mut rng, count);
            let list: HittableList = spheres.iter().cloned().map(Hittable::from).collect();
            let bvh = BvhNode::new(spheres.into_iter().map(Hittable::from).collect());
            assert_eq!(bvh.primitive_count(), count);

            for _ in 0..300 {
                let ray = random_ray(&mut rng);
                let ray_t = Interval::new(0.001, f64::INFINITY);

                match (list.hit(&ray, ray_t), bvh.hit(&ray, ray_t)) {
                    (None, None) => {}
                    (Some(expected), Some(actual)) => {
                        assert_eq!(expected.t, actual.t);
                        assert_eq!(expected.p, actual.p);
                        assert_eq!(expected.material, actual.material);
                    }
                    (expected, actual) => {
                        panic!("list hit {expected:?} but bvh hit {actual:?} for {ray:?}")
                    }
                }
            }
        }
    }

    #[test]
    fn test_boxes_enclose_children() {
        let mut rng = StdRng::seed_from_u64(7);
        let spheres = random_spheres(&mut rng, 100);
        let bvh = BvhNode::new(spheres.into_iter().map(Hittable::from).collect());

        assert_encloses_children(&bvh);
        // Median splits keep the tree balanced
        assert!(bvh.depth() <= 7);
    }
}
