//! Bounding volume hierarchy for sublinear intersection queries.

use std::cmp::Ordering;
use std::sync::Arc;

use lux_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};

use crate::hittable::{HitRecord, Hittable};

/// Objects per leaf before splitting stops.
const LEAF_MAX_SIZE: usize = 2;

/// Binary tree of axis-aligned bounds over a set of hittables.
///
/// A node is built by sorting its objects along a randomly chosen axis
/// by bounding-box minimum and splitting the list at its midpoint.
pub enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        objects: Vec<Arc<dyn Hittable>>,
        bbox: Aabb,
    },
    Empty,
}

impl BvhNode {
    pub fn new(objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        if objects.is_empty() {
            return Self::Empty;
        }
        Self::build(objects, rng)
    }

    fn build(mut objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        let bbox = objects.iter().fold(Aabb::EMPTY, |acc, object| {
            Aabb::surrounding(&acc, &object.bounding_box())
        });

        let axis = rng.gen_range(0..3);
        objects.sort_unstable_by(|a, b| box_min_compare(a.as_ref(), b.as_ref(), axis));

        if objects.len() <= LEAF_MAX_SIZE {
            return Self::Leaf { objects, bbox };
        }

        let right_objects = objects.split_off(objects.len() / 2);
        let left = Box::new(Self::build(objects, rng));
        let right = Box::new(Self::build(right_objects, rng));

        Self::Branch { left, right, bbox }
    }
}

fn box_min_compare(a: &dyn Hittable, b: &dyn Hittable, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        match self {
            Self::Empty => None,
            Self::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }
                let mut closest_so_far = ray_t.max;
                let mut closest_hit = None;
                for object in objects {
                    let window = Interval::new(ray_t.min, closest_so_far);
                    if let Some(rec) = object.hit(ray, window, rng) {
                        closest_so_far = rec.t;
                        closest_hit = Some(rec);
                    }
                }
                closest_hit
            }
            Self::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }
                let hit_left = left.hit(ray, ray_t, rng);
                // A left hit caps the window for the right subtree
                let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rng);

                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Self::Branch { bbox, .. } | Self::Leaf { bbox, .. } => *bbox,
            Self::Empty => Aabb::EMPTY,
        }
    }
}
