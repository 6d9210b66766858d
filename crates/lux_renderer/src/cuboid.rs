//! Axis-aligned box built from six rectangle faces.

use std::sync::Arc;

use lux_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::aa_rect::{XyRect, XzRect, YzRect};
use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::Material;

pub struct Cuboid {
    sides: HittableList,
    bbox: Aabb,
}

impl Cuboid {
    /// Box spanning the two opposite corners `p0` and `p1`, every face
    /// sharing the same material.
    pub fn new(p0: Vec3, p1: Vec3, material: Arc<dyn Material>) -> Self {
        let bbox = Aabb::from_points(p0, p1);
        let min = Vec3::new(bbox.x.min, bbox.y.min, bbox.z.min);
        let max = Vec3::new(bbox.x.max, bbox.y.max, bbox.z.max);

        let mut sides = HittableList::new();
        sides.add(Arc::new(XyRect::new(
            min.x,
            max.x,
            min.y,
            max.y,
            max.z,
            material.clone(),
        )));
        sides.add(Arc::new(XyRect::new(
            min.x,
            max.x,
            min.y,
            max.y,
            min.z,
            material.clone(),
        )));
        sides.add(Arc::new(XzRect::new(
            min.x,
            max.x,
            min.z,
            max.z,
            max.y,
            material.clone(),
        )));
        sides.add(Arc::new(XzRect::new(
            min.x,
            max.x,
            min.z,
            max.z,
            min.y,
            material.clone(),
        )));
        sides.add(Arc::new(YzRect::new(
            min.y,
            max.y,
            min.z,
            max.z,
            max.x,
            material.clone(),
        )));
        sides.add(Arc::new(YzRect::new(
            min.y, max.y, min.z, max.z, min.x, material,
        )));

        Self { sides, bbox }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        self.sides.hit(ray, ray_t, rng)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
