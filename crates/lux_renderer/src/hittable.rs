//! Hittable trait, hit records, and the linear-scan object list.

use std::sync::Arc;

use lux_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::Material;

/// Record of a ray-object intersection.
///
/// The material is borrowed, not owned; many records over a frame point
/// at the same shared material instance.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal, always oriented against the incoming ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV surface coordinates
    pub u: f32,
    pub v: f32,
    /// Ray parameter at the intersection
    pub t: f32,
    /// Whether the outward normal faced the ray (front side hit)
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal, flipping it to
    /// face the ray and remembering which side was struck.
    pub fn new(
        ray: &Ray,
        p: Vec3,
        outward_normal: Vec3,
        t: f32,
        u: f32,
        v: f32,
        material: &'a dyn Material,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            material,
            u,
            v,
            t,
            front_face,
        }
    }
}

/// Anything a ray can intersect.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with parameter strictly inside `ray_t`, if any.
    ///
    /// The random source exists for volumetric hittables that sample a
    /// scattering distance during intersection; surface shapes ignore it.
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>>;

    /// Conservative bound valid for every ray time.
    fn bounding_box(&self) -> Aabb;
}

/// An unordered list of hittables, scanned linearly.
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Hand the objects over, e.g. to the BVH builder.
    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        for object in &self.objects {
            let window = Interval::new(ray_t.min, closest_so_far);
            if let Some(rec) = object.hit(ray, window, rng) {
                closest_so_far = rec.t;
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
