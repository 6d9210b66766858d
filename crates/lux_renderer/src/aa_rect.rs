//! Axis-aligned rectangles, one struct per fixed axis.

use std::sync::Arc;

use lux_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::Material;

/// Minimum slab thickness for a rectangle's otherwise flat bounding box.
const BBOX_PAD: f32 = 1e-4;

/// Rectangle in the z = k plane.
pub struct XyRect {
    x: Interval,
    y: Interval,
    k: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl XyRect {
    pub fn new(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        let x = Interval::new(x0, x1);
        let y = Interval::new(y0, y1);
        Self {
            x,
            y,
            k,
            material,
            bbox: Aabb::new(x, y, Interval::new(k, k)).pad_to_minimums(BBOX_PAD),
        }
    }
}

impl Hittable for XyRect {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        // Rays parallel to the plane give an infinite or NaN t, which the
        // open window rejects below
        let t = (self.k - ray.origin.z) / ray.direction.z;
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        if !self.x.contains(p.x) || !self.y.contains(p.y) {
            return None;
        }

        let u = (p.x - self.x.min) / self.x.size();
        let v = (p.y - self.y.min) / self.y.size();

        Some(HitRecord::new(ray, p, Vec3::Z, t, u, v, self.material.as_ref()))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rectangle in the y = k plane.
pub struct XzRect {
    x: Interval,
    z: Interval,
    k: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl XzRect {
    pub fn new(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        let x = Interval::new(x0, x1);
        let z = Interval::new(z0, z1);
        Self {
            x,
            z,
            k,
            material,
            bbox: Aabb::new(x, Interval::new(k, k), z).pad_to_minimums(BBOX_PAD),
        }
    }
}

impl Hittable for XzRect {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        let t = (self.k - ray.origin.y) / ray.direction.y;
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        if !self.x.contains(p.x) || !self.z.contains(p.z) {
            return None;
        }

        let u = (p.x - self.x.min) / self.x.size();
        let v = (p.z - self.z.min) / self.z.size();

        Some(HitRecord::new(ray, p, Vec3::Y, t, u, v, self.material.as_ref()))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rectangle in the x = k plane.
pub struct YzRect {
    y: Interval,
    z: Interval,
    k: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl YzRect {
    pub fn new(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        let y = Interval::new(y0, y1);
        let z = Interval::new(z0, z1);
        Self {
            y,
            z,
            k,
            material,
            bbox: Aabb::new(Interval::new(k, k), y, z).pad_to_minimums(BBOX_PAD),
        }
    }
}

impl Hittable for YzRect {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        let t = (self.k - ray.origin.x) / ray.direction.x;
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        if !self.y.contains(p.y) || !self.z.contains(p.z) {
            return None;
        }

        let u = (p.y - self.y.min) / self.y.size();
        let v = (p.z - self.z.min) / self.z.size();

        Some(HitRecord::new(ray, p, Vec3::X, t, u, v, self.material.as_ref()))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_material() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_xz_rect_hit_from_above() {
        let rect = XzRect::new(-1.0, 1.0, -1.0, 1.0, 0.0, test_material());
        let ray = Ray::new(Vec3::new(0.5, 2.0, -0.5), Vec3::new(0.0, -1.0, 0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let rec = rect
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();

        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Y).length() < 1e-5);
        assert!((rec.u - 0.75).abs() < 1e-5);
        assert!((rec.v - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_xz_rect_hit_from_below_is_back_face() {
        let rect = XzRect::new(-1.0, 1.0, -1.0, 1.0, 0.0, test_material());
        let ray = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let rec = rect
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();

        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_out_of_bounds_misses() {
        let rect = XyRect::new(-1.0, 1.0, -1.0, 1.0, -2.0, test_material());
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(rect
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let rect = XzRect::new(-1.0, 1.0, -1.0, 1.0, 0.5, test_material());
        // Direction has no y component, so t is not finite
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(rect
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .is_none());
    }

    #[test]
    fn test_yz_rect_normal_and_uv() {
        let rect = YzRect::new(0.0, 2.0, 0.0, 4.0, 1.0, test_material());
        let ray = Ray::new(Vec3::new(5.0, 1.0, 1.0), Vec3::new(-1.0, 0.0, 0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let rec = rect
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();

        assert!((rec.normal - Vec3::X).length() < 1e-5);
        assert!((rec.u - 0.5).abs() < 1e-5);
        assert!((rec.v - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_bbox_padded_on_flat_axis() {
        let rect = XyRect::new(-1.0, 1.0, -1.0, 1.0, 3.0, test_material());
        let bbox = rect.bounding_box();

        // Full-size axes untouched, flat axis opened around k
        assert_eq!(bbox.x.min, -1.0);
        assert_eq!(bbox.x.max, 1.0);
        assert!(bbox.z.size() > 0.0);
        assert!(bbox.z.contains(3.0));
    }
}
