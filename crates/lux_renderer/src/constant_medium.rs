//! Participating medium of constant density inside a boundary shape.

use std::sync::Arc;

use lux_core::Texture;
use lux_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::material::{Color, Isotropic, Material};
use crate::sampling::gen_f32;

/// Fog or smoke filling a boundary. The chance a ray passes through
/// falls off exponentially with the distance travelled inside.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    phase_function: Arc<dyn Material>,
    neg_inv_density: f32,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, color: Color) -> Self {
        Self {
            boundary,
            phase_function: Arc::new(Isotropic::new(color)),
            neg_inv_density: -1.0 / density,
        }
    }

    pub fn textured(boundary: Arc<dyn Hittable>, density: f32, albedo: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            phase_function: Arc::new(Isotropic::textured(albedo)),
            neg_inv_density: -1.0 / density,
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        // Entry and exit of the boundary along the full line, so rays that
        // start inside still see the span behind them
        let rec1 = self.boundary.hit(ray, Interval::UNIVERSE, rng)?;
        let rec2 = self
            .boundary
            .hit(ray, Interval::new(rec1.t + 0.0001, f32::INFINITY), rng)?;

        let mut t_enter = rec1.t.max(ray_t.min);
        let t_exit = rec2.t.min(ray_t.max);
        if t_enter >= t_exit {
            return None;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction.length();
        let distance_inside = (t_exit - t_enter) * ray_length;
        // Exponentially distributed free path
        let hit_distance = self.neg_inv_density * gen_f32(rng).ln();

        if hit_distance > distance_inside {
            return None;
        }

        let t = t_enter + hit_distance / ray_length;
        Some(HitRecord {
            p: ray.at(t),
            // Scatter direction ignores the normal; any value works
            normal: Vec3::X,
            material: self.phase_function.as_ref(),
            u: 0.0,
            v: 0.0,
            t,
            front_face: true,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cuboid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn smoke_box(density: f32) -> ConstantMedium {
        let boundary = Arc::new(Cuboid::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 2.0),
            Arc::new(Isotropic::new(Color::splat(0.5))),
        ));
        ConstantMedium::new(boundary, density, Color::splat(0.5))
    }

    #[test]
    fn test_scatter_fraction_matches_beer_lambert() {
        let medium = smoke_box(0.8);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, 0.0);
        let window = Interval::new(0.001, f32::INFINITY);
        let mut rng = StdRng::seed_from_u64(7);

        let trials = 50_000;
        let scattered = (0..trials)
            .filter(|_| medium.hit(&ray, window, &mut rng).is_some())
            .count();

        // Path length through the box is 2, so 1 - exp(-0.8 * 2)
        let expected = 1.0 - (-1.6_f32).exp();
        let observed = scattered as f32 / trials as f32;
        assert!(
            (observed - expected).abs() < 0.01,
            "observed {observed}, expected {expected}"
        );
    }

    #[test]
    fn test_scatter_point_lies_inside_boundary() {
        let medium = smoke_box(5.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, 0.0);
        let window = Interval::new(0.001, f32::INFINITY);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            if let Some(rec) = medium.hit(&ray, window, &mut rng) {
                assert!(rec.t >= 3.0 && rec.t <= 5.0);
                assert!(rec.p.z >= 0.0 && rec.p.z <= 2.0);
                assert!(rec.front_face);
            }
        }
    }

    #[test]
    fn test_ray_starting_inside_can_scatter() {
        let medium = smoke_box(50.0);
        // Origin sits halfway through the volume
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z, 0.0);
        let window = Interval::new(0.001, f32::INFINITY);
        let mut rng = StdRng::seed_from_u64(2);

        let rec = medium.hit(&ray, window, &mut rng).unwrap();
        assert!(rec.t > 0.0 && rec.t <= 1.0);
    }

    #[test]
    fn test_ray_missing_boundary_never_scatters() {
        let medium = smoke_box(10.0);
        let ray = Ray::new(Vec3::new(5.0, 0.0, -3.0), Vec3::Z, 0.0);
        let window = Interval::new(0.001, f32::INFINITY);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            assert!(medium.hit(&ray, window, &mut rng).is_none());
        }
    }

    #[test]
    fn test_bbox_is_boundary_bbox() {
        let medium = smoke_box(1.0);
        let bbox = medium.bounding_box();

        assert_eq!(bbox.x.min, -1.0);
        assert_eq!(bbox.z.max, 2.0);
    }
}
