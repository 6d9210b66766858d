//! Surface and volume scattering models.

use std::sync::Arc;

use lux_math::{Ray, Vec3};
use lux_core::{SolidColor, Texture};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampling::{random_in_unit_sphere, random_unit_vector};

/// RGB color, components in linear space.
pub type Color = Vec3;

/// Outcome of a successful scatter: the bounced ray and its per-channel
/// throughput.
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How a surface responds to an incoming ray.
pub trait Material: Send + Sync {
    /// Scatter the incoming ray at the hit point, or absorb it (`None`).
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Light emitted from the hit point. Non-emissive by default.
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Diffuse surface scattering cosine-weighted about the normal.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo: Arc::new(SolidColor::new(albedo)),
        }
    }

    pub fn textured(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Degenerate when the random vector nearly cancels the normal
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time),
        })
    }
}

/// Reflective surface with optional fuzz.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction.normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the bounce below the surface; absorb it there
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction, ray_in.time),
        })
    }
}

/// Clear refractive material such as glass or water.
pub struct Dielectric {
    /// Index of refraction relative to the surrounding medium
    ior: f32,
}

impl Dielectric {
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction.normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Snell's law has no solution past the critical angle
        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction = if cannot_refract {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time),
        })
    }
}

/// Emissive surface. Absorbs everything and radiates its texture.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(color: Color) -> Self {
        Self {
            emit: Arc::new(SolidColor::new(color)),
        }
    }

    pub fn textured(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.emit.value(u, v, p)
    }
}

/// Phase function that scatters uniformly in all directions. Used as the
/// interior of participating media.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo: Arc::new(SolidColor::new(albedo)),
        }
    }

    pub fn textured(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, random_unit_vector(rng), ray_in.time),
        })
    }
}

fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::Interval;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record_at_origin<'a>(
        ray: &Ray,
        outward_normal: Vec3,
        material: &'a dyn Material,
    ) -> HitRecord<'a> {
        HitRecord::new(ray, Vec3::ZERO, outward_normal, 1.0, 0.0, 0.0, material)
    }

    #[test]
    fn test_lambertian_attenuation_matches_albedo() {
        let material = Lambertian::new(Color::new(0.8, 0.2, 0.1));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 0.7);
        let rec = record_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(11);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();

        assert_eq!(result.attenuation, Color::new(0.8, 0.2, 0.1));
        // Motion-blur time rides along with the bounce
        assert_eq!(result.scattered.time, 0.7);
        // Cosine-weighted bounce stays in the upper hemisphere
        assert!(result.scattered.direction.dot(rec.normal) > 0.0);
    }

    #[test]
    fn test_metal_mirror_reflection_without_fuzz() {
        let material = Metal::new(Color::splat(0.9), 0.0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0);
        let rec = record_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(3);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();

        assert!((result.scattered.direction - expected).length() < 1e-6);
    }

    #[test]
    fn test_metal_absorbs_grazing_bounce_below_surface() {
        // Full fuzz on a grazing reflection can dip under the surface.
        // Run a batch and require absorption to show up.
        let material = Metal::new(Color::splat(0.9), 1.0);
        let ray = Ray::new(
            Vec3::new(0.0, 0.001, -1.0),
            Vec3::new(0.0, -0.001, 1.0),
            0.0,
        );
        let rec = record_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(5);

        let absorbed = (0..200)
            .filter(|_| material.scatter(&ray, &rec, &mut rng).is_none())
            .count();
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_refracts_entering_glass() {
        let material = Dielectric::new(1.5);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.6, -0.8, 0.0), 0.0);
        let rec = record_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(0);

        // Air to glass never hits the critical angle
        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::ONE);
        // Refracted ray continues into the surface
        assert!(result.scattered.direction.y < 0.0);
        // Bending toward the normal: horizontal component shrinks
        let incoming_sin = 0.6;
        let outgoing = result.scattered.direction.normalize();
        assert!(outgoing.x.abs() < incoming_sin);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Dielectric::new(1.5);
        // Leaving glass at a grazing angle, well past the critical angle
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.9, 0.1, 0.0), 0.0);
        let rec = HitRecord::new(
            &ray,
            Vec3::ZERO,
            Vec3::Y,
            1.0,
            0.0,
            0.0,
            &material as &dyn Material,
        );
        assert!(!rec.front_face);
        let mut rng = StdRng::seed_from_u64(0);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        // Reflected back down into the glass
        assert!(result.scattered.direction.y < 0.0);
    }

    #[test]
    fn test_diffuse_light_emits_and_never_scatters() {
        let material = DiffuseLight::new(Color::new(4.0, 3.0, 2.0));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 0.0);
        let rec = record_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(
            material.emitted(0.5, 0.5, Vec3::ZERO),
            Color::new(4.0, 3.0, 2.0)
        );
    }

    #[test]
    fn test_lambertian_emits_nothing() {
        let material = Lambertian::new(Color::splat(0.5));
        assert_eq!(material.emitted(0.0, 0.0, Vec3::ZERO), Color::ZERO);
    }

    #[test]
    fn test_isotropic_scatters_unit_direction() {
        let material = Isotropic::new(Color::splat(0.7));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z, 0.3);
        let rec = record_at_origin(&ray, Vec3::X, &material);
        let mut rng = StdRng::seed_from_u64(21);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert!((result.scattered.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(result.scattered.time, 0.3);
    }

    #[test]
    fn test_degenerate_lambertian_falls_back_to_normal() {
        // Can't force the rng to cancel the normal exactly, but the fallback
        // keeps every scatter direction well away from zero length.
        let material = Lambertian::new(Color::splat(0.5));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 0.0);
        let rec = record_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!(result.scattered.direction.length_squared() >= 1e-8);
        }
    }

    #[test]
    fn test_hit_window_excludes_boundary() {
        // Sanity anchor for the shrinking-window convention used everywhere
        let window = Interval::new(0.001, 2.0);
        assert!(!window.surrounds(2.0));
        assert!(window.surrounds(1.999));
    }
}
