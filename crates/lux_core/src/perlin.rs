use lux_math::Vec3;
use rand::{Rng, RngCore};

const POINT_COUNT: usize = 256;

/// Gradient-lattice Perlin noise over 256 random unit vectors and three
/// independent permutation tables.
pub struct Perlin {
    ranvec: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let ranvec = (0..POINT_COUNT)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                )
                .normalize()
            })
            .collect();

        Self {
            ranvec,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Smoothed gradient noise, roughly in [-1, 1].
    pub fn noise(&self, p: Vec3) -> f32 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let xi = ((i + di as i32) & 255) as usize;
                    let yi = ((j + dj as i32) & 255) as usize;
                    let zi = ((k + dk as i32) & 255) as usize;
                    *corner = self.ranvec[self.perm_x[xi] ^ self.perm_y[yi] ^ self.perm_z[zi]];
                }
            }
        }

        perlin_interp(&c, u, v, w)
    }

    /// Turbulence: magnitude of `depth` noise octaves summed with halving
    /// amplitude and doubling frequency.
    pub fn turb(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }
        accum.abs()
    }
}

/// Fisher-Yates shuffle of the identity permutation.
fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut p: Vec<usize> = (0..POINT_COUNT).collect();
    for i in (1..POINT_COUNT).rev() {
        let target = rng.gen_range(0..=i);
        p.swap(i, target);
    }
    p
}

/// Trilinear interpolation of corner-gradient dot products, with a
/// Hermite fade on each axis to kill Mach banding.
fn perlin_interp(c: &[[[Vec3; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, corner) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                let weight = Vec3::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * corner.dot(weight);
            }
        }
    }
    accum
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_is_deterministic_for_a_seed() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let perlin_a = Perlin::new(&mut rng_a);
        let perlin_b = Perlin::new(&mut rng_b);

        for i in 0..16 {
            let p = Vec3::new(i as f32 * 0.37, i as f32 * -1.91, i as f32 * 2.3);
            assert_eq!(perlin_a.noise(p), perlin_b.noise(p));
        }
    }

    #[test]
    fn test_noise_stays_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        let perlin = Perlin::new(&mut rng);

        for i in -20..20 {
            for j in -20..20 {
                let p = Vec3::new(i as f32 * 0.73, j as f32 * 0.41, (i + j) as f32 * 0.19);
                let n = perlin.noise(p);
                assert!(n.abs() <= 2.0, "noise {n} escaped bounds at {p:?}");
            }
        }
    }

    #[test]
    fn test_turb_is_non_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        let perlin = Perlin::new(&mut rng);

        for i in 0..64 {
            let p = Vec3::new(i as f32 * 0.11, i as f32 * 0.29, i as f32 * -0.07);
            assert!(perlin.turb(p, 7) >= 0.0);
        }
    }

    #[test]
    fn test_gradients_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(5);
        let perlin = Perlin::new(&mut rng);

        for v in &perlin.ranvec {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_permutations_are_permutations() {
        let mut rng = StdRng::seed_from_u64(9);
        let perlin = Perlin::new(&mut rng);

        for table in [&perlin.perm_x, &perlin.perm_y, &perlin.perm_z] {
            let mut seen = vec![false; POINT_COUNT];
            for &idx in table.iter() {
                assert!(!seen[idx]);
                seen[idx] = true;
            }
        }
    }
}
