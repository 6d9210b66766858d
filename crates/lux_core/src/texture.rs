use std::path::Path;
use std::sync::Arc;

use lux_math::Vec3;
use thiserror::Error;

use crate::Perlin;

/// Errors from reading and decoding texture image files.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to read texture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode texture image: {0}")]
    Decode(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A color that varies over a surface.
///
/// `u`/`v` are the shape's surface parameterization; `p` is the world-space
/// hit point, which the procedural textures key on directly.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Vec3;
}

/// The same color everywhere.
pub struct SolidColor {
    albedo: Vec3,
}

impl SolidColor {
    pub fn new(albedo: Vec3) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Vec3::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Vec3 {
        self.albedo
    }
}

/// 3D checker driven by the hit point: the sign of
/// sin(10x)*sin(10y)*sin(10z) picks the even or odd sub-texture.
pub struct CheckerTexture {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Vec3, odd: Vec3) -> Self {
        Self::new(
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Vec3 {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Marble pattern: a sine over z, phase-shifted by turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(scale: f32, rng: &mut dyn rand::RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Vec3 {
        Vec3::ONE * 0.5 * (1.0 + (self.scale * p.z + 10.0 * self.noise.turb(p, 7)).sin())
    }
}

/// Image-backed lookup addressed by surface UV.
///
/// A texture that failed to load keeps rendering: every lookup returns
/// solid cyan so the problem is visible in the output. [`ImageTexture::load`]
/// surfaces the underlying error through the log.
pub struct ImageTexture {
    width: usize,
    height: usize,
    /// Row-major RGB, bytes scaled to [0,1]. Empty for the fallback.
    pixels: Vec<[f32; 3]>,
}

const FALLBACK_CYAN: Vec3 = Vec3::new(0.0, 1.0, 1.0);

impl ImageTexture {
    /// Load an image, substituting the cyan debug fallback on failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(texture) => texture,
            Err(err) => {
                log::error!("could not load texture image '{}': {err}", path.display());
                Self {
                    width: 0,
                    height: 0,
                    pixels: Vec::new(),
                }
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let bytes = std::fs::read(path)?;
        let img = image::load_from_memory(&bytes)?.to_rgb8();
        let (width, height) = img.dimensions();

        let pixels = img
            .pixels()
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                ]
            })
            .collect();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
        })
    }

    /// Build directly from pixel data (row 0 at the top of the image).
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<[f32; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Vec3 {
        if self.pixels.is_empty() {
            return FALLBACK_CYAN;
        }

        let u = u.clamp(0.0, 1.0);
        // Flip V to image row order
        let v = 1.0 - v.clamp(0.0, 1.0);

        let i = ((u * self.width as f32) as usize).min(self.width - 1);
        let j = ((v * self.height as f32) as usize).min(self.height - 1);

        let pixel = self.pixels[j * self.width + i];
        Vec3::new(pixel[0], pixel[1], pixel[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_ignores_coordinates() {
        let tex = SolidColor::from_rgb(0.9, 0.1, 0.4);

        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), Vec3::new(0.9, 0.1, 0.4));
        assert_eq!(
            tex.value(0.7, 0.3, Vec3::new(-4.0, 2.0, 9.0)),
            Vec3::new(0.9, 0.1, 0.4)
        );
    }

    #[test]
    fn test_checker_alternates_by_position() {
        let even = Vec3::splat(1.0);
        let odd = Vec3::splat(0.0);
        let tex = CheckerTexture::from_colors(even, odd);

        // sin(0.5)^3 > 0 -> even
        let p_even = Vec3::splat(0.05);
        assert_eq!(tex.value(0.0, 0.0, p_even), even);

        // Flipping one coordinate flips the sign of the product -> odd
        let p_odd = Vec3::new(0.05, 0.05, -0.05);
        assert_eq!(tex.value(0.0, 0.0, p_odd), odd);
    }

    #[test]
    fn test_noise_texture_stays_in_unit_range() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(42);
        let tex = NoiseTexture::new(4.0, &mut rng);

        for i in 0..64 {
            let p = Vec3::new(i as f32 * 0.13, i as f32 * -0.07, i as f32 * 0.31);
            let c = tex.value(0.0, 0.0, p);
            assert!(c.x >= 0.0 && c.x <= 1.0);
            // Marble tint is grayscale
            assert_eq!(c.x, c.y);
            assert_eq!(c.y, c.z);
        }
    }

    #[test]
    fn test_missing_image_falls_back_to_cyan() {
        let tex = ImageTexture::load("definitely/not/a/real/file.png");

        assert_eq!(tex.value(0.5, 0.5, Vec3::ZERO), FALLBACK_CYAN);
        assert_eq!(tex.value(0.0, 1.0, Vec3::ZERO), FALLBACK_CYAN);
    }

    #[test]
    fn test_try_load_reports_missing_file() {
        let result = ImageTexture::try_load("definitely/not/a/real/file.png");
        assert!(matches!(result, Err(TextureError::Io(_))));
    }

    #[test]
    fn test_try_load_reports_bad_data() {
        let dir = std::env::temp_dir().join("lux_texture_bad_data_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not_an_image.png");
        std::fs::write(&path, b"this is not image data").unwrap();

        let result = ImageTexture::try_load(&path);
        assert!(matches!(result, Err(TextureError::Decode(_))));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_image_lookup_flips_v() {
        let top = [1.0, 0.0, 0.0];
        let bottom = [0.0, 0.0, 1.0];
        let tex = ImageTexture::from_pixels(1, 2, vec![top, bottom]);

        // v=1 is the top of the image, v=0 the bottom
        assert_eq!(tex.value(0.0, 1.0, Vec3::ZERO), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_image_lookup_clamps_uv() {
        let tex = ImageTexture::from_pixels(
            2,
            1,
            vec![[0.2, 0.2, 0.2], [0.8, 0.8, 0.8]],
        );

        // Out-of-range u clamps to the edge pixels
        assert_eq!(tex.value(-3.0, 0.5, Vec3::ZERO), Vec3::splat(0.2));
        assert_eq!(tex.value(42.0, 0.5, Vec3::ZERO), Vec3::splat(0.8));
    }
}
