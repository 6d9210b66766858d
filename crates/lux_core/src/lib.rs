//! Textures for the lux renderer.
//!
//! Materials pull their surface color through the [`Texture`] trait;
//! implementations cover constant colors, a 3D checker, Perlin marble
//! noise, and image-backed lookups.

mod perlin;
mod texture;

pub use perlin::Perlin;
pub use texture::{
    CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture, TextureError, TextureResult,
};
