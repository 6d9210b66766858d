//! lux renderer - CPU path tracing
//!
//! A Monte Carlo path tracer in the Ray Tracing in One Weekend lineage:
//! spheres, rectangles, boxes, instancing transforms, participating
//! media, and a BVH over it all, rendered in parallel buckets.

mod aa_rect;
mod bucket;
mod bvh;
mod camera;
mod constant_medium;
mod cuboid;
mod hittable;
mod material;
mod moving_sphere;
mod renderer;
pub mod sampling;
mod sphere;
mod transform;

pub use aa_rect::{XyRect, XzRect, YzRect};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use constant_medium::ConstantMedium;
pub use cuboid::Cuboid;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use moving_sphere::MovingSphere;
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
};
pub use sphere::Sphere;
pub use transform::{RotateY, Translate};

/// Re-export the math types that appear throughout the public API
pub use lux_math::{Aabb, Interval, Ray, Vec3};
