//! Demo scene construction.
//!
//! Every builder takes the seeded rng so repeated runs with one seed
//! produce the same world, and wraps the object list in a BVH.

use std::sync::Arc;

use anyhow::bail;
use lux_core::{CheckerTexture, ImageTexture, NoiseTexture};
use lux_renderer::sampling::{gen_f32, gen_range};
use lux_renderer::{
    BvhNode, Camera, Color, ConstantMedium, Cuboid, Dielectric, DiffuseLight, Hittable,
    HittableList, Lambertian, Material, Metal, MovingSphere, RotateY, Sphere, Translate, Vec3,
    XyRect, XzRect, YzRect,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Texture used by the `earth` and `showcase` scenes. When the file is
/// absent the renderer falls back to solid cyan and logs an error.
pub const EARTH_TEXTURE_PATH: &str = "assets/earthmap.jpg";

pub const SCENE_NAMES: &[&str] = &[
    "weekend",
    "checker",
    "perlin",
    "earth",
    "simple-light",
    "cornell",
    "cornell-smoke",
    "showcase",
];

/// A world ready to render, with the camera and background it was
/// composed for.
pub struct Scene {
    pub world: Arc<dyn Hittable>,
    pub camera: Camera,
    pub background: Color,
    pub use_sky_gradient: bool,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("background", &self.background)
            .field("use_sky_gradient", &self.use_sky_gradient)
            .finish_non_exhaustive()
    }
}

/// Build a named scene. `width` overrides the scene's horizontal
/// resolution; height scales to keep the scene's aspect ratio.
pub fn build(name: &str, seed: u64, width: Option<u32>) -> anyhow::Result<Scene> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut scene = match name {
        "weekend" => weekend(&mut rng),
        "checker" => checker(&mut rng),
        "perlin" => perlin(&mut rng),
        "earth" => earth(&mut rng),
        "simple-light" => simple_light(&mut rng),
        "cornell" => cornell(&mut rng),
        "cornell-smoke" => cornell_smoke(&mut rng),
        "showcase" => showcase(&mut rng),
        _ => bail!(
            "unknown scene '{name}', expected one of: {}",
            SCENE_NAMES.join(", ")
        ),
    };

    if let Some(width) = width {
        let height = ((width as u64 * scene.camera.image_height as u64)
            / scene.camera.image_width as u64)
            .max(1) as u32;
        scene.camera = scene.camera.clone().with_resolution(width, height);
    }

    Ok(scene)
}

fn bvh_world(list: HittableList, rng: &mut StdRng) -> Arc<dyn Hittable> {
    Arc::new(BvhNode::new(list.into_objects(), rng))
}

fn random_color(rng: &mut StdRng) -> Color {
    Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}

fn random_color_range(rng: &mut StdRng, min: f32, max: f32) -> Color {
    Color::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

/// The book-cover ball field: checkered ground, a grid of small mixed
/// spheres (diffuse ones rising during the shutter), three hero spheres.
fn weekend(rng: &mut StdRng) -> Scene {
    let mut world = HittableList::new();

    let ground = Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(ground)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep clear of the metal hero sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(rng) * random_color(rng);
                let center2 = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                world.add(Arc::new(MovingSphere::new(
                    center,
                    center2,
                    0.0,
                    1.0,
                    0.2,
                    Arc::new(Lambertian::new(albedo)),
                )));
            } else if choose_mat < 0.95 {
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                world.add(Arc::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Metal::new(albedo, fuzz)),
                )));
            } else {
                world.add(Arc::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Dielectric::new(1.5)),
                )));
            }
        }
    }

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let camera = Camera::new()
        .with_resolution(400, 225)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0)
        .with_shutter(0.0, 1.0);

    Scene {
        world: bvh_world(world, rng),
        camera,
        background: Color::new(0.7, 0.8, 1.0),
        use_sky_gradient: false,
    }
}

fn checker(rng: &mut StdRng) -> Scene {
    let mut world = HittableList::new();

    let texture = Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -10.0, 0.0),
        10.0,
        Arc::new(Lambertian::textured(texture.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 10.0, 0.0),
        10.0,
        Arc::new(Lambertian::textured(texture)),
    )));

    Scene {
        world: bvh_world(world, rng),
        camera: distant_camera(),
        background: Color::new(0.7, 0.8, 1.0),
        use_sky_gradient: false,
    }
}

fn perlin(rng: &mut StdRng) -> Scene {
    let mut world = HittableList::new();

    let marble = Arc::new(NoiseTexture::new(4.0, rng));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(marble.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::textured(marble)),
    )));

    Scene {
        world: bvh_world(world, rng),
        camera: distant_camera(),
        background: Color::new(0.7, 0.8, 1.0),
        use_sky_gradient: false,
    }
}

fn earth(rng: &mut StdRng) -> Scene {
    let mut world = HittableList::new();

    let texture = Arc::new(ImageTexture::load(EARTH_TEXTURE_PATH));
    world.add(Arc::new(Sphere::new(
        Vec3::ZERO,
        2.0,
        Arc::new(Lambertian::textured(texture)),
    )));

    Scene {
        world: bvh_world(world, rng),
        camera: distant_camera(),
        background: Color::new(0.7, 0.8, 1.0),
        use_sky_gradient: false,
    }
}

fn simple_light(rng: &mut StdRng) -> Scene {
    let mut world = HittableList::new();

    let marble = Arc::new(NoiseTexture::new(4.0, rng));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(marble.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::textured(marble)),
    )));

    // Brighter than 1 so bounces still carry energy
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(4.0)));
    world.add(Arc::new(XyRect::new(
        3.0,
        5.0,
        1.0,
        3.0,
        -2.0,
        light.clone(),
    )));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, light)));

    let camera = Camera::new()
        .with_resolution(400, 225)
        .with_position(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_shutter(0.0, 1.0);

    Scene {
        world: bvh_world(world, rng),
        camera,
        background: Color::ZERO,
        use_sky_gradient: false,
    }
}

fn cornell(rng: &mut StdRng) -> Scene {
    let (mut world, white) =
        cornell_shell(Color::splat(15.0), [213.0, 343.0, 227.0, 332.0]);

    let tall: Arc<dyn Hittable> = Arc::new(Cuboid::new(
        Vec3::ZERO,
        Vec3::new(165.0, 330.0, 165.0),
        white.clone(),
    ));
    world.add(Arc::new(Translate::new(
        Arc::new(RotateY::new(tall, 15.0)),
        Vec3::new(265.0, 0.0, 295.0),
    )));

    let short: Arc<dyn Hittable> = Arc::new(Cuboid::new(
        Vec3::ZERO,
        Vec3::new(165.0, 165.0, 165.0),
        white,
    ));
    world.add(Arc::new(Translate::new(
        Arc::new(RotateY::new(short, -18.0)),
        Vec3::new(130.0, 0.0, 65.0),
    )));

    Scene {
        world: bvh_world(world, rng),
        camera: cornell_camera(),
        background: Color::ZERO,
        use_sky_gradient: false,
    }
}

fn cornell_smoke(rng: &mut StdRng) -> Scene {
    let (mut world, white) =
        cornell_shell(Color::splat(7.0), [113.0, 443.0, 127.0, 432.0]);

    let tall: Arc<dyn Hittable> = Arc::new(Translate::new(
        Arc::new(RotateY::new(
            Arc::new(Cuboid::new(
                Vec3::ZERO,
                Vec3::new(165.0, 330.0, 165.0),
                white.clone(),
            )),
            15.0,
        )),
        Vec3::new(265.0, 0.0, 295.0),
    ));
    world.add(Arc::new(ConstantMedium::new(tall, 0.01, Color::ZERO)));

    let short: Arc<dyn Hittable> = Arc::new(Translate::new(
        Arc::new(RotateY::new(
            Arc::new(Cuboid::new(
                Vec3::ZERO,
                Vec3::new(165.0, 165.0, 165.0),
                white,
            )),
            -18.0,
        )),
        Vec3::new(130.0, 0.0, 65.0),
    ));
    world.add(Arc::new(ConstantMedium::new(short, 0.01, Color::ONE)));

    Scene {
        world: bvh_world(world, rng),
        camera: cornell_camera(),
        background: Color::ZERO,
        use_sky_gradient: false,
    }
}

/// The final composite scene: boxed terrain, lights, motion blur, glass,
/// media, textures, and a BVH-wrapped cluster of spheres.
fn showcase(rng: &mut StdRng) -> Scene {
    let mut world = HittableList::new();

    // Terrain of random-height boxes under its own BVH
    let ground = Arc::new(Lambertian::new(Color::new(0.48, 0.83, 0.53)));
    let mut boxes = HittableList::new();
    let boxes_per_side = 20;
    for i in 0..boxes_per_side {
        for j in 0..boxes_per_side {
            let w = 100.0;
            let x0 = -1000.0 + i as f32 * w;
            let z0 = -1000.0 + j as f32 * w;
            let y1 = gen_range(rng, 1.0, 101.0);
            boxes.add(Arc::new(Cuboid::new(
                Vec3::new(x0, 0.0, z0),
                Vec3::new(x0 + w, y1, z0 + w),
                ground.clone(),
            )));
        }
    }
    world.add(Arc::new(BvhNode::new(boxes.into_objects(), rng)));

    let light = Arc::new(DiffuseLight::new(Color::splat(7.0)));
    world.add(Arc::new(XzRect::new(
        123.0, 423.0, 147.0, 412.0, 554.0, light,
    )));

    let center1 = Vec3::new(400.0, 400.0, 200.0);
    let center2 = center1 + Vec3::new(30.0, 0.0, 0.0);
    world.add(Arc::new(MovingSphere::new(
        center1,
        center2,
        0.0,
        1.0,
        50.0,
        Arc::new(Lambertian::new(Color::new(0.7, 0.3, 0.1))),
    )));

    world.add(Arc::new(Sphere::new(
        Vec3::new(260.0, 150.0, 45.0),
        50.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 150.0, 145.0),
        50.0,
        Arc::new(Metal::new(Color::new(0.8, 0.8, 0.9), 1.0)),
    )));

    // Blue subsurface sphere: glass shell and interior medium share the
    // boundary object
    let boundary: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::new(360.0, 150.0, 145.0),
        70.0,
        Arc::new(Dielectric::new(1.5)),
    ));
    world.add(boundary.clone());
    world.add(Arc::new(ConstantMedium::new(
        boundary,
        0.2,
        Color::new(0.2, 0.4, 0.9),
    )));

    // Thin mist over the whole scene
    let mist: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::ZERO,
        5000.0,
        Arc::new(Dielectric::new(1.5)),
    ));
    world.add(Arc::new(ConstantMedium::new(mist, 0.0001, Color::ONE)));

    let earth = Arc::new(ImageTexture::load(EARTH_TEXTURE_PATH));
    world.add(Arc::new(Sphere::new(
        Vec3::new(400.0, 200.0, 400.0),
        100.0,
        Arc::new(Lambertian::textured(earth)),
    )));
    let marble = Arc::new(NoiseTexture::new(0.1, rng));
    world.add(Arc::new(Sphere::new(
        Vec3::new(220.0, 280.0, 300.0),
        80.0,
        Arc::new(Lambertian::textured(marble)),
    )));

    // Cube-shaped cluster of a thousand small spheres
    let white = Arc::new(Lambertian::new(Color::splat(0.73)));
    let mut cluster = HittableList::new();
    for _ in 0..1000 {
        let center = Vec3::new(
            gen_range(rng, 0.0, 165.0),
            gen_range(rng, 0.0, 165.0),
            gen_range(rng, 0.0, 165.0),
        );
        cluster.add(Arc::new(Sphere::new(center, 10.0, white.clone())));
    }
    world.add(Arc::new(Translate::new(
        Arc::new(RotateY::new(
            Arc::new(BvhNode::new(cluster.into_objects(), rng)),
            15.0,
        )),
        Vec3::new(-100.0, 270.0, 395.0),
    )));

    let camera = Camera::new()
        .with_resolution(800, 800)
        .with_position(
            Vec3::new(478.0, 278.0, -600.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0)
        .with_shutter(0.0, 1.0);

    Scene {
        world: bvh_world(world, rng),
        camera,
        background: Color::ZERO,
        use_sky_gradient: false,
    }
}

/// Walls, floor, ceiling, and ceiling light of the 555-unit Cornell box.
/// Returns the list and the white material the boxes reuse.
fn cornell_shell(
    light_color: Color,
    panel: [f32; 4],
) -> (HittableList, Arc<dyn Material>) {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(light_color));

    let mut world = HittableList::new();
    world.add(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    world.add(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(Arc::new(XzRect::new(
        panel[0], panel[1], panel[2], panel[3], 554.0, light,
    )));
    world.add(Arc::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        0.0,
        white.clone(),
    )));
    world.add(Arc::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )));
    world.add(Arc::new(XyRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )));

    (world, white)
}

fn cornell_camera() -> Camera {
    Camera::new()
        .with_resolution(600, 600)
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0)
        .with_shutter(0.0, 1.0)
}

/// Shared vantage for the small lookdev scenes.
fn distant_camera() -> Camera {
    Camera::new()
        .with_resolution(400, 225)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_shutter(0.0, 1.0)
}
