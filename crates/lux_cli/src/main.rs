//! lux - bucket-parallel CPU path tracer.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lux_renderer::{render, ImageBuffer, RenderConfig};

mod cli;
mod scenes;
mod settings;

use cli::Args;
use settings::RenderSettings;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let settings = match &args.config {
        Some(path) => RenderSettings::load(path)?,
        None => RenderSettings::default(),
    };
    let run = settings.resolve(&args);

    if run.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(run.threads)
            .build_global()
            .context("configuring rayon thread pool")?;
    }

    let scene = scenes::build(&run.scene, run.seed, run.width)?;
    let config = RenderConfig {
        samples_per_pixel: run.samples,
        max_depth: run.depth,
        background: scene.background,
        use_sky_gradient: scene.use_sky_gradient,
        seed: run.seed,
    };

    log::info!("scene '{}', seed {}", run.scene, run.seed);
    let start = Instant::now();
    let image = render(&scene.camera, scene.world.as_ref(), &config);
    log::info!("render finished in {:.2}s", start.elapsed().as_secs_f32());

    write_image(&image, &run.output)?;
    log::info!("wrote {}", run.output.display());
    Ok(())
}

/// Write the image as PPM or PNG depending on the output extension.
fn write_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "ppm" => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            image
                .write_ppm(&mut writer)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        "png" => {
            let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
                .context("packing image bytes")?;
            rgb.save(path)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        other => bail!("unsupported output extension '{other}', expected .ppm or .png"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_renderer::Color;

    #[test]
    fn test_write_image_rejects_unknown_extension() {
        let image = ImageBuffer::new(2, 2);
        let error = write_image(&image, Path::new("render.bmp"))
            .unwrap_err()
            .to_string();
        assert!(error.contains("bmp"));
    }

    #[test]
    fn test_write_image_ppm_round_trip() {
        let mut image = ImageBuffer::new(1, 1);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));

        let path = std::env::temp_dir().join("lux_write_image_test.ppm");
        write_image(&image, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "P3\n1 1\n255\n255 0 0\n");
        std::fs::remove_file(&path).ok();
    }
}
