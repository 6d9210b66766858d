//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments.
///
/// Render parameters are optional here so a settings file can fill the
/// gaps; see [`crate::settings::RenderSettings::resolve`].
#[derive(Debug, Parser)]
#[command(name = "lux")]
#[command(about = "A bucket-parallel CPU path tracer", version)]
pub struct Args {
    /// Scene to render (weekend, checker, perlin, earth, simple-light,
    /// cornell, cornell-smoke, showcase)
    #[arg(long)]
    pub scene: Option<String>,

    /// Image width in pixels; height follows the scene's aspect ratio
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Base seed; renders with equal seeds are byte-identical
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file, .ppm or .png by extension
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// JSON settings file merged beneath the flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Rayon worker threads (0 = library default)
    #[arg(long)]
    pub threads: Option<usize>,
}
