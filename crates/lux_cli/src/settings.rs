//! Optional JSON settings file merged beneath the command line flags.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Args;

/// Settings file contents. Every field is optional so partial files
/// work; unknown keys are rejected to catch typos.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub scene: Option<String>,
    pub width: Option<u32>,
    pub samples: Option<u32>,
    pub depth: Option<u32>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub threads: Option<usize>,
}

impl RenderSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let settings = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings)
    }

    /// Flags win over file values; remaining holes take defaults.
    /// Width has no global default, the scene's own resolution applies.
    pub fn resolve(self, args: &Args) -> Resolved {
        Resolved {
            scene: args
                .scene
                .clone()
                .or(self.scene)
                .unwrap_or_else(|| "showcase".to_string()),
            width: args.width.or(self.width),
            samples: args.samples.or(self.samples).unwrap_or(100),
            depth: args.depth.or(self.depth).unwrap_or(50),
            seed: args.seed.or(self.seed).unwrap_or(0),
            output: args
                .output
                .clone()
                .or(self.output)
                .unwrap_or_else(|| PathBuf::from("render.ppm")),
            threads: args.threads.or(self.threads).unwrap_or(0),
        }
    }
}

/// Fully resolved run parameters.
#[derive(Debug)]
pub struct Resolved {
    pub scene: String,
    pub width: Option<u32>,
    pub samples: u32,
    pub depth: u32,
    pub seed: u64,
    pub output: PathBuf,
    pub threads: usize,
}
