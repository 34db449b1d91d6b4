//! Command-line overrides shared by every `sanctum` subcommand.

use std::path::PathBuf;

use clap::Args;
use sanctum_math::ThreatLevel;

use crate::Config;

/// Sanctum command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Default, Clone)]
pub struct CliArgs {
    /// District manifest (RON) to load instead of the built-in hall.
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Initial threat level (safe, warning, danger).
    #[arg(long, global = true)]
    pub threat: Option<ThreatLevel>,

    /// Root seed for every particle pool.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Number of simulation steps.
    #[arg(long, global = true)]
    pub frames: Option<u64>,

    /// Simulation step in seconds.
    #[arg(long, global = true)]
    pub dt: Option<f64>,

    /// Tick particle pools on worker threads.
    #[arg(long, global = true)]
    pub parallel: Option<bool>,

    /// Swatch edge length in pixels.
    #[arg(long, global = true)]
    pub size: Option<u32>,

    /// Output directory for swatches.
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref manifest) = args.manifest {
            self.scene.manifest = Some(manifest.clone());
        }
        if let Some(threat) = args.threat {
            self.scene.threat = Some(threat);
        }
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(frames) = args.frames {
            self.runtime.frame_count = frames;
        }
        if let Some(dt) = args.dt {
            self.runtime.fixed_dt = dt;
        }
        if let Some(parallel) = args.parallel {
            self.runtime.parallel_pools = parallel;
        }
        if let Some(size) = args.size {
            self.preview.size = size;
        }
        if let Some(ref output) = args.output {
            self.preview.output_dir = output.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
