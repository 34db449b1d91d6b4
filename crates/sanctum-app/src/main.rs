//! The `sanctum` binary: run a district headless or render material swatches.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sanctum_app::error::AppError;
use sanctum_app::platform::PlatformDirs;
use sanctum_app::preview::write_swatches;
use sanctum_app::runner::{Runner, load_district};
use sanctum_config::{CliArgs, Config};
use sanctum_scene::DistrictManifest;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sanctum", version, about = "Procedural visual synthesis for ceremonial districts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    args: CliArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Step the district on a fixed timestep and report particle statistics.
    Run,
    /// Render material swatches to PNG files.
    Preview {
        /// Only render this material.
        #[arg(long)]
        material: Option<String>,
    },
    /// Write the built-in ceremonial hall manifest as RON.
    Export {
        /// Destination file.
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("sanctum: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut dirs = PlatformDirs::resolve_and_create()?;
    if let Some(config_dir) = cli.args.config.clone() {
        dirs = dirs.with_config_dir(config_dir);
    }

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&cli.args);
    config.validate()?;

    let log_dir = config.debug.log_dir.clone().unwrap_or_else(|| dirs.log_dir.clone());
    sanctum_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %dirs.config_dir.display(), "Sanctum starting");

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let district = load_district(&config.scene)?;
            let mut runner = Runner::new(district, &config);
            let summary = runner.run(&config.runtime)?;
            info!(
                frames = summary.frames,
                recycled = summary.recycled,
                degenerate = summary.degenerate,
                clock_anomalies = summary.clock_anomalies,
                threat_changes = summary.threat_changes,
                elapsed_ms = summary.elapsed.as_millis() as u64,
                "Run complete"
            );
        }
        Command::Preview { material } => {
            let district = load_district(&config.scene)?;
            let written = write_swatches(
                &district,
                &config.preview.output_dir,
                config.preview.size,
                config.preview.time,
                material.as_deref(),
            )?;
            info!(count = written.len(), dir = %config.preview.output_dir.display(), "Preview complete");
        }
        Command::Export { path } => {
            DistrictManifest::ceremonial_hall().save(&path)?;
        }
    }
    Ok(())
}
