//! Configuration for the Sanctum runtime.
//!
//! Engine settings persist to disk as `config.ron` and can be overridden from
//! the command line. Scene content (materials, pools, orbitals) lives in
//! separate district manifests; this crate only points at them.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, PreviewConfig, RuntimeConfig, SceneConfig, ThreatChange,
};
pub use error::ConfigError;
