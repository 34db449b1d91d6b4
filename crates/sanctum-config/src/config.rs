//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use sanctum_math::ThreatLevel;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Headless frame loop settings.
    pub runtime: RuntimeConfig,
    /// Which district to load and how to start it.
    pub scene: SceneConfig,
    /// Material swatch rendering.
    pub preview: PreviewConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Frame loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Simulation step in seconds.
    pub fixed_dt: f64,
    /// Number of simulation steps a headless run performs.
    pub frame_count: u64,
    /// Tick particle pools on worker threads.
    pub parallel_pools: bool,
    /// Worker threads for parallel ticking (0 = one per CPU).
    pub workers: usize,
    /// Log frame statistics every N steps (0 = only at the end).
    pub stats_interval: u64,
    /// Pace steps against the wall clock instead of running flat out.
    pub realtime: bool,
    /// Longest wall-clock frame the paced loop will try to catch up on.
    pub max_frame_time: f64,
}

/// District selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// District manifest to load. `None` runs the built-in ceremonial hall.
    pub manifest: Option<PathBuf>,
    /// Threat level at frame 0, replacing the manifest's own.
    pub threat: Option<ThreatLevel>,
    /// Replaces the manifest's root seed.
    pub seed: Option<u64>,
    /// Threat switches applied during a headless run.
    pub threat_schedule: Vec<ThreatChange>,
}

/// Switch to `level` when the run reaches `at_frame`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreatChange {
    pub at_frame: u64,
    pub level: ThreatLevel,
}

/// Swatch preview configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Edge length of each square swatch in pixels.
    pub size: u32,
    /// Animation time the swatches are sampled at.
    pub time: f64,
    /// Directory the PNG files are written to.
    pub output_dir: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for the JSON log file. `None` uses the platform log dir.
    pub log_dir: Option<PathBuf>,
    /// Write the JSON log file in release builds too.
    pub json_log: bool,
}

// --- Default implementations ---

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            frame_count: 600,
            parallel_pools: false,
            workers: 0,
            stats_interval: 120,
            realtime: false,
            max_frame_time: 0.25,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            size: 128,
            time: 0.0,
            output_dir: PathBuf::from("previews"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
            json_log: false,
        }
    }
}

impl SceneConfig {
    /// Threat level the schedule has reached by `frame`, if any change applies.
    pub fn scheduled_threat(&self, frame: u64) -> Option<ThreatLevel> {
        self.threat_schedule
            .iter()
            .filter(|change| change.at_frame <= frame)
            .max_by_key(|change| change.at_frame)
            .map(|change| change.level)
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject settings the runtime cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let runtime = &self.runtime;
        if !(runtime.fixed_dt.is_finite() && runtime.fixed_dt > 0.0) {
            return Err(ConfigError::Invalid {
                field: "runtime.fixed_dt",
                reason: format!("must be positive and finite, got {}", runtime.fixed_dt),
            });
        }
        if !(runtime.max_frame_time.is_finite() && runtime.max_frame_time >= runtime.fixed_dt) {
            return Err(ConfigError::Invalid {
                field: "runtime.max_frame_time",
                reason: format!(
                    "must be finite and at least fixed_dt ({}), got {}",
                    runtime.fixed_dt, runtime.max_frame_time
                ),
            });
        }
        if !(1..=4096).contains(&self.preview.size) {
            return Err(ConfigError::Invalid {
                field: "preview.size",
                reason: format!("must be within 1..=4096, got {}", self.preview.size),
            });
        }
        if !self.preview.time.is_finite() {
            return Err(ConfigError::Invalid {
                field: "preview.time",
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}
