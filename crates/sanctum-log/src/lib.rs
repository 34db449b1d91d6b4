//! Structured logging for the Sanctum runtime.
//!
//! Library crates log through the `log` facade; this crate installs a
//! `tracing` subscriber that receives both `tracing` events and bridged `log`
//! records. Console output carries uptime timestamps and targets. A JSON file
//! log is written in debug builds, or whenever the config asks for it.

use std::path::{Path, PathBuf};

use sanctum_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name of the JSON log inside the log directory.
pub const LOG_FILE_NAME: &str = "sanctum.log";

const DEFAULT_DIRECTIVE: &str = "info";

/// Filter directive used when `RUST_LOG` is not set.
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => config.debug.log_level.trim().to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

/// Whether the JSON file layer should be installed.
pub fn wants_file_log(debug_build: bool, config: Option<&Config>) -> bool {
    debug_build || config.is_some_and(|c| c.debug.json_log)
}

/// Initialize the global tracing subscriber.
///
/// - `log_dir`: directory for the JSON log file.
/// - `debug_build`: enables the file log regardless of config.
/// - `config`: supplies the log level and the `json_log` switch.
///
/// Returns the path of the JSON log when one was opened. Calling this twice
/// is harmless; the second subscriber is simply not installed.
///
/// ```no_run
/// use sanctum_config::Config;
/// use sanctum_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> Option<PathBuf> {
    let directive = filter_directive(config);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry().with(env_filter).with(console_layer);

    if wants_file_log(debug_build, config)
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        let path = log_dir.join(LOG_FILE_NAME);
        if subscriber.with(file_layer).try_init().is_ok() {
            tracing::debug!(path = %path.display(), "JSON log opened");
        }
        return Some(path);
    }

    let _ = subscriber.try_init();
    None
}
