use sanctum_config::ConfigError;
use sanctum_scene::SceneError;
use thiserror::Error;

use crate::platform::PlatformError;

/// Top-level failures of the `sanctum` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("failed to write swatch: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("district `{district}` has no material named `{name}`")]
    UnknownMaterial { district: String, name: String },
}
