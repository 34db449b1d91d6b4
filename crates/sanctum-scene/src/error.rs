use sanctum_math::ThreatLevel;
use sanctum_orbital::OrbitalError;
use sanctum_particles::ParticleError;
use sanctum_shading::ShadingError;
use thiserror::Error;

/// Errors raised while loading or driving a district.
#[derive(Debug, Error)]
pub enum SceneError {
    /// I/O error reading or writing a manifest file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// RON serialization error.
    #[error("ron serialize error: {0}")]
    RonSerialize(#[from] ron::Error),

    #[error("material `{name}`: {source}")]
    Material {
        name: String,
        #[source]
        source: ShadingError,
    },

    #[error("pool `{name}`: {source}")]
    Pool {
        name: String,
        #[source]
        source: ParticleError,
    },

    #[error("orbital `{name}`: {source}")]
    Orbital {
        name: String,
        #[source]
        source: OrbitalError,
    },

    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("pool `{pool}` follows unknown orbital `{target}`")]
    UnknownFollowTarget { pool: String, target: String },

    #[error("{kind} handle {index} does not belong to district `{district}`")]
    UnknownHandle {
        kind: &'static str,
        index: usize,
        district: String,
    },

    #[error("district pace for {level} must be positive and finite, got {value}")]
    InvalidPace { level: ThreatLevel, value: f32 },
}
