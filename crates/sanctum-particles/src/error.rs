use thiserror::Error;

/// Configuration errors rejected when a pool is built or re-paced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParticleError {
    #[error("pool capacity must be between 1 and {max}, got {capacity}")]
    InvalidCapacity { capacity: usize, max: usize },

    #[error("max lifetime must be positive and finite, got {0}")]
    InvalidLifetime(f32),

    #[error("invalid spawn region: {0}")]
    InvalidSpawnRegion(&'static str),

    #[error("invalid velocity distribution: {0}")]
    InvalidVelocity(&'static str),

    #[error("invalid recycle bounds: {0}")]
    InvalidRecycleBounds(&'static str),

    #[error("emitter origin must be finite, got {0:?}")]
    InvalidOrigin([f32; 3]),

    #[error("pace must be positive and finite, got {0}")]
    InvalidPace(f32),
}
