use thiserror::Error;

use crate::archetype::Archetype;
use crate::uniform::UniformKind;

/// Errors raised while binding a shading program to its uniforms.
///
/// All of these surface at scene-configuration time. A bound program never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShadingError {
    /// A uniform the archetype cannot run without is absent.
    #[error("{archetype} program requires uniform `{name}`")]
    MissingParameter {
        archetype: Archetype,
        name: &'static str,
    },

    /// A uniform is present but holds the wrong kind of value.
    #[error("{archetype} uniform `{name}` must be {expected}, found {found}")]
    TypeMismatch {
        archetype: Archetype,
        name: &'static str,
        expected: UniformKind,
        found: UniformKind,
    },

    /// A uniform is non-finite or outside the range the program accepts.
    #[error("{archetype} uniform `{name}` is out of range: {reason}")]
    InvalidValue {
        archetype: Archetype,
        name: &'static str,
        reason: &'static str,
    },

    /// An archetype tag that names no program.
    #[error("unknown shading archetype `{0}`")]
    UnknownArchetype(String),
}
