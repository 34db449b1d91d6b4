//! Procedural shading programs evaluated per surface point.
//!
//! A program is selected by [`Archetype`], bound once against a [`UniformSet`]
//! (every required uniform is resolved up front, so a missing parameter fails at
//! scene-configuration time), and then evaluated per [`Fragment`] as a pure
//! function of the fragment, the host clock and its bound parameters.
//!
//! The individual techniques (fresnel rim, crack mask, travelling pulse,
//! composition, radial opacity) live in [`technique`] and are reusable on their
//! own.

mod archetype;
mod error;
mod fragment;
pub mod programs;
pub mod technique;
mod uniform;

pub use archetype::{Archetype, evaluate_shading};
pub use error::ShadingError;
pub use fragment::{Fragment, Shade};
pub use programs::{
    BasaltProgram, BoundProgram, EnergyCircuitProgram, GlyphGlowProgram, ObsidianProgram,
    PortalVortexProgram, ShadingProgram,
};
pub use uniform::{UniformKind, UniformSet, UniformValue, names};
