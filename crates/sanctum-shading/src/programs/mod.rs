//! The program library. Each program is a plain struct of resolved parameters.

mod basalt;
mod energy_circuit;
mod glyph_glow;
mod obsidian;
mod portal_vortex;

pub use basalt::BasaltProgram;
pub use energy_circuit::EnergyCircuitProgram;
pub use glyph_glow::GlyphGlowProgram;
pub use obsidian::ObsidianProgram;
pub use portal_vortex::PortalVortexProgram;

use crate::archetype::Archetype;
use crate::fragment::{Fragment, Shade};

/// Optional uniform defaults shared across programs.
pub(crate) const DEFAULT_AMBIENT: f32 = 0.22;
pub(crate) const DEFAULT_OPACITY: f32 = 1.0;

/// A bound, infallible surface evaluator.
///
/// `time` is the host clock in seconds; programs wrap it before any
/// trigonometry, so arbitrarily large values stay stable.
pub trait ShadingProgram: Send + Sync {
    fn archetype(&self) -> Archetype;

    fn evaluate(&self, fragment: &Fragment, time: f64) -> Shade;
}

/// Any program from the library, dispatched statically.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundProgram {
    Obsidian(ObsidianProgram),
    Basalt(BasaltProgram),
    EnergyCircuit(EnergyCircuitProgram),
    PortalVortex(PortalVortexProgram),
    GlyphGlow(GlyphGlowProgram),
}

impl ShadingProgram for BoundProgram {
    fn archetype(&self) -> Archetype {
        match self {
            BoundProgram::Obsidian(p) => p.archetype(),
            BoundProgram::Basalt(p) => p.archetype(),
            BoundProgram::EnergyCircuit(p) => p.archetype(),
            BoundProgram::PortalVortex(p) => p.archetype(),
            BoundProgram::GlyphGlow(p) => p.archetype(),
        }
    }

    fn evaluate(&self, fragment: &Fragment, time: f64) -> Shade {
        match self {
            BoundProgram::Obsidian(p) => p.evaluate(fragment, time),
            BoundProgram::Basalt(p) => p.evaluate(fragment, time),
            BoundProgram::EnergyCircuit(p) => p.evaluate(fragment, time),
            BoundProgram::PortalVortex(p) => p.evaluate(fragment, time),
            BoundProgram::GlyphGlow(p) => p.evaluate(fragment, time),
        }
    }
}
