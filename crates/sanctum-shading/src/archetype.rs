use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ShadingError;
use crate::fragment::{Fragment, Shade};
use crate::programs::{
    BasaltProgram, BoundProgram, EnergyCircuitProgram, GlyphGlowProgram, ObsidianProgram, PortalVortexProgram,
    ShadingProgram,
};
use crate::uniform::{UniformReader, UniformSet, UniformValue, names};

/// Shading program family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Archetype {
    Obsidian,
    Basalt,
    EnergyCircuit,
    PortalVortex,
    GlyphGlow,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::Obsidian,
        Archetype::Basalt,
        Archetype::EnergyCircuit,
        Archetype::PortalVortex,
        Archetype::GlyphGlow,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Archetype::Obsidian => "obsidian",
            Archetype::Basalt => "basalt",
            Archetype::EnergyCircuit => "energyCircuit",
            Archetype::PortalVortex => "portalVortex",
            Archetype::GlyphGlow => "glyphGlow",
        }
    }

    /// Uniforms that must be present for [`Archetype::bind`] to succeed.
    pub fn required_uniforms(self) -> &'static [&'static str] {
        match self {
            Archetype::Obsidian => &[
                names::BASE_COLOR,
                names::ACCENT_COLOR,
                names::GLOW_COLOR,
                names::GLOW_INTENSITY,
                names::SPEED,
            ],
            Archetype::Basalt => &[names::BASE_COLOR, names::ACCENT_COLOR],
            Archetype::EnergyCircuit => &[names::BASE_COLOR, names::GLOW_COLOR, names::GLOW_INTENSITY, names::SPEED],
            Archetype::PortalVortex => &[
                names::BASE_COLOR,
                names::ACCENT_COLOR,
                names::GLOW_COLOR,
                names::GLOW_INTENSITY,
                names::SPEED,
            ],
            Archetype::GlyphGlow => &[names::BASE_COLOR, names::GLOW_COLOR, names::GLOW_INTENSITY, names::SPEED],
        }
    }

    /// A complete uniform set in the archetype's signature palette.
    pub fn default_uniforms(self) -> UniformSet {
        let color = |r, g, b| UniformValue::Color(Vec3::new(r, g, b));
        let set = match self {
            Archetype::Obsidian => UniformSet::new()
                .with(names::BASE_COLOR, color(0.02, 0.02, 0.03))
                .with(names::ACCENT_COLOR, color(0.35, 0.2, 0.6))
                .with(names::GLOW_COLOR, color(0.45, 0.2, 1.0))
                .with(names::GLOW_INTENSITY, 1.6)
                .with(names::SPEED, 1.2),
            Archetype::Basalt => UniformSet::new()
                .with(names::BASE_COLOR, color(0.08, 0.075, 0.07))
                .with(names::ACCENT_COLOR, color(0.22, 0.2, 0.18)),
            Archetype::EnergyCircuit => UniformSet::new()
                .with(names::BASE_COLOR, color(0.03, 0.05, 0.08))
                .with(names::GLOW_COLOR, color(0.1, 0.85, 1.0))
                .with(names::GLOW_INTENSITY, 2.0)
                .with(names::SPEED, 2.0),
            Archetype::PortalVortex => UniformSet::new()
                .with(names::BASE_COLOR, color(0.05, 0.0, 0.15))
                .with(names::ACCENT_COLOR, color(0.4, 0.1, 0.8))
                .with(names::GLOW_COLOR, color(0.6, 0.9, 1.0))
                .with(names::GLOW_INTENSITY, 1.8)
                .with(names::SPEED, 0.8),
            Archetype::GlyphGlow => UniformSet::new()
                .with(names::BASE_COLOR, color(0.06, 0.05, 0.05))
                .with(names::GLOW_COLOR, color(1.0, 0.7, 0.25))
                .with(names::GLOW_INTENSITY, 1.4)
                .with(names::SPEED, 1.5),
        };
        set.with(names::CENTER, Vec2::splat(0.5))
    }

    /// Resolve every parameter of this archetype from `uniforms`.
    pub fn bind(self, uniforms: &UniformSet) -> Result<BoundProgram, ShadingError> {
        let reader = UniformReader::new(self, uniforms);
        Ok(match self {
            Archetype::Obsidian => BoundProgram::Obsidian(ObsidianProgram::bind(&reader)?),
            Archetype::Basalt => BoundProgram::Basalt(BasaltProgram::bind(&reader)?),
            Archetype::EnergyCircuit => BoundProgram::EnergyCircuit(EnergyCircuitProgram::bind(&reader)?),
            Archetype::PortalVortex => BoundProgram::PortalVortex(PortalVortexProgram::bind(&reader)?),
            Archetype::GlyphGlow => BoundProgram::GlyphGlow(GlyphGlowProgram::bind(&reader)?),
        })
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Archetype {
    type Err = ShadingError;

    /// Accepts the camelCase tag as well as snake_case or kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Archetype::ALL
            .into_iter()
            .find(|a| a.tag().to_ascii_lowercase() == key)
            .ok_or_else(|| ShadingError::UnknownArchetype(s.to_owned()))
    }
}

/// Bind and evaluate in one call.
///
/// Renderers that shade many fragments per frame should bind once with
/// [`Archetype::bind`] and reuse the program.
pub fn evaluate_shading(
    archetype: Archetype,
    fragment: &Fragment,
    time: f64,
    uniforms: &UniformSet,
) -> Result<Shade, ShadingError> {
    Ok(archetype.bind(uniforms)?.evaluate(fragment, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bind_for_every_archetype() {
        for archetype in Archetype::ALL {
            let program = archetype.bind(&archetype.default_uniforms());
            assert!(program.is_ok(), "{archetype} defaults should bind: {program:?}");
            assert_eq!(program.map(|p| p.archetype()), Ok(archetype));
        }
    }

    #[test]
    fn test_each_required_uniform_is_enforced() {
        for archetype in Archetype::ALL {
            for &name in archetype.required_uniforms() {
                let mut uniforms = archetype.default_uniforms();
                uniforms.remove(name);
                let err = archetype.bind(&uniforms).map(|_| ());
                assert_eq!(
                    err,
                    Err(ShadingError::MissingParameter { archetype, name }),
                    "{archetype} without `{name}` must fail to bind"
                );
            }
        }
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let uniforms = Archetype::Obsidian
            .default_uniforms()
            .with(names::SPEED, Vec2::ONE);
        let err = Archetype::Obsidian.bind(&uniforms).map(|_| ());
        assert!(matches!(err, Err(ShadingError::TypeMismatch { name: "speed", .. })));
    }

    #[test]
    fn test_parse_archetype_spellings() {
        assert_eq!("energyCircuit".parse::<Archetype>(), Ok(Archetype::EnergyCircuit));
        assert_eq!("portal_vortex".parse::<Archetype>(), Ok(Archetype::PortalVortex));
        assert_eq!("GLYPH-GLOW".parse::<Archetype>(), Ok(Archetype::GlyphGlow));
        assert_eq!(
            "marble".parse::<Archetype>(),
            Err(ShadingError::UnknownArchetype("marble".into()))
        );
    }

    #[test]
    fn test_evaluate_shading_one_shot() {
        let fragment = Fragment::facing(Vec2::splat(0.5));
        let uniforms = Archetype::Basalt.default_uniforms();
        let shade = evaluate_shading(Archetype::Basalt, &fragment, 3.0, &uniforms).expect("basalt binds");
        assert!(shade.color.is_finite());
        assert!(evaluate_shading(Archetype::Obsidian, &fragment, 3.0, &UniformSet::new()).is_err());
    }
}
