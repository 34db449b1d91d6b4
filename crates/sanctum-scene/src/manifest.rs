//! RON district manifests.

use std::collections::BTreeMap;
use std::f32::consts::PI;
use std::path::Path;

use glam::Vec3;
use sanctum_math::{ThreatLevel, ThreatTable, default_pace};
use sanctum_orbital::{Oscillation, OrbitalEntity};
use sanctum_particles::EmitterPolicy;
use sanctum_shading::{Archetype, UniformSet, UniformValue, names};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Top-level description of one ceremonial district.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistrictManifest {
    pub name: String,
    /// Root seed. Each pool derives its own stream from this and its name.
    #[serde(default)]
    pub seed: u64,
    /// Threat level the district starts in.
    #[serde(default)]
    pub threat: ThreatLevel,
    /// Animation pace per threat level, applied to particle pools and to the
    /// `speed` uniform of every material.
    #[serde(default = "default_pace")]
    pub pace: ThreatTable<f32>,
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
    #[serde(default)]
    pub pools: Vec<PoolEntry>,
    #[serde(default)]
    pub orbitals: Vec<OrbitalEntry>,
}

/// A named surface material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub name: String,
    pub archetype: Archetype,
    pub uniforms: UniformSet,
    /// Per-level uniforms merged over `uniforms` when that level is active.
    #[serde(default)]
    pub threat_overrides: BTreeMap<ThreatLevel, UniformSet>,
}

/// A named particle pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub name: String,
    pub capacity: usize,
    pub policy: EmitterPolicy,
    /// Orbital whose position the emitter origin tracks every frame.
    #[serde(default)]
    pub follow: Option<String>,
}

/// A named orbital entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalEntry {
    pub name: String,
    pub entity: OrbitalEntity,
}

impl DistrictManifest {
    pub fn from_ron_str(text: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a manifest from a RON file.
    pub fn from_ron(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        let manifest = Self::from_ron_str(&text)?;
        log::info!("Loaded district manifest `{}` from {}", manifest.name, path.display());
        Ok(manifest)
    }

    pub fn to_ron_string(&self) -> Result<String, SceneError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(6);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Write the manifest as pretty-printed RON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron_string()?)?;
        log::info!("Saved district manifest `{}` to {}", self.name, path.display());
        Ok(())
    }

    /// The built-in ceremonial hall: obsidian columns, a basalt floor, an energy
    /// field, a portal, a glyph pathway, a fountain, ambient motes, and two
    /// sentinels shedding trails around a pulsing eye.
    pub fn ceremonial_hall() -> Self {
        let color = |r: f32, g: f32, b: f32| UniformValue::Color(Vec3::new(r, g, b));
        let glow_overrides = |warning: UniformValue, danger: UniformValue, intensity: f32| {
            BTreeMap::from([
                (ThreatLevel::Warning, UniformSet::new().with(names::GLOW_COLOR, warning)),
                (
                    ThreatLevel::Danger,
                    UniformSet::new()
                        .with(names::GLOW_COLOR, danger)
                        .with(names::GLOW_INTENSITY, intensity),
                ),
            ])
        };

        let materials = vec![
            MaterialEntry {
                name: "obsidian_column".into(),
                archetype: Archetype::Obsidian,
                uniforms: Archetype::Obsidian.default_uniforms(),
                threat_overrides: glow_overrides(color(1.0, 0.55, 0.1), color(1.0, 0.08, 0.05), 2.6),
            },
            MaterialEntry {
                name: "basalt_floor".into(),
                archetype: Archetype::Basalt,
                uniforms: Archetype::Basalt.default_uniforms().with(names::STRATA_SCALE, 18.0),
                threat_overrides: BTreeMap::new(),
            },
            MaterialEntry {
                name: "energy_field".into(),
                archetype: Archetype::EnergyCircuit,
                uniforms: Archetype::EnergyCircuit.default_uniforms(),
                threat_overrides: glow_overrides(color(1.0, 0.75, 0.2), color(1.0, 0.15, 0.1), 3.2),
            },
            MaterialEntry {
                name: "portal".into(),
                archetype: Archetype::PortalVortex,
                uniforms: Archetype::PortalVortex.default_uniforms(),
                threat_overrides: glow_overrides(color(1.0, 0.8, 0.4), color(1.0, 0.2, 0.2), 2.4),
            },
            MaterialEntry {
                name: "glyph_path".into(),
                archetype: Archetype::GlyphGlow,
                uniforms: Archetype::GlyphGlow.default_uniforms().with(names::GLYPH_DENSITY, 6.0),
                threat_overrides: glow_overrides(color(1.0, 0.5, 0.1), color(0.9, 0.05, 0.05), 2.2),
            },
        ];

        let sentinel_colors = ThreatTable::new(
            Vec3::new(0.3, 0.85, 1.0),
            Vec3::new(1.0, 0.65, 0.1),
            Vec3::new(1.0, 0.1, 0.08),
        );
        let hall_center = Vec3::new(0.0, 5.0, 0.0);
        let orbitals = vec![
            OrbitalEntry {
                name: "sentinel_a".into(),
                entity: OrbitalEntity::circular(hall_center, 7.0, 0.45, 0.0, Vec3::ONE)
                    .with_colors(sentinel_colors)
                    .with_bob(Oscillation::new(0.35, 0.2, 0.0)),
            },
            OrbitalEntry {
                name: "sentinel_b".into(),
                entity: OrbitalEntity::circular(hall_center, 7.0, 0.45, PI, Vec3::ONE)
                    .with_colors(sentinel_colors)
                    .with_bob(Oscillation::new(0.35, 0.2, PI)),
            },
            OrbitalEntry {
                name: "portal_ring".into(),
                entity: OrbitalEntity::circular(Vec3::new(0.0, 3.0, -10.0), 0.0, 0.8, 0.0, Vec3::new(0.6, 0.9, 1.0))
                    .with_pulse(Oscillation::new(0.05, 0.5, 0.0)),
            },
            OrbitalEntry {
                name: "watcher_eye".into(),
                entity: OrbitalEntity::circular(Vec3::new(0.0, 9.0, -12.0), 0.0, 0.0, 0.0, Vec3::ONE)
                    .with_colors(ThreatTable::new(
                        Vec3::new(0.4, 0.3, 1.0),
                        Vec3::new(1.0, 0.6, 0.1),
                        Vec3::new(1.0, 0.0, 0.0),
                    ))
                    .with_pulse(Oscillation::new(0.15, 0.35, 0.0)),
            },
        ];

        let pools = vec![
            PoolEntry {
                name: "fountain".into(),
                capacity: 600,
                policy: EmitterPolicy::fountain(Vec3::new(0.0, 0.0, -6.0), 0.6, 15.0, 3.0),
                follow: None,
            },
            PoolEntry {
                name: "ritual_motes".into(),
                capacity: 400,
                policy: EmitterPolicy::ambient_field(Vec3::new(0.0, 4.0, 0.0), Vec3::new(12.0, 4.0, 12.0), 0.15, 9.0),
                follow: None,
            },
            PoolEntry {
                name: "sentinel_a_trail".into(),
                capacity: 120,
                policy: EmitterPolicy::drone_trail(0.25, 1.6),
                follow: Some("sentinel_a".into()),
            },
            PoolEntry {
                name: "sentinel_b_trail".into(),
                capacity: 120,
                policy: EmitterPolicy::drone_trail(0.25, 1.6),
                follow: Some("sentinel_b".into()),
            },
        ];

        Self {
            name: "ceremonial_hall".into(),
            seed: 0x5A4C_7000,
            threat: ThreatLevel::Safe,
            pace: default_pace(),
            materials,
            pools,
            orbitals,
        }
    }
}
