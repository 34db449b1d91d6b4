//! Runic glyph cells etched into stone, each flickering on its own phase.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use sanctum_math::{smoothstep, wrap_time};
use sanctum_noise::{fbm2, hash2};

use super::{DEFAULT_AMBIENT, DEFAULT_OPACITY, ShadingProgram};
use crate::archetype::Archetype;
use crate::error::ShadingError;
use crate::fragment::{Fragment, Shade};
use crate::technique::{compose, key_light_dir, lambert, ring_band};
use crate::uniform::{UniformReader, names};

#[derive(Clone, Debug, PartialEq)]
pub struct GlyphGlowProgram {
    pub base_color: Vec3,
    pub glow_color: Vec3,
    pub glow_intensity: f32,
    pub speed: f32,
    pub ambient: f32,
    pub glyph_density: f32,
    pub glyph_threshold: f32,
    pub opacity: f32,
}

impl GlyphGlowProgram {
    pub(crate) fn bind(u: &UniformReader<'_>) -> Result<Self, ShadingError> {
        Ok(Self {
            base_color: u.color(names::BASE_COLOR)?,
            glow_color: u.color(names::GLOW_COLOR)?,
            glow_intensity: u.scalar(names::GLOW_INTENSITY)?,
            speed: u.scalar(names::SPEED)?,
            ambient: u.non_negative_or(names::AMBIENT, DEFAULT_AMBIENT)?,
            glyph_density: u.positive_or(names::GLYPH_DENSITY, 8.0)?,
            glyph_threshold: u.scalar_or(names::GLYPH_THRESHOLD, 0.45)?,
            opacity: u.scalar_or(names::OPACITY, DEFAULT_OPACITY)?,
        })
    }

    /// Glyph stroke coverage in `[0, 1]` and the cell's hash seed.
    fn glyph(&self, uv: Vec2) -> (f32, f32) {
        let grid = uv * self.glyph_density;
        let cell = grid.floor();
        let local = grid - cell - Vec2::splat(0.5);
        let seed = hash2(cell);

        if seed <= self.glyph_threshold {
            return (0.0, seed);
        }

        let r = local.length();
        let ring = ring_band(r, 0.3, 0.06);
        let across = if hash2(cell + Vec2::splat(11.0)) < 0.5 { local.x } else { local.y };
        let bar = (1.0 - smoothstep(0.03, 0.06, across.abs())) * (1.0 - smoothstep(0.25, 0.3, r));
        (ring.max(bar), seed)
    }
}

impl ShadingProgram for GlyphGlowProgram {
    fn archetype(&self) -> Archetype {
        Archetype::GlyphGlow
    }

    fn evaluate(&self, fragment: &Fragment, time: f64) -> Shade {
        let t = wrap_time(time);
        let uv = fragment.uv;

        let (stroke, seed) = self.glyph(uv);
        let flicker = 0.6 + 0.4 * (t * self.speed + seed * TAU).sin();

        let base = self.base_color * (0.9 + 0.2 * fbm2(uv * 12.0, 3));
        let diffuse = lambert(fragment.normal, key_light_dir()) * 0.6;
        let color = compose(base, self.ambient, diffuse, stroke * flicker, self.glow_color, self.glow_intensity);
        Shade::new(color, self.opacity)
    }
}
