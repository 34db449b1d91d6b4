//! Glowing circuit traces on a dark panel, fading toward the edges.

use glam::{Vec2, Vec3};
use sanctum_math::{smoothstep, wrap_time};
use sanctum_noise::hash2;

use super::{DEFAULT_AMBIENT, DEFAULT_OPACITY, ShadingProgram};
use crate::archetype::Archetype;
use crate::error::ShadingError;
use crate::fragment::{Fragment, Shade};
use crate::technique::{
    CRACK_BAND, compose, crack_mask, fresnel, key_light_dir, lambert, radial_opacity, traveling_pulse,
};
use crate::uniform::{UniformReader, names};

/// Fraction of grid cells that carry a trace.
const TRACE_DENSITY: f32 = 0.65;

#[derive(Clone, Debug, PartialEq)]
pub struct EnergyCircuitProgram {
    pub base_color: Vec3,
    pub glow_color: Vec3,
    pub glow_intensity: f32,
    pub speed: f32,
    pub ambient: f32,
    pub circuit_scale: f32,
    pub trace_width: f32,
    pub pulse_frequency: f32,
    pub fresnel_power: f32,
    pub center: Vec2,
    pub radial_falloff: f32,
    pub opacity: f32,
}

impl EnergyCircuitProgram {
    pub(crate) fn bind(u: &UniformReader<'_>) -> Result<Self, ShadingError> {
        Ok(Self {
            base_color: u.color(names::BASE_COLOR)?,
            glow_color: u.color(names::GLOW_COLOR)?,
            glow_intensity: u.scalar(names::GLOW_INTENSITY)?,
            speed: u.scalar(names::SPEED)?,
            ambient: u.non_negative_or(names::AMBIENT, DEFAULT_AMBIENT)?,
            circuit_scale: u.positive_or(names::CIRCUIT_SCALE, 10.0)?,
            trace_width: u.positive_or(names::TRACE_WIDTH, 0.08)?,
            pulse_frequency: u.scalar_or(names::PULSE_FREQUENCY, 14.0)?,
            fresnel_power: u.positive_or(names::FRESNEL_POWER, 2.0)?,
            center: u.vec2_or(names::CENTER, Vec2::splat(0.5))?,
            radial_falloff: u.non_negative_or(names::RADIAL_FALLOFF, 1.2)?,
            opacity: u.scalar_or(names::OPACITY, DEFAULT_OPACITY)?,
        })
    }

    /// Trace coverage in `[0, 1]` for a UV point.
    fn trace(&self, uv: Vec2) -> f32 {
        let grid = uv * self.circuit_scale;
        let cell = grid.floor();
        let local = grid - cell;

        if hash2(cell + Vec2::splat(17.0)) > TRACE_DENSITY {
            return 0.0;
        }
        // Each cell runs either horizontally or vertically through its middle.
        let dist = if hash2(cell) < 0.5 {
            (local.y - 0.5).abs()
        } else {
            (local.x - 0.5).abs()
        };
        1.0 - smoothstep(self.trace_width * 0.5, self.trace_width, dist)
    }
}

impl ShadingProgram for EnergyCircuitProgram {
    fn archetype(&self) -> Archetype {
        Archetype::EnergyCircuit
    }

    fn evaluate(&self, fragment: &Fragment, time: f64) -> Shade {
        let t = wrap_time(time);
        let uv = fragment.uv;

        let cracks = crack_mask(uv, self.circuit_scale * 0.5, CRACK_BAND, 4);
        let mask = self.trace(uv).max(cracks * 0.5);
        let pulse = traveling_pulse(t, self.speed, uv.y, self.pulse_frequency);
        let diffuse = lambert(fragment.normal, key_light_dir()) * 0.5;
        let rim = fresnel(fragment.view_dir, fragment.normal, self.fresnel_power);

        let color = compose(self.base_color, self.ambient, diffuse, mask * pulse, self.glow_color, self.glow_intensity)
            + self.glow_color * (rim * 0.5);
        let opacity = radial_opacity(uv, self.center, self.radial_falloff) * self.opacity;
        Shade::new(color, opacity)
    }
}
