//! Swirling three-colour vortex with a glowing ring, transparent at its rim.

use glam::{Vec2, Vec3};
use sanctum_math::{smoothstep, wrap_time};
use sanctum_noise::fbm2;

use super::ShadingProgram;
use crate::archetype::Archetype;
use crate::error::ShadingError;
use crate::fragment::{Fragment, Shade};
use crate::technique::ring_band;
use crate::uniform::{UniformReader, names};

#[derive(Clone, Debug, PartialEq)]
pub struct PortalVortexProgram {
    pub base_color: Vec3,
    pub accent_color: Vec3,
    pub glow_color: Vec3,
    pub glow_intensity: f32,
    pub speed: f32,
    pub spiral_tightness: f32,
    pub distortion: f32,
    pub noise_scale: f32,
    pub ring_radius: f32,
    pub ring_width: f32,
    pub edge_falloff: f32,
    pub center: Vec2,
}

impl PortalVortexProgram {
    pub(crate) fn bind(u: &UniformReader<'_>) -> Result<Self, ShadingError> {
        Ok(Self {
            base_color: u.color(names::BASE_COLOR)?,
            accent_color: u.color(names::ACCENT_COLOR)?,
            glow_color: u.color(names::GLOW_COLOR)?,
            glow_intensity: u.scalar(names::GLOW_INTENSITY)?,
            speed: u.scalar(names::SPEED)?,
            spiral_tightness: u.scalar_or(names::SPIRAL_TIGHTNESS, 6.0)?,
            distortion: u.non_negative_or(names::DISTORTION, 0.35)?,
            noise_scale: u.positive_or(names::NOISE_SCALE, 3.0)?,
            ring_radius: u.non_negative_or(names::RING_RADIUS, 0.35)?,
            ring_width: u.positive_or(names::RING_WIDTH, 0.03)?,
            edge_falloff: u.non_negative_or(names::EDGE_FALLOFF, 1.45)?,
            center: u.vec2_or(names::CENTER, Vec2::splat(0.5))?,
        })
    }

    /// Opacity as a function of distance from the portal centre.
    pub fn opacity_at(&self, radius: f32) -> f32 {
        (1.0 - radius * self.edge_falloff).clamp(0.0, 1.0)
    }
}

impl ShadingProgram for PortalVortexProgram {
    fn archetype(&self) -> Archetype {
        Archetype::PortalVortex
    }

    fn evaluate(&self, fragment: &Fragment, time: f64) -> Shade {
        let t = wrap_time(time);
        let centered = fragment.uv - self.center;
        let radius = centered.length();
        let angle = centered.y.atan2(centered.x);

        let spiral = angle + radius * self.spiral_tightness - t * self.speed;
        let offset = Vec2::new(spiral.cos(), spiral.sin()) * (radius * self.distortion);
        let warped = fragment.uv + offset;

        let n1 = fbm2(warped * self.noise_scale, 4);
        let n2 = fbm2(warped * (self.noise_scale * 2.0) + Vec2::splat(7.3), 4);

        let swirl = self.base_color.lerp(self.accent_color, smoothstep(0.25, 0.65, n1));
        let mut color = swirl.lerp(self.glow_color, smoothstep(0.35, 0.75, n2));

        let ring = ring_band(radius, self.ring_radius, self.ring_width);
        let core = (1.0 - radius * 2.0).max(0.0);
        color += self.glow_color * ((ring + 0.5 * core * core) * self.glow_intensity);

        Shade::new(color, self.opacity_at(radius))
    }
}
