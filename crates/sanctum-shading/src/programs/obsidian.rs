//! Polished volcanic glass with glowing veins and a cool fresnel rim.

use glam::Vec3;
use sanctum_math::wrap_time;
use sanctum_noise::fbm2;

use super::{DEFAULT_AMBIENT, DEFAULT_OPACITY, ShadingProgram};
use crate::archetype::Archetype;
use crate::error::ShadingError;
use crate::fragment::{Fragment, Shade};
use crate::technique::{CRACK_BAND, compose, crack_mask, fresnel, key_light_dir, lambert, traveling_pulse};
use crate::uniform::{UniformReader, names};

#[derive(Clone, Debug, PartialEq)]
pub struct ObsidianProgram {
    pub base_color: Vec3,
    pub accent_color: Vec3,
    pub glow_color: Vec3,
    pub glow_intensity: f32,
    pub speed: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub ambient: f32,
    pub crack_scale: f32,
    pub pulse_frequency: f32,
    pub fresnel_power: f32,
    pub opacity: f32,
}

impl ObsidianProgram {
    pub(crate) fn bind(u: &UniformReader<'_>) -> Result<Self, ShadingError> {
        Ok(Self {
            base_color: u.color(names::BASE_COLOR)?,
            accent_color: u.color(names::ACCENT_COLOR)?,
            glow_color: u.color(names::GLOW_COLOR)?,
            glow_intensity: u.scalar(names::GLOW_INTENSITY)?,
            speed: u.scalar(names::SPEED)?,
            roughness: u.non_negative_or(names::ROUGHNESS, 0.15)?,
            metalness: u.non_negative_or(names::METALNESS, 0.3)?,
            ambient: u.non_negative_or(names::AMBIENT, DEFAULT_AMBIENT)?,
            crack_scale: u.positive_or(names::CRACK_SCALE, 6.0)?,
            pulse_frequency: u.scalar_or(names::PULSE_FREQUENCY, 10.0)?,
            fresnel_power: u.positive_or(names::FRESNEL_POWER, 3.0)?,
            opacity: u.scalar_or(names::OPACITY, DEFAULT_OPACITY)?,
        })
    }
}

impl ShadingProgram for ObsidianProgram {
    fn archetype(&self) -> Archetype {
        Archetype::Obsidian
    }

    fn evaluate(&self, fragment: &Fragment, time: f64) -> Shade {
        let t = wrap_time(time);
        let uv = fragment.uv;
        let roughness = self.roughness.min(1.0);

        let imperfection = fbm2(uv * 8.0, 4);
        let base = self.base_color * (0.85 + 0.3 * imperfection);
        let diffuse = lambert(fragment.normal, key_light_dir()) * (1.0 - 0.5 * roughness);

        let veins = crack_mask(uv, self.crack_scale, CRACK_BAND, 5);
        let pulse = traveling_pulse(t, self.speed, uv.y, self.pulse_frequency);

        let rim = fresnel(fragment.view_dir, fragment.normal, self.fresnel_power) * (1.0 - 0.5 * roughness);
        let rim_color = self.accent_color.lerp(self.base_color, self.metalness.min(1.0));

        let color = compose(base, self.ambient, diffuse, veins * pulse, self.glow_color, self.glow_intensity)
            + rim_color * rim;
        Shade::new(color, self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::programs::test_support::{TIMES, fragment_grid};

    fn program() -> ObsidianProgram {
        ObsidianProgram::bind(&UniformReader::new(
            Archetype::Obsidian,
            &Archetype::Obsidian.default_uniforms(),
        ))
        .expect("defaults bind")
    }

    #[test]
    fn test_output_finite_over_grid_and_times() {
        let p = program();
        for fragment in fragment_grid() {
            for &t in &TIMES {
                let shade = p.evaluate(&fragment, t);
                assert!(shade.color.is_finite(), "non-finite colour at {:?} t={t}", fragment.uv);
                assert!((0.0..=1.0).contains(&shade.opacity));
            }
        }
    }

    #[test]
    fn test_rim_brighter_at_grazing_angle() {
        let p = program();
        let uv = Vec2::new(0.3, 0.6);
        let head_on = Fragment::new(uv, Vec3::ZERO, Vec3::Z, Vec3::Z);
        let grazing = Fragment::new(uv, Vec3::ZERO, Vec3::Z, Vec3::new(1.0, 0.0, 0.05));
        let a = p.evaluate(&head_on, 0.0).color;
        let b = p.evaluate(&grazing, 0.0).color;
        assert!(
            b.element_sum() > a.element_sum(),
            "grazing view should add rim light: {a} vs {b}"
        );
    }

    #[test]
    fn test_glow_animates_over_time() {
        let p = program();
        let changed = fragment_grid().iter().any(|f| p.evaluate(f, 0.0) != p.evaluate(f, 0.7));
        assert!(changed, "vein glow should pulse with time");
    }

    #[test]
    fn test_zero_glow_intensity_is_static() {
        let mut p = program();
        p.glow_intensity = 0.0;
        for f in fragment_grid().iter().take(40) {
            assert_eq!(p.evaluate(f, 0.0), p.evaluate(f, 12.3));
        }
    }
}
