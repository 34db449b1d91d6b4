//! Layered volcanic rock: stratified banding, lambert lit, with vertex
//! displacement for geometry roughness.

use glam::{Vec2, Vec3};
use sanctum_math::smoothstep;
use sanctum_noise::{fbm2, gradient_noise3};

use super::{DEFAULT_AMBIENT, DEFAULT_OPACITY, ShadingProgram};
use crate::archetype::Archetype;
use crate::error::ShadingError;
use crate::fragment::{Fragment, Shade};
use crate::technique::{compose, key_light_dir, lambert};
use crate::uniform::{UniformReader, names};

#[derive(Clone, Debug, PartialEq)]
pub struct BasaltProgram {
    pub base_color: Vec3,
    pub accent_color: Vec3,
    pub roughness: f32,
    pub ambient: f32,
    pub strata_scale: f32,
    pub displacement_amplitude: f32,
    pub displacement_frequency: f32,
    pub opacity: f32,
}

impl BasaltProgram {
    pub(crate) fn bind(u: &UniformReader<'_>) -> Result<Self, ShadingError> {
        Ok(Self {
            base_color: u.color(names::BASE_COLOR)?,
            accent_color: u.color(names::ACCENT_COLOR)?,
            roughness: u.non_negative_or(names::ROUGHNESS, 0.85)?,
            ambient: u.non_negative_or(names::AMBIENT, DEFAULT_AMBIENT)?,
            strata_scale: u.positive_or(names::STRATA_SCALE, 24.0)?,
            displacement_amplitude: u.non_negative_or(names::DISPLACEMENT_AMPLITUDE, 0.15)?,
            displacement_frequency: u.positive_or(names::DISPLACEMENT_FREQUENCY, 1.5)?,
            opacity: u.scalar_or(names::OPACITY, DEFAULT_OPACITY)?,
        })
    }

    /// Offset a vertex along its normal by gradient noise.
    ///
    /// The offset never exceeds `displacement_amplitude`. A zero normal leaves
    /// the vertex in place.
    pub fn displace(&self, position: Vec3, normal: Vec3) -> Vec3 {
        let n = gradient_noise3(position * self.displacement_frequency);
        position + normal.normalize_or_zero() * (n * self.displacement_amplitude)
    }
}

impl ShadingProgram for BasaltProgram {
    fn archetype(&self) -> Archetype {
        Archetype::Basalt
    }

    // Static surface: time is ignored.
    fn evaluate(&self, fragment: &Fragment, _time: f64) -> Shade {
        let uv = fragment.uv;
        let strata = fbm2(Vec2::new(uv.x * 2.0, uv.y * self.strata_scale), 5);
        let banding = smoothstep(0.3, 0.7, strata);
        let pits = fbm2(uv * 32.0, 3);

        let base = self.base_color.lerp(self.accent_color, banding) * (0.8 + 0.4 * pits);
        let diffuse = lambert(fragment.normal, key_light_dir()) * (1.0 - 0.3 * self.roughness.min(1.0));

        let color = compose(base, self.ambient, diffuse, 0.0, Vec3::ZERO, 0.0);
        Shade::new(color, self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::test_support::{TIMES, fragment_grid};

    fn program() -> BasaltProgram {
        BasaltProgram::bind(&UniformReader::new(Archetype::Basalt, &Archetype::Basalt.default_uniforms()))
            .expect("defaults bind")
    }

    #[test]
    fn test_output_finite_and_static() {
        let p = program();
        for fragment in fragment_grid() {
            let first = p.evaluate(&fragment, TIMES[0]);
            assert!(first.color.is_finite());
            assert_eq!(first.opacity, 1.0);
            for &t in &TIMES[1..] {
                assert_eq!(p.evaluate(&fragment, t), first, "basalt should not animate");
            }
        }
    }

    #[test]
    fn test_strata_vary_vertically() {
        let p = program();
        let colors: Vec<Vec3> = (0..32)
            .map(|j| p.evaluate(&Fragment::facing(Vec2::new(0.5, j as f32 / 32.0)), 0.0).color)
            .collect();
        let min = colors.iter().map(|c| c.x).fold(f32::MAX, f32::min);
        let max = colors.iter().map(|c| c.x).fold(f32::MIN, f32::max);
        assert!(max - min > 1e-3, "strata should band along v: {min}..{max}");
    }

    #[test]
    fn test_displacement_bounded_by_amplitude() {
        let p = program();
        for i in 0..200 {
            let pos = Vec3::new(i as f32 * 0.13, (i as f32 * 0.7).sin(), i as f32 * -0.05);
            let normal = Vec3::new(0.0, 2.0, 0.0);
            let moved = p.displace(pos, normal);
            let offset = moved - pos;
            assert!(offset.length() <= p.displacement_amplitude + 1e-5);
            assert!(offset.x.abs() < 1e-6 && offset.z.abs() < 1e-6, "offset must follow the normal");
        }
    }

    #[test]
    fn test_displacement_deterministic_and_zero_normal() {
        let p = program();
        let pos = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(p.displace(pos, Vec3::Y), p.displace(pos, Vec3::Y));
        assert_eq!(p.displace(pos, Vec3::ZERO), pos);
    }
}
