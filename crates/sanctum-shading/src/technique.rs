//! Reusable shading techniques shared by the program library.

use glam::{Vec2, Vec3};
use sanctum_math::{saturate, smoothstep};
use sanctum_noise::fbm2;

/// Threshold band used to turn fbm into crack/vein masks.
pub const CRACK_BAND: (f32, f32) = (0.45, 0.50);

/// Direction toward the fixed key light used for diffuse terms.
pub fn key_light_dir() -> Vec3 {
    Vec3::new(0.4, 0.8, 0.3).normalize()
}

/// Fresnel rim term `(1 − clamp(v̂·n̂, 0, 1))^power`.
///
/// Always in `[0, 1]`: back-facing pairs count as grazing, and degenerate or
/// non-finite vectors behave like a zero dot product.
pub fn fresnel(view_dir: Vec3, normal: Vec3, power: f32) -> f32 {
    let cos_theta = view_dir.normalize_or_zero().dot(normal.normalize_or_zero());
    let cos_theta = if cos_theta.is_finite() { cos_theta.clamp(0.0, 1.0) } else { 0.0 };
    let power = if power.is_finite() { power.max(0.0) } else { 1.0 };
    saturate((1.0 - cos_theta).powf(power))
}

/// Lambert diffuse term in `[0, 1]`.
pub fn lambert(normal: Vec3, light_dir: Vec3) -> f32 {
    saturate(normal.normalize_or_zero().dot(light_dir.normalize_or_zero()))
}

/// Near-binary mask: fbm of `uv·scale` pushed through a smoothstep band.
pub fn crack_mask(uv: Vec2, scale: f32, band: (f32, f32), octaves: u32) -> f32 {
    smoothstep(band.0, band.1, fbm2(uv * scale, octaves))
}

/// Sinusoidal wave travelling along `coordinate`, in `[0, 1]`.
///
/// `time` should already be wrapped (see [`sanctum_math::wrap_time`]).
pub fn traveling_pulse(time: f32, speed: f32, coordinate: f32, frequency: f32) -> f32 {
    let phase = time * speed + coordinate * frequency;
    if phase.is_finite() { 0.5 + 0.5 * phase.sin() } else { 0.5 }
}

/// `base·(ambient + diffuse) + glow_mask·glow_color·intensity`.
pub fn compose(base: Vec3, ambient: f32, diffuse: f32, glow_mask: f32, glow_color: Vec3, intensity: f32) -> Vec3 {
    base * (ambient + diffuse) + glow_color * (glow_mask * intensity)
}

/// `clamp(1 − |uv − center|·falloff, 0, 1)`.
pub fn radial_opacity(uv: Vec2, center: Vec2, falloff: f32) -> f32 {
    saturate(1.0 - uv.distance(center) * falloff)
}

/// Soft band peaking at `radius == target`, zero beyond `width` on either side.
pub fn ring_band(radius: f32, target: f32, width: f32) -> f32 {
    smoothstep(target - width, target, radius) - smoothstep(target, target + width, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_dirs() -> Vec<Vec3> {
        let mut dirs = Vec::new();
        for i in 0..12 {
            for j in 0..6 {
                let theta = i as f32 / 12.0 * std::f32::consts::TAU;
                let phi = j as f32 / 5.0 * std::f32::consts::PI;
                dirs.push(Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()));
            }
        }
        dirs
    }

    #[test]
    fn test_fresnel_range_all_pairs() {
        let dirs = unit_dirs();
        for &v in &dirs {
            for &n in &dirs {
                for power in [0.5, 1.0, 3.0, 5.0] {
                    let f = fresnel(v, n, power);
                    assert!((0.0..=1.0).contains(&f), "fresnel({v}, {n}, {power}) = {f}");
                }
            }
        }
    }

    #[test]
    fn test_fresnel_head_on_and_grazing() {
        assert_eq!(fresnel(Vec3::Z, Vec3::Z, 3.0), 0.0);
        assert_eq!(fresnel(Vec3::X, Vec3::Z, 3.0), 1.0);
        assert_eq!(fresnel(-Vec3::Z, Vec3::Z, 3.0), 1.0, "back-facing counts as grazing");
    }

    #[test]
    fn test_fresnel_degenerate_inputs() {
        assert_eq!(fresnel(Vec3::ZERO, Vec3::Z, 2.0), 1.0);
        assert_eq!(fresnel(Vec3::splat(f32::NAN), Vec3::Z, 2.0), 1.0);
        assert!(!fresnel(Vec3::X, Vec3::Y, f32::NAN).is_nan());
    }

    #[test]
    fn test_lambert_faces_light() {
        let l = key_light_dir();
        assert!((lambert(l, l) - 1.0).abs() < 1e-6);
        assert_eq!(lambert(-l, l), 0.0);
    }

    #[test]
    fn test_crack_mask_range() {
        for i in 0..40 {
            for j in 0..40 {
                let uv = Vec2::new(i as f32 / 40.0, j as f32 / 40.0);
                let m = crack_mask(uv, 6.0, CRACK_BAND, 5);
                assert!((0.0..=1.0).contains(&m), "crack mask out of range: {m}");
            }
        }
    }

    #[test]
    fn test_traveling_pulse_range_and_motion() {
        for i in 0..100 {
            let p = traveling_pulse(i as f32 * 0.1, 2.0, 0.3, 10.0);
            assert!((0.0..=1.0).contains(&p));
        }
        assert_ne!(traveling_pulse(0.0, 2.0, 0.3, 10.0), traveling_pulse(0.5, 2.0, 0.3, 10.0));
        assert_eq!(traveling_pulse(f32::INFINITY, 1.0, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_compose_terms() {
        let c = compose(Vec3::ONE, 0.25, 0.5, 0.5, Vec3::X, 2.0);
        assert!((c - Vec3::new(1.75, 0.75, 0.75)).length() < 1e-6, "got {c}");
    }

    #[test]
    fn test_radial_opacity_clamps() {
        let center = Vec2::splat(0.5);
        assert_eq!(radial_opacity(center, center, 1.4), 1.0);
        assert_eq!(radial_opacity(Vec2::new(5.0, 5.0), center, 1.4), 0.0);
        let mid = radial_opacity(Vec2::new(0.75, 0.5), center, 2.0);
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ring_band_peaks_at_target() {
        assert!((ring_band(0.35, 0.35, 0.03) - 1.0).abs() < 1e-6);
        assert_eq!(ring_band(0.1, 0.35, 0.03), 0.0);
        assert_eq!(ring_band(0.5, 0.35, 0.03), 0.0);
    }
}
