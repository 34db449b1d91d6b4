//! Lattice value noise and its fractal sum.

use glam::Vec2;
use sanctum_math::{mix, saturate};

use crate::hash::hash2;

/// Upper bound on fBm octaves. Past this the finest octave is below `f32`
/// resolution for any UV-scale input.
pub const MAX_OCTAVES: u32 = 16;

/// Smooth value noise in `[0, 1]`.
///
/// Hashes the four surrounding lattice corners and blends them with a
/// Hermite-smoothed bilinear weight. Continuous everywhere. Non-finite input
/// returns 0.
pub fn value_noise2(p: Vec2) -> f32 {
    if !p.is_finite() {
        return 0.0;
    }
    let cell = p.floor();
    let f = p - cell;

    let a = hash2(cell);
    let b = hash2(cell + Vec2::X);
    let c = hash2(cell + Vec2::Y);
    let d = hash2(cell + Vec2::ONE);

    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    let v = mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
    saturate(v)
}

/// Fractal Brownian motion with lacunarity 2 and gain 0.5.
///
/// The first octave carries weight 0.5, so the result stays within `[0, 1)`.
/// `octaves` is clamped to [`MAX_OCTAVES`]; zero octaves yields 0.
pub fn fbm2(p: Vec2, octaves: u32) -> f32 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 0.5;

    for _ in 0..octaves.min(MAX_OCTAVES) {
        total += value_noise2(p * frequency) * amplitude;
        frequency *= 2.0;
        amplitude *= 0.5;
    }

    total
}

/// Fractal Brownian motion with explicit lacunarity and gain, normalised by the
/// summed octave weights so the result stays in `[0, 1]`.
pub fn fbm2_with(p: Vec2, octaves: u32, lacunarity: f32, gain: f32) -> f32 {
    let mut total = 0.0;
    let mut weight = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;

    for _ in 0..octaves.min(MAX_OCTAVES) {
        total += value_noise2(p * frequency) * amplitude;
        weight += amplitude;
        frequency *= lacunarity;
        amplitude *= gain;
    }

    if weight > 0.0 { saturate(total / weight) } else { 0.0 }
}
