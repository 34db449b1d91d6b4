//! 3-D gradient noise for vertex displacement.

use std::fmt;
use std::sync::LazyLock;

use glam::Vec3;
use noise::{NoiseFn, Simplex};

/// Seed of the process-wide sampler behind [`gradient_noise3`].
pub const DEFAULT_GRADIENT_SEED: u32 = 0x5A7C_7001;

static SHARED: LazyLock<GradientNoise3> = LazyLock::new(|| GradientNoise3::new(DEFAULT_GRADIENT_SEED));

/// Simplex gradient noise sampler with a fixed permutation table.
pub struct GradientNoise3 {
    noise: Simplex,
    seed: u32,
}

impl GradientNoise3 {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Simplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample in `[-1, 1]`. Non-finite input returns 0.
    pub fn sample(&self, p: Vec3) -> f32 {
        if !p.is_finite() {
            return 0.0;
        }
        let value = self.noise.get([f64::from(p.x), f64::from(p.y), f64::from(p.z)]) as f32;
        if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 }
    }

    /// Multi-octave sample normalised by the summed amplitudes, in `[-1, 1]`.
    pub fn octaved(&self, p: Vec3, octaves: u32, lacunarity: f32, persistence: f32) -> f32 {
        let mut total = 0.0;
        let mut weight = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..octaves.min(crate::MAX_OCTAVES) {
            total += self.sample(p * frequency) * amplitude;
            weight += amplitude;
            frequency *= lacunarity;
            amplitude *= persistence;
        }

        if weight > 0.0 { (total / weight).clamp(-1.0, 1.0) } else { 0.0 }
    }
}

impl fmt::Debug for GradientNoise3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientNoise3").field("seed", &self.seed).finish()
    }
}

/// Gradient noise in `[-1, 1]` from the shared, fixed-seed sampler.
pub fn gradient_noise3(p: Vec3) -> f32 {
    SHARED.sample(p)
}
