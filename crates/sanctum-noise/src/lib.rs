//! Deterministic noise primitives for procedural shading.
//!
//! - [`hash2`]: stateless lattice hash in `[0, 1)`.
//! - [`value_noise2`]: smooth bilinear value noise in `[0, 1]`.
//! - [`fbm2`]: fractal Brownian motion built from value noise.
//! - [`gradient_noise3`]: 3-D simplex noise in `[-1, 1]` for geometry displacement.
//!
//! Every function is pure for a given input. Nothing here allocates per call or
//! holds mutable state, so samplers can be shared freely across threads.

mod gradient;
mod hash;
mod value;

pub use gradient::{DEFAULT_GRADIENT_SEED, GradientNoise3, gradient_noise3};
pub use hash::hash2;
pub use value::{MAX_OCTAVES, fbm2, fbm2_with, value_noise2};
