//! Closed-form orbital motion for sentinels, rings and pulsing eyes.
//!
//! Positions are an analytic function of the host clock, so sampling the same
//! time twice always yields the same result and there is no state to drift.
//! Angles are accumulated in `f64` and wrapped before narrowing to `f32`.

mod entity;

pub use entity::{Oscillation, OrbitalEntity, OrbitalError, OrbitalSample, orbital_position};
