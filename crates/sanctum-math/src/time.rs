//! Bounded animation time.
//!
//! Host clocks are `f64` seconds and grow without bound. Everything that feeds a
//! clock into `sin`/`cos` in `f32` goes through [`wrap_time`] first so that
//! mantissa loss never becomes visible, no matter how long a scene runs.

use std::f64::consts::TAU;

/// Period after which animation time wraps: 1024 full turns, about 107 minutes.
///
/// A multiple of 2π keeps every integer-frequency oscillator continuous across
/// the wrap.
pub const TIME_WRAP_PERIOD: f64 = 1024.0 * TAU;

/// Wrap a host clock into `[0, TIME_WRAP_PERIOD)` and narrow it to `f32`.
///
/// Non-finite input maps to 0.
#[inline]
pub fn wrap_time(time: f64) -> f32 {
    if !time.is_finite() {
        return 0.0;
    }
    time.rem_euclid(TIME_WRAP_PERIOD) as f32
}

/// Wrap an angle in radians into `[0, 2π)`. Non-finite input maps to 0.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}
