//! Scalar shaping helpers, bounded animation time, and the scene-wide threat level
//! shared by every Sanctum crate.

mod scalar;
mod threat;
mod time;

pub use scalar::{fract, mix, saturate, smoothstep};
pub use threat::{ParseThreatLevelError, ThreatLevel, ThreatTable, default_pace};
pub use time::{TIME_WRAP_PERIOD, wrap_angle, wrap_time};
