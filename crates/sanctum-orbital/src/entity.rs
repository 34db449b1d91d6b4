use std::f64::consts::TAU;

use glam::Vec3;
use sanctum_math::{ThreatLevel, ThreatTable, default_pace, wrap_angle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitalError {
    #[error("orbital parameter `{0}` must be finite")]
    NonFinite(&'static str),

    #[error("orbit radius must not be negative, got {0}")]
    NegativeRadius(f32),

    #[error("ellipse ratio must be positive, got {0}")]
    InvalidEllipseRatio(f32),

    #[error("pace for {level} must be positive and finite, got {value}")]
    InvalidPace { level: ThreatLevel, value: f32 },
}

// ---------------------------------------------------------------------------
// Oscillation
// ---------------------------------------------------------------------------

/// Sinusoid `amplitude · sin(2π · frequency · t + phase)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub amplitude: f32,
    /// Cycles per second.
    pub frequency: f32,
    #[serde(default)]
    pub phase: f32,
}

impl Oscillation {
    pub const fn new(amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    pub fn value(&self, t: f64) -> f32 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        let angle = wrap_angle(TAU * f64::from(self.frequency) * t + f64::from(self.phase));
        self.amplitude * (angle.sin() as f32)
    }

    fn is_finite(&self) -> bool {
        self.amplitude.is_finite() && self.frequency.is_finite() && self.phase.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

fn one() -> f32 {
    1.0
}

/// An object circling a fixed centre in the horizontal plane.
///
/// A zero radius gives a stationary entity that can still bob and pulse, which
/// is how rotating rings and watching eyes are expressed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalEntity {
    #[serde(default)]
    pub center: Vec3,
    pub orbit_radius: f32,
    /// Z extent relative to X extent. 1 is a circle.
    #[serde(default = "one")]
    pub ellipse_ratio: f32,
    /// Radians per second at pace 1. Negative orbits clockwise.
    pub angular_speed: f32,
    #[serde(default)]
    pub phase_offset: f32,
    /// Vertical offset over time.
    #[serde(default)]
    pub bob: Oscillation,
    /// Scale modulation over time, added to 1.
    #[serde(default)]
    pub pulse: Oscillation,
    pub color_by_threat: ThreatTable<Vec3>,
    /// Angular speed multiplier per threat level.
    #[serde(default = "default_pace")]
    pub pace_by_threat: ThreatTable<f32>,
}

/// Everything a renderer needs to place one orbital entity for a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalSample {
    pub position: Vec3,
    /// Yaw in radians that keeps the entity facing along its orbit.
    pub rotation_y: f32,
    /// Unit direction of travel, or zero for a stationary entity.
    pub tangent: Vec3,
    pub scale: f32,
    pub color: Vec3,
}

impl OrbitalEntity {
    /// Circular orbit around `center` with a single colour for every level.
    pub fn circular(center: Vec3, radius: f32, angular_speed: f32, phase_offset: f32, color: Vec3) -> Self {
        Self {
            center,
            orbit_radius: radius,
            ellipse_ratio: 1.0,
            angular_speed,
            phase_offset,
            bob: Oscillation::default(),
            pulse: Oscillation::default(),
            color_by_threat: ThreatTable::uniform(color),
            pace_by_threat: default_pace(),
        }
    }

    pub fn with_bob(mut self, bob: Oscillation) -> Self {
        self.bob = bob;
        self
    }

    pub fn with_pulse(mut self, pulse: Oscillation) -> Self {
        self.pulse = pulse;
        self
    }

    pub fn with_colors(mut self, colors: ThreatTable<Vec3>) -> Self {
        self.color_by_threat = colors;
        self
    }

    pub fn validate(&self) -> Result<(), OrbitalError> {
        if !self.center.is_finite() {
            return Err(OrbitalError::NonFinite("center"));
        }
        if !self.orbit_radius.is_finite() {
            return Err(OrbitalError::NonFinite("orbit_radius"));
        }
        if self.orbit_radius < 0.0 {
            return Err(OrbitalError::NegativeRadius(self.orbit_radius));
        }
        if !(self.ellipse_ratio.is_finite() && self.ellipse_ratio > 0.0) {
            return Err(OrbitalError::InvalidEllipseRatio(self.ellipse_ratio));
        }
        if !self.angular_speed.is_finite() {
            return Err(OrbitalError::NonFinite("angular_speed"));
        }
        if !self.phase_offset.is_finite() {
            return Err(OrbitalError::NonFinite("phase_offset"));
        }
        if !self.bob.is_finite() {
            return Err(OrbitalError::NonFinite("bob"));
        }
        if !self.pulse.is_finite() {
            return Err(OrbitalError::NonFinite("pulse"));
        }
        if self.color_by_threat.iter().any(|(_, c)| !c.is_finite()) {
            return Err(OrbitalError::NonFinite("color_by_threat"));
        }
        for (level, &value) in self.pace_by_threat.iter() {
            if !(value.is_finite() && value > 0.0) {
                return Err(OrbitalError::InvalidPace { level, value });
            }
        }
        Ok(())
    }

    /// Effective angular speed in radians per second at `threat`.
    pub fn angular_speed_at(&self, threat: ThreatLevel) -> f64 {
        f64::from(self.angular_speed) * f64::from(*self.pace_by_threat.get(threat))
    }

    /// Orbit angle `(ω·t + φ) mod 2π`.
    pub fn angle_at(&self, t: f64, threat: ThreatLevel) -> f64 {
        wrap_angle(self.angular_speed_at(threat) * t + f64::from(self.phase_offset))
    }

    /// Seconds per revolution, or `None` for an entity that does not orbit.
    pub fn period(&self, threat: ThreatLevel) -> Option<f64> {
        let omega = self.angular_speed_at(threat).abs();
        (omega > 0.0).then(|| TAU / omega)
    }

    pub fn sample(&self, t: f64, threat: ThreatLevel) -> OrbitalSample {
        let theta = self.angle_at(t, threat);
        let (sin, cos) = theta.sin_cos();
        let r = f64::from(self.orbit_radius);
        let ratio = f64::from(self.ellipse_ratio);

        let offset = Vec3::new((r * cos) as f32, self.bob.value(t), (r * ratio * sin) as f32);

        let direction = self.angular_speed_at(threat).signum();
        let tangent = Vec3::new((-r * sin * direction) as f32, 0.0, (r * ratio * cos * direction) as f32);

        OrbitalSample {
            position: self.center + offset,
            rotation_y: -(theta as f32),
            tangent: tangent.normalize_or_zero(),
            scale: (1.0 + self.pulse.value(t)).max(0.0),
            color: *self.color_by_threat.get(threat),
        }
    }
}

/// Sample `entity` at host time `t` under `threat`.
pub fn orbital_position(entity: &OrbitalEntity, t: f64, threat: ThreatLevel) -> OrbitalSample {
    entity.sample(t, threat)
}
