//! Named shader parameters.

use std::collections::BTreeMap;
use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::error::ShadingError;

/// Well-known uniform names shared by the program library.
pub mod names {
    pub const BASE_COLOR: &str = "base_color";
    pub const ACCENT_COLOR: &str = "accent_color";
    pub const GLOW_COLOR: &str = "glow_color";
    pub const GLOW_INTENSITY: &str = "glow_intensity";
    /// Animation speed. Scaled by the district pace on threat changes.
    pub const SPEED: &str = "speed";
    pub const ROUGHNESS: &str = "roughness";
    pub const METALNESS: &str = "metalness";
    pub const AMBIENT: &str = "ambient";
    pub const OPACITY: &str = "opacity";
    pub const CENTER: &str = "center";

    pub const CRACK_SCALE: &str = "crack_scale";
    pub const PULSE_FREQUENCY: &str = "pulse_frequency";
    pub const FRESNEL_POWER: &str = "fresnel_power";

    pub const STRATA_SCALE: &str = "strata_scale";
    pub const DISPLACEMENT_AMPLITUDE: &str = "displacement_amplitude";
    pub const DISPLACEMENT_FREQUENCY: &str = "displacement_frequency";

    pub const CIRCUIT_SCALE: &str = "circuit_scale";
    pub const TRACE_WIDTH: &str = "trace_width";
    pub const RADIAL_FALLOFF: &str = "radial_falloff";

    pub const SPIRAL_TIGHTNESS: &str = "spiral_tightness";
    pub const DISTORTION: &str = "distortion";
    pub const NOISE_SCALE: &str = "noise_scale";
    pub const RING_RADIUS: &str = "ring_radius";
    pub const RING_WIDTH: &str = "ring_width";
    pub const EDGE_FALLOFF: &str = "edge_falloff";

    pub const GLYPH_DENSITY: &str = "glyph_density";
    pub const GLYPH_THRESHOLD: &str = "glyph_threshold";
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Scalar,
    Vec2,
    Vec3,
    Color,
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UniformKind::Scalar => "a scalar",
            UniformKind::Vec2 => "a vec2",
            UniformKind::Vec3 => "a vec3",
            UniformKind::Color => "a color",
        })
    }
}

/// A single shader parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum UniformValue {
    Scalar(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    /// Linear RGB.
    Color(Vec3),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Scalar(_) => UniformKind::Scalar,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Color(_) => UniformKind::Color,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            UniformValue::Scalar(v) => v.is_finite(),
            UniformValue::Vec2(v) => v.is_finite(),
            UniformValue::Vec3(v) | UniformValue::Color(v) => v.is_finite(),
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match *self {
            UniformValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match *self {
            UniformValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    /// Colour value. A plain `Vec3` is accepted as RGB.
    pub fn as_color(&self) -> Option<Vec3> {
        match *self {
            UniformValue::Color(v) | UniformValue::Vec3(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Scalar(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        UniformValue::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

// ---------------------------------------------------------------------------
// UniformSet
// ---------------------------------------------------------------------------

/// Named parameter map owned by a district material.
///
/// Ordered so that serialised manifests are stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniformSet {
    values: BTreeMap<String, UniformValue>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`UniformSet::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> Option<UniformValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<UniformValue> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of `self` with every entry of `overrides` applied on top.
    pub fn merged(&self, overrides: &UniformSet) -> UniformSet {
        let mut out = self.clone();
        for (name, value) in &overrides.values {
            out.values.insert(name.clone(), *value);
        }
        out
    }

    /// Multiply a scalar entry in place. Returns `false` if `name` is absent or
    /// not a scalar.
    pub fn scale_scalar(&mut self, name: &str, factor: f32) -> bool {
        match self.values.get_mut(name) {
            Some(UniformValue::Scalar(v)) => {
                *v *= factor;
                true
            }
            _ => false,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, UniformValue)> for UniformSet {
    fn from_iter<I: IntoIterator<Item = (K, UniformValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Binding-time reader
// ---------------------------------------------------------------------------

/// Typed, validated access to a [`UniformSet`] on behalf of one archetype.
pub(crate) struct UniformReader<'a> {
    archetype: Archetype,
    uniforms: &'a UniformSet,
}

impl<'a> UniformReader<'a> {
    pub(crate) fn new(archetype: Archetype, uniforms: &'a UniformSet) -> Self {
        Self { archetype, uniforms }
    }

    fn lookup(&self, name: &'static str, expected: UniformKind) -> Result<Option<&'a UniformValue>, ShadingError> {
        let Some(value) = self.uniforms.get(name) else {
            return Ok(None);
        };
        let found = value.kind();
        let compatible = found == expected || (expected == UniformKind::Color && found == UniformKind::Vec3);
        if !compatible {
            return Err(ShadingError::TypeMismatch {
                archetype: self.archetype,
                name,
                expected,
                found,
            });
        }
        if !value.is_finite() {
            return Err(self.invalid(name, "value must be finite"));
        }
        Ok(Some(value))
    }

    fn missing(&self, name: &'static str) -> ShadingError {
        ShadingError::MissingParameter {
            archetype: self.archetype,
            name,
        }
    }

    fn invalid(&self, name: &'static str, reason: &'static str) -> ShadingError {
        ShadingError::InvalidValue {
            archetype: self.archetype,
            name,
            reason,
        }
    }

    fn scalar_opt(&self, name: &'static str) -> Result<Option<f32>, ShadingError> {
        Ok(self.lookup(name, UniformKind::Scalar)?.and_then(UniformValue::as_scalar))
    }

    pub(crate) fn scalar(&self, name: &'static str) -> Result<f32, ShadingError> {
        self.scalar_opt(name)?.ok_or_else(|| self.missing(name))
    }

    pub(crate) fn scalar_or(&self, name: &'static str, default: f32) -> Result<f32, ShadingError> {
        Ok(self.scalar_opt(name)?.unwrap_or(default))
    }

    /// Optional scalar that must be strictly positive.
    pub(crate) fn positive_or(&self, name: &'static str, default: f32) -> Result<f32, ShadingError> {
        let value = self.scalar_or(name, default)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(name, "value must be positive"))
        }
    }

    /// Optional scalar that must not be negative.
    pub(crate) fn non_negative_or(&self, name: &'static str, default: f32) -> Result<f32, ShadingError> {
        let value = self.scalar_or(name, default)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(name, "value must not be negative"))
        }
    }

    pub(crate) fn vec2_or(&self, name: &'static str, default: Vec2) -> Result<Vec2, ShadingError> {
        Ok(self
            .lookup(name, UniformKind::Vec2)?
            .and_then(UniformValue::as_vec2)
            .unwrap_or(default))
    }

    fn color_opt(&self, name: &'static str) -> Result<Option<Vec3>, ShadingError> {
        Ok(self.lookup(name, UniformKind::Color)?.and_then(UniformValue::as_color))
    }

    pub(crate) fn color(&self, name: &'static str) -> Result<Vec3, ShadingError> {
        self.color_opt(name)?.ok_or_else(|| self.missing(name))
    }
}
