//! Scene-wide threat level and per-level parameter tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discrete alert state that recolours and re-paces an entire district.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThreatLevel {
    #[default]
    Safe,
    Warning,
    Danger,
}

impl ThreatLevel {
    pub const ALL: [ThreatLevel; 3] = [ThreatLevel::Safe, ThreatLevel::Warning, ThreatLevel::Danger];

    pub fn name(self) -> &'static str {
        match self {
            ThreatLevel::Safe => "safe",
            ThreatLevel::Warning => "warning",
            ThreatLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown threat level `{0}` (expected safe, warning or danger)")]
pub struct ParseThreatLevelError(pub String);

impl FromStr for ThreatLevel {
    type Err = ParseThreatLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" => Ok(ThreatLevel::Safe),
            "warning" => Ok(ThreatLevel::Warning),
            "danger" => Ok(ThreatLevel::Danger),
            _ => Err(ParseThreatLevelError(s.to_owned())),
        }
    }
}

/// One value per [`ThreatLevel`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatTable<T> {
    pub safe: T,
    pub warning: T,
    pub danger: T,
}

impl<T> ThreatTable<T> {
    pub const fn new(safe: T, warning: T, danger: T) -> Self {
        Self { safe, warning, danger }
    }

    pub fn get(&self, level: ThreatLevel) -> &T {
        match level {
            ThreatLevel::Safe => &self.safe,
            ThreatLevel::Warning => &self.warning,
            ThreatLevel::Danger => &self.danger,
        }
    }

    pub fn get_mut(&mut self, level: ThreatLevel) -> &mut T {
        match level {
            ThreatLevel::Safe => &mut self.safe,
            ThreatLevel::Warning => &mut self.warning,
            ThreatLevel::Danger => &mut self.danger,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ThreatTable<U> {
        ThreatTable {
            safe: f(&self.safe),
            warning: f(&self.warning),
            danger: f(&self.danger),
        }
    }

    /// Iterate `(level, value)` pairs in ascending severity.
    pub fn iter(&self) -> impl Iterator<Item = (ThreatLevel, &T)> {
        ThreatLevel::ALL.into_iter().map(move |level| (level, self.get(level)))
    }
}

impl<T: Clone> ThreatTable<T> {
    pub fn uniform(value: T) -> Self {
        Self {
            safe: value.clone(),
            warning: value.clone(),
            danger: value,
        }
    }
}

/// Default animation pace per level: calm, brisk, frantic.
pub fn default_pace() -> ThreatTable<f32> {
    ThreatTable::new(1.0, 1.6, 2.5)
}
