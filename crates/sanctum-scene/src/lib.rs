//! District assembly: binds shading programs, particle pools and orbital
//! entities from a [`DistrictManifest`] and exposes the per-frame API a
//! renderer drives.
//!
//! Configuration errors surface once, from [`District::from_manifest`]. After
//! that the only run-time input is the [`ThreatLevel`](sanctum_math::ThreatLevel),
//! switched between frames with [`District::set_threat_level`].

mod district;
mod error;
mod manifest;

pub use district::{District, FrameReport, MaterialHandle, OrbitalHandle, PoolHandle, derive_pool_seed};
pub use error::SceneError;
pub use manifest::{DistrictManifest, MaterialEntry, OrbitalEntry, PoolEntry};
