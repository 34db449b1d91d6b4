//! Emitter policy: where particles spawn, how fast they move, and when they
//! are recycled.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ParticleError;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ---------------------------------------------------------------------------
// Spawn region
// ---------------------------------------------------------------------------

/// Region, relative to the emitter origin, that fresh particles are drawn from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpawnRegion {
    Point,
    /// Horizontal disk at `height` above the origin.
    Disk { radius: f32, height: f32 },
    /// Solid ball, sampled uniformly by volume.
    Sphere { radius: f32 },
    /// Axis-aligned box centred on the origin.
    Box { half_extents: Vec3 },
}

impl SpawnRegion {
    /// Draw an offset from the emitter origin.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec3 {
        match *self {
            SpawnRegion::Point => Vec3::ZERO,
            SpawnRegion::Disk { radius, height } => {
                let angle = rng.random::<f32>() * TAU;
                let r = rng.random::<f32>() * radius;
                Vec3::new(r * angle.cos(), height, r * angle.sin())
            }
            SpawnRegion::Sphere { radius } => {
                let z = 1.0 - 2.0 * rng.random::<f32>();
                let phi = rng.random::<f32>() * TAU;
                let s = (1.0 - z * z).max(0.0).sqrt();
                let r = radius * rng.random::<f32>().cbrt();
                Vec3::new(s * phi.cos(), z, s * phi.sin()) * r
            }
            SpawnRegion::Box { half_extents } => Vec3::new(
                lerp(-half_extents.x, half_extents.x, rng.random::<f32>()),
                lerp(-half_extents.y, half_extents.y, rng.random::<f32>()),
                lerp(-half_extents.z, half_extents.z, rng.random::<f32>()),
            ),
        }
    }

    /// Largest distance from the origin a spawn can land at.
    pub fn reach(&self) -> f32 {
        match *self {
            SpawnRegion::Point => 0.0,
            SpawnRegion::Disk { radius, height } => (radius * radius + height * height).sqrt(),
            SpawnRegion::Sphere { radius } => radius,
            SpawnRegion::Box { half_extents } => half_extents.length(),
        }
    }

    fn validate(&self) -> Result<(), ParticleError> {
        match *self {
            SpawnRegion::Point => Ok(()),
            SpawnRegion::Disk { radius, height } => {
                if !(radius.is_finite() && radius >= 0.0) {
                    Err(ParticleError::InvalidSpawnRegion("disk radius must be finite and non-negative"))
                } else if !height.is_finite() {
                    Err(ParticleError::InvalidSpawnRegion("disk height must be finite"))
                } else {
                    Ok(())
                }
            }
            SpawnRegion::Sphere { radius } => {
                if radius.is_finite() && radius >= 0.0 {
                    Ok(())
                } else {
                    Err(ParticleError::InvalidSpawnRegion("sphere radius must be finite and non-negative"))
                }
            }
            SpawnRegion::Box { half_extents } => {
                if half_extents.is_finite() && half_extents.min_element() >= 0.0 {
                    Ok(())
                } else {
                    Err(ParticleError::InvalidSpawnRegion("box half extents must be finite and non-negative"))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Velocity distribution
// ---------------------------------------------------------------------------

/// Initial velocity of a fresh particle, in units per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VelocityDistribution {
    Constant(Vec3),
    /// Independent uniform draw per component.
    Uniform { min: Vec3, max: Vec3 },
    /// Direction within `half_angle` radians of `axis`, speed in the given range.
    Cone {
        axis: Vec3,
        half_angle: f32,
        speed_min: f32,
        speed_max: f32,
    },
}

impl VelocityDistribution {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec3 {
        match *self {
            VelocityDistribution::Constant(v) => v,
            VelocityDistribution::Uniform { min, max } => Vec3::new(
                lerp(min.x, max.x, rng.random::<f32>()),
                lerp(min.y, max.y, rng.random::<f32>()),
                lerp(min.z, max.z, rng.random::<f32>()),
            ),
            VelocityDistribution::Cone {
                axis,
                half_angle,
                speed_min,
                speed_max,
            } => {
                let axis = axis.normalize_or_zero();
                let (b1, b2) = axis.any_orthonormal_pair();
                let cos_theta = lerp(half_angle.cos(), 1.0, rng.random::<f32>());
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
                let phi = rng.random::<f32>() * TAU;
                let dir = axis * cos_theta + (b1 * phi.cos() + b2 * phi.sin()) * sin_theta;
                dir * lerp(speed_min, speed_max, rng.random::<f32>())
            }
        }
    }

    fn validate(&self) -> Result<(), ParticleError> {
        match *self {
            VelocityDistribution::Constant(v) => {
                if v.is_finite() {
                    Ok(())
                } else {
                    Err(ParticleError::InvalidVelocity("constant velocity must be finite"))
                }
            }
            VelocityDistribution::Uniform { min, max } => {
                if !(min.is_finite() && max.is_finite()) {
                    Err(ParticleError::InvalidVelocity("uniform bounds must be finite"))
                } else if min.cmpgt(max).any() {
                    Err(ParticleError::InvalidVelocity("uniform min exceeds max"))
                } else {
                    Ok(())
                }
            }
            VelocityDistribution::Cone {
                axis,
                half_angle,
                speed_min,
                speed_max,
            } => {
                if !axis.is_finite() || axis.length_squared() <= f32::EPSILON {
                    Err(ParticleError::InvalidVelocity("cone axis must be finite and non-zero"))
                } else if !(half_angle.is_finite() && (0.0..=std::f32::consts::PI).contains(&half_angle)) {
                    Err(ParticleError::InvalidVelocity("cone half angle must be within [0, pi]"))
                } else if !(speed_min.is_finite() && speed_max.is_finite()) || speed_min < 0.0 {
                    Err(ParticleError::InvalidVelocity("cone speeds must be finite and non-negative"))
                } else if speed_min > speed_max {
                    Err(ParticleError::InvalidVelocity("cone speed_min exceeds speed_max"))
                } else {
                    Ok(())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Recycle bounds
// ---------------------------------------------------------------------------

/// Spatial limits measured relative to the emitter origin. Crossing any of
/// them recycles the particle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecycleBounds {
    pub max_height: Option<f32>,
    pub min_height: Option<f32>,
    pub containment_radius: Option<f32>,
}

impl RecycleBounds {
    pub fn violated(&self, position: Vec3, origin: Vec3) -> bool {
        let local = position - origin;
        self.max_height.is_some_and(|h| local.y > h)
            || self.min_height.is_some_and(|h| local.y < h)
            || self.containment_radius.is_some_and(|r| local.length_squared() > r * r)
    }

    fn validate(&self) -> Result<(), ParticleError> {
        for bound in [self.max_height, self.min_height].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ParticleError::InvalidRecycleBounds("height bounds must be finite"));
            }
        }
        if let (Some(lo), Some(hi)) = (self.min_height, self.max_height)
            && lo >= hi
        {
            return Err(ParticleError::InvalidRecycleBounds("min_height must be below max_height"));
        }
        if let Some(r) = self.containment_radius
            && !(r.is_finite() && r > 0.0)
        {
            return Err(ParticleError::InvalidRecycleBounds("containment radius must be positive and finite"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Complete description of how a pool spawns and recycles particles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmitterPolicy {
    #[serde(default)]
    pub origin: Vec3,
    pub spawn: SpawnRegion,
    pub velocity: VelocityDistribution,
    /// Seconds a particle lives before it is recycled.
    pub max_lifetime: f32,
    #[serde(default)]
    pub recycle: RecycleBounds,
    /// Stagger initial ages across the lifetime so the pool starts in steady state.
    #[serde(default)]
    pub prewarm: bool,
}

impl EmitterPolicy {
    /// Upward jet from a disk, recycled when it rises past `max_height`.
    pub fn fountain(origin: Vec3, radius: f32, max_height: f32, rise_speed: f32) -> Self {
        Self {
            origin,
            spawn: SpawnRegion::Disk { radius, height: 0.0 },
            velocity: VelocityDistribution::Cone {
                axis: Vec3::Y,
                half_angle: 0.12,
                speed_min: rise_speed * 0.85,
                speed_max: rise_speed * 1.15,
            },
            max_lifetime: max_height / (rise_speed * 0.85),
            recycle: RecycleBounds {
                max_height: Some(max_height),
                min_height: Some(-0.5),
                containment_radius: Some(max_height + radius * 2.0),
            },
            prewarm: true,
        }
    }

    /// Slow drifting motes filling a box.
    pub fn ambient_field(origin: Vec3, half_extents: Vec3, drift_speed: f32, lifetime: f32) -> Self {
        let drift = Vec3::splat(drift_speed);
        Self {
            origin,
            spawn: SpawnRegion::Box { half_extents },
            velocity: VelocityDistribution::Uniform {
                min: -drift + Vec3::new(0.0, drift_speed * 0.5, 0.0),
                max: drift + Vec3::new(0.0, drift_speed * 0.5, 0.0),
            },
            max_lifetime: lifetime,
            recycle: RecycleBounds {
                containment_radius: Some(half_extents.length() * 1.5),
                ..RecycleBounds::default()
            },
            prewarm: true,
        }
    }

    /// Falling embers shed by a moving emitter. The origin is expected to be
    /// moved every frame with [`ParticlePool::set_origin`](crate::ParticlePool::set_origin).
    pub fn drone_trail(spread: f32, lifetime: f32) -> Self {
        Self {
            origin: Vec3::ZERO,
            spawn: SpawnRegion::Sphere { radius: spread },
            velocity: VelocityDistribution::Uniform {
                min: Vec3::new(-0.15, -0.6, -0.15),
                max: Vec3::new(0.15, -0.1, 0.15),
            },
            max_lifetime: lifetime,
            recycle: RecycleBounds::default(),
            prewarm: true,
        }
    }

    pub fn validate(&self) -> Result<(), ParticleError> {
        if !self.origin.is_finite() {
            return Err(ParticleError::InvalidOrigin(self.origin.to_array()));
        }
        if !(self.max_lifetime.is_finite() && self.max_lifetime > 0.0) {
            return Err(ParticleError::InvalidLifetime(self.max_lifetime));
        }
        self.spawn.validate()?;
        self.velocity.validate()?;
        self.recycle.validate()
    }
}
