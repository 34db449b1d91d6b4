//! The particle pool: struct-of-arrays buffers, integration and recycling.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::emitter::EmitterPolicy;
use crate::error::ParticleError;

/// Upper bound on particles per pool.
pub const MAX_POOL_CAPACITY: usize = 1 << 20;

/// Outcome of a single [`ParticlePool::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Particles respawned this tick, for any reason.
    pub recycled: usize,
    /// Of those, how many had non-finite state.
    pub degenerate: usize,
    /// `dt` was negative or non-finite and was treated as 0.
    pub clock_anomaly: bool,
}

/// Running totals over the pool's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub ticks: u64,
    pub recycled: u64,
    pub degenerate: u64,
    pub clock_anomalies: u64,
}

/// Read-only view of the per-particle buffers handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct ParticleBuffers<'a> {
    pub positions: &'a [Vec3],
    pub ages: &'a [f32],
    pub color_seeds: &'a [f32],
}

/// Fixed-capacity particle pool.
///
/// Buffers are allocated once in the constructor and only ever mutated in
/// place, so the pool size is constant for its whole lifetime.
pub struct ParticlePool<R = ChaCha8Rng> {
    policy: EmitterPolicy,
    origin: Vec3,
    pace: f32,
    positions: Box<[Vec3]>,
    velocities: Box<[Vec3]>,
    ages: Box<[f32]>,
    color_seeds: Box<[f32]>,
    rng: R,
    stats: PoolStats,
}

impl ParticlePool<ChaCha8Rng> {
    /// Build a pool driven by a ChaCha8 stream seeded from `seed`.
    pub fn new(policy: EmitterPolicy, capacity: usize, seed: u64) -> Result<Self, ParticleError> {
        Self::with_rng(policy, capacity, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticlePool<R> {
    /// Build a pool that draws spawns from `rng`.
    pub fn with_rng(policy: EmitterPolicy, capacity: usize, mut rng: R) -> Result<Self, ParticleError> {
        if capacity == 0 || capacity > MAX_POOL_CAPACITY {
            return Err(ParticleError::InvalidCapacity {
                capacity,
                max: MAX_POOL_CAPACITY,
            });
        }
        policy.validate()?;

        let origin = policy.origin;
        let mut positions = vec![Vec3::ZERO; capacity].into_boxed_slice();
        let mut velocities = vec![Vec3::ZERO; capacity].into_boxed_slice();
        let mut ages = vec![0.0f32; capacity].into_boxed_slice();
        let mut color_seeds = vec![0.0f32; capacity].into_boxed_slice();

        for i in 0..capacity {
            color_seeds[i] = rng.random::<f32>();
            let (position, velocity) = spawn(&policy, origin, &mut rng);
            velocities[i] = velocity;

            if policy.prewarm {
                let age = rng.random::<f32>() * policy.max_lifetime;
                let advanced = position + velocity * age;
                if policy.recycle.violated(advanced, origin) || !advanced.is_finite() {
                    positions[i] = position;
                } else {
                    positions[i] = advanced;
                    ages[i] = age;
                }
            } else {
                positions[i] = position;
            }
        }

        log::debug!(
            "particle pool created: capacity={capacity}, lifetime={}s, prewarm={}",
            policy.max_lifetime,
            policy.prewarm
        );

        Ok(Self {
            policy,
            origin,
            pace: 1.0,
            positions,
            velocities,
            ages,
            color_seeds,
            rng,
            stats: PoolStats::default(),
        })
    }

    /// Advance every particle by `dt` seconds (scaled by the pool pace), then
    /// recycle the ones that expired, left their bounds, or went non-finite.
    ///
    /// `dt == 0` leaves the buffers untouched. Negative or non-finite `dt` is
    /// treated as 0 and flagged in the report.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        self.stats.ticks += 1;

        if !dt.is_finite() || dt < 0.0 {
            report.clock_anomaly = true;
            self.stats.clock_anomalies += 1;
            log::debug!("particle pool ignored dt={dt}");
            return report;
        }
        if dt == 0.0 {
            return report;
        }

        let step = dt * self.pace;
        let Self {
            policy,
            origin,
            positions,
            velocities,
            ages,
            rng,
            ..
        } = self;
        let max_lifetime = policy.max_lifetime;

        for i in 0..positions.len() {
            positions[i] += velocities[i] * step;
            ages[i] += step;

            let degenerate = !positions[i].is_finite() || !velocities[i].is_finite() || !ages[i].is_finite();
            if degenerate || ages[i] > max_lifetime || policy.recycle.violated(positions[i], *origin) {
                let (position, velocity) = spawn(policy, *origin, rng);
                positions[i] = position;
                velocities[i] = velocity;
                ages[i] = 0.0;
                report.recycled += 1;
                if degenerate {
                    report.degenerate += 1;
                }
            }
        }

        if report.degenerate > 0 {
            log::debug!("particle pool recycled {} degenerate particles", report.degenerate);
        }
        self.stats.recycled += report.recycled as u64;
        self.stats.degenerate += report.degenerate as u64;
        report
    }
}

impl<R> ParticlePool<R> {
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    pub fn policy(&self) -> &EmitterPolicy {
        &self.policy
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Move the emitter. Affects future spawns and origin-relative bounds;
    /// live particles keep their positions.
    pub fn set_origin(&mut self, origin: Vec3) -> Result<(), ParticleError> {
        if !origin.is_finite() {
            return Err(ParticleError::InvalidOrigin(origin.to_array()));
        }
        self.origin = origin;
        Ok(())
    }

    pub fn pace(&self) -> f32 {
        self.pace
    }

    /// Scale simulated time relative to the host clock.
    pub fn set_pace(&mut self, pace: f32) -> Result<(), ParticleError> {
        if !(pace.is_finite() && pace > 0.0) {
            return Err(ParticleError::InvalidPace(pace));
        }
        self.pace = pace;
        Ok(())
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn ages(&self) -> &[f32] {
        &self.ages
    }

    pub fn color_seeds(&self) -> &[f32] {
        &self.color_seeds
    }

    pub fn buffers(&self) -> ParticleBuffers<'_> {
        ParticleBuffers {
            positions: &self.positions,
            ages: &self.ages,
            color_seeds: &self.color_seeds,
        }
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` slice for GPU upload.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }
}

/// Draw a fresh spawn position and velocity.
fn spawn<R: Rng>(policy: &EmitterPolicy, origin: Vec3, rng: &mut R) -> (Vec3, Vec3) {
    let position = origin + policy.spawn.sample(rng);
    let velocity = policy.velocity.sample(rng);
    (position, velocity)
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha20Rng;

    use super::*;
    use crate::emitter::{RecycleBounds, SpawnRegion, VelocityDistribution};

    fn rising_policy(speed: f32, max_height: f32, lifetime: f32) -> EmitterPolicy {
        EmitterPolicy {
            origin: Vec3::ZERO,
            spawn: SpawnRegion::Disk { radius: 1.0, height: 0.0 },
            velocity: VelocityDistribution::Constant(Vec3::new(0.0, speed, 0.0)),
            max_lifetime: lifetime,
            recycle: RecycleBounds {
                max_height: Some(max_height),
                ..RecycleBounds::default()
            },
            prewarm: false,
        }
    }

    fn assert_invariants<R>(pool: &ParticlePool<R>, capacity: usize) {
        assert_eq!(pool.positions().len(), capacity);
        assert_eq!(pool.velocities().len(), capacity);
        assert_eq!(pool.ages().len(), capacity);
        assert_eq!(pool.color_seeds().len(), capacity);
        let lifetime = pool.policy().max_lifetime;
        for (i, &age) in pool.ages().iter().enumerate() {
            assert!((0.0..=lifetime).contains(&age), "particle {i} age {age} outside [0, {lifetime}]");
        }
        for (i, p) in pool.positions().iter().enumerate() {
            assert!(p.is_finite(), "particle {i} position not finite: {p}");
        }
    }

    #[test]
    fn test_rejects_bad_capacity() {
        let policy = rising_policy(1.0, 15.0, 10.0);
        assert!(matches!(
            ParticlePool::new(policy.clone(), 0, 1),
            Err(ParticleError::InvalidCapacity { capacity: 0, .. })
        ));
        assert!(matches!(
            ParticlePool::new(policy, MAX_POOL_CAPACITY + 1, 1),
            Err(ParticleError::InvalidCapacity { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_lifetime() {
        let policy = rising_policy(1.0, 15.0, -2.0);
        assert!(matches!(
            ParticlePool::new(policy, 8, 1),
            Err(ParticleError::InvalidLifetime(_))
        ));
    }

    #[test]
    fn test_invariants_hold_under_erratic_dt() {
        let policy = EmitterPolicy::fountain(Vec3::new(2.0, 0.0, -3.0), 0.5, 12.0, 3.0);
        let mut pool = ParticlePool::new(policy, 300, 42).expect("valid pool");
        assert_invariants(&pool, 300);
        let dts = [0.016, 0.0, -0.5, 0.25, f32::NAN, 3.0, 0.033, f32::INFINITY, 100.0, 0.001];
        for round in 0..20 {
            for &dt in &dts {
                pool.tick(dt);
                assert_invariants(&pool, 300);
            }
            assert_eq!(pool.capacity(), 300, "round {round} changed capacity");
        }
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut pool = ParticlePool::new(EmitterPolicy::drone_trail(0.5, 2.0), 64, 9).expect("valid pool");
        let positions = pool.positions().to_vec();
        let ages = pool.ages().to_vec();
        let report = pool.tick(0.0);
        assert_eq!(report, TickReport::default());
        assert_eq!(pool.positions(), positions.as_slice());
        assert_eq!(pool.ages(), ages.as_slice());
    }

    #[test]
    fn test_negative_dt_is_clamped_and_reported() {
        let mut pool = ParticlePool::new(EmitterPolicy::drone_trail(0.5, 2.0), 64, 9).expect("valid pool");
        let positions = pool.positions().to_vec();
        let report = pool.tick(-0.016);
        assert!(report.clock_anomaly);
        assert_eq!(report.recycled, 0);
        assert_eq!(pool.positions(), positions.as_slice());
        assert!(pool.tick(f32::NAN).clock_anomaly);
        assert_eq!(pool.stats().clock_anomalies, 2);
    }

    #[test]
    fn test_height_bound_recycles_exactly() {
        let mut policy = rising_policy(1.0, 15.0, 1000.0);
        policy.spawn = SpawnRegion::Point;
        let mut pool = ParticlePool::new(policy, 4, 5).expect("valid pool");

        for _ in 0..15 {
            assert_eq!(pool.tick(1.0).recycled, 0);
        }
        assert!(pool.positions().iter().all(|p| p.y == 15.0), "particles sit on the bound");

        let report = pool.tick(1.0);
        assert_eq!(report.recycled, 4);
        assert!(pool.positions().iter().all(|p| *p == Vec3::ZERO));
        assert!(pool.ages().iter().all(|&a| a == 0.0));
    }

    #[test]
    fn test_fountain_fully_recycles_within_150_ticks() {
        let mut policy = rising_policy(0.1, 15.0, 149.0);
        policy.prewarm = true;
        let capacity = 200;
        let mut pool = ParticlePool::new(policy, capacity, 1234).expect("valid pool");

        let mut respawned = vec![false; capacity];
        for _ in 0..150 {
            pool.tick(1.0);
            for (i, (p, &age)) in pool.positions().iter().zip(pool.ages()).enumerate() {
                if age == 0.0 && p.y <= 1.0 {
                    respawned[i] = true;
                }
            }
            assert_invariants(&pool, capacity);
        }
        let missing = respawned.iter().filter(|r| !**r).count();
        assert_eq!(missing, 0, "{missing} particles were never recycled");
    }

    #[test]
    fn test_containment_radius_recycles() {
        let policy = EmitterPolicy {
            origin: Vec3::ZERO,
            spawn: SpawnRegion::Point,
            velocity: VelocityDistribution::Constant(Vec3::new(3.0, 0.0, 0.0)),
            max_lifetime: 100.0,
            recycle: RecycleBounds {
                containment_radius: Some(10.0),
                ..RecycleBounds::default()
            },
            prewarm: false,
        };
        let mut pool = ParticlePool::new(policy, 2, 0).expect("valid pool");
        assert_eq!(pool.tick(3.0).recycled, 0);
        assert_eq!(pool.tick(1.0).recycled, 2, "x = 12 escapes radius 10");
    }

    #[test]
    fn test_lifetime_expiry_recycles() {
        let mut pool = ParticlePool::new(rising_policy(0.0, 15.0, 2.0), 3, 0).expect("valid pool");
        assert_eq!(pool.tick(1.5).recycled, 0);
        assert_eq!(pool.tick(1.0).recycled, 3);
        assert!(pool.ages().iter().all(|&a| a == 0.0));
    }

    #[test]
    fn test_non_finite_particle_is_recycled() {
        let mut pool = ParticlePool::new(rising_policy(1.0, 15.0, 100.0), 8, 3).expect("valid pool");
        pool.velocities[2] = Vec3::new(f32::NAN, 0.0, 0.0);
        pool.positions[5] = Vec3::splat(f32::INFINITY);
        let report = pool.tick(0.1);
        assert_eq!(report.degenerate, 2);
        assert_eq!(report.recycled, 2);
        assert_invariants(&pool, 8);
        assert!(pool.velocities().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_color_seed_survives_recycle() {
        let mut pool = ParticlePool::new(rising_policy(0.0, 15.0, 1.0), 16, 77).expect("valid pool");
        let seeds = pool.color_seeds().to_vec();
        assert!(seeds.iter().all(|s| (0.0..1.0).contains(s)));
        assert_eq!(pool.tick(2.0).recycled, 16);
        assert_eq!(pool.color_seeds(), seeds.as_slice());
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let policy = EmitterPolicy::fountain(Vec3::ZERO, 0.8, 10.0, 2.5);
        let mut a = ParticlePool::new(policy.clone(), 128, 99).expect("valid pool");
        let mut b = ParticlePool::new(policy, 128, 99).expect("valid pool");
        for i in 0..200 {
            let dt = 0.01 + (i % 7) as f32 * 0.013;
            assert_eq!(a.tick(dt), b.tick(dt));
        }
        let bits = |p: &ParticlePool| p.positions_flat().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
        assert_eq!(a.ages(), b.ages());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let policy = EmitterPolicy::ambient_field(Vec3::ZERO, Vec3::splat(4.0), 0.3, 6.0);
        let a = ParticlePool::new(policy.clone(), 32, 1).expect("valid pool");
        let b = ParticlePool::new(policy, 32, 2).expect("valid pool");
        assert_ne!(a.positions(), b.positions());
    }

    #[test]
    fn test_injected_rng_stream() {
        let policy = EmitterPolicy::drone_trail(0.4, 1.0);
        let mut a = ParticlePool::with_rng(policy.clone(), 50, ChaCha20Rng::seed_from_u64(5)).expect("valid pool");
        let mut b = ParticlePool::with_rng(policy, 50, ChaCha20Rng::seed_from_u64(5)).expect("valid pool");
        for _ in 0..60 {
            a.tick(0.05);
            b.tick(0.05);
        }
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn test_pace_scales_motion() {
        let mut slow = ParticlePool::new(rising_policy(1.0, 100.0, 100.0), 4, 8).expect("valid pool");
        let mut fast = ParticlePool::new(rising_policy(1.0, 100.0, 100.0), 4, 8).expect("valid pool");
        fast.set_pace(2.0).expect("valid pace");
        slow.tick(1.0);
        fast.tick(1.0);
        for (s, f) in slow.positions().iter().zip(fast.positions()) {
            assert_eq!(f.y, 2.0 * s.y);
        }
        assert!(fast.set_pace(0.0).is_err());
        assert!(fast.set_pace(f32::NAN).is_err());
    }

    #[test]
    fn test_set_origin_moves_spawns() {
        let mut policy = rising_policy(1.0, 2.0, 100.0);
        policy.spawn = SpawnRegion::Point;
        let mut pool = ParticlePool::new(policy, 2, 0).expect("valid pool");
        let target = Vec3::new(5.0, 6.0, 7.0);
        pool.set_origin(target).expect("finite origin");
        // y = 10 is 4 above the new origin, past the height bound of 2.
        pool.tick(10.0);
        assert!(pool.positions().iter().all(|p| *p == target));
        assert!(pool.set_origin(Vec3::splat(f32::NAN)).is_err());
    }

    #[test]
    fn test_prewarm_staggers_ages() {
        let policy = EmitterPolicy::ambient_field(Vec3::ZERO, Vec3::splat(50.0), 0.01, 10.0);
        let pool = ParticlePool::new(policy, 100, 4).expect("valid pool");
        let distinct = {
            let mut ages: Vec<u32> = pool.ages().iter().map(|a| a.to_bits()).collect();
            ages.sort_unstable();
            ages.dedup();
            ages.len()
        };
        assert!(distinct > 90, "prewarmed ages should be spread out: {distinct} distinct");
        assert_invariants(&pool, 100);
    }

    #[test]
    fn test_buffers_and_flat_view() {
        let pool = ParticlePool::new(EmitterPolicy::drone_trail(0.2, 1.0), 10, 1).expect("valid pool");
        let buffers = pool.buffers();
        assert_eq!(buffers.positions.len(), 10);
        assert_eq!(buffers.ages.len(), 10);
        assert_eq!(buffers.color_seeds.len(), 10);
        let flat = pool.positions_flat();
        assert_eq!(flat.len(), 30);
        assert_eq!(flat[3], pool.positions()[1].x);
    }
}
