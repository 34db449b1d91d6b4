//! A fully bound district and its per-frame API.

use std::collections::{BTreeMap, HashMap};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use sanctum_math::{ThreatLevel, ThreatTable};
use sanctum_orbital::{OrbitalEntity, OrbitalSample};
use sanctum_particles::{ParticleBuffers, ParticlePool, TickReport};
use sanctum_shading::{
    Archetype, BoundProgram, Fragment, Shade, ShadingError, ShadingProgram, UniformSet, names,
};

use crate::error::SceneError;
use crate::manifest::{DistrictManifest, MaterialEntry};

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Index of a material within the district that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(usize);

/// Index of a particle pool within the district that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle(usize);

/// Index of an orbital entity within the district that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrbitalHandle(usize);

impl MaterialHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl PoolHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl OrbitalHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derive a per-pool seed from the district seed and the pool name.
///
/// Renaming or reordering other pools never changes a pool's stream.
pub fn derive_pool_seed(district_seed: u64, pool_name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    district_seed.hash(&mut hasher);
    pool_name.hash(&mut hasher);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// Frame report
// ---------------------------------------------------------------------------

/// Aggregate particle activity for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub pools_ticked: usize,
    pub recycled: usize,
    pub degenerate: usize,
    pub clock_anomaly: bool,
}

impl FrameReport {
    fn absorb(&mut self, tick: TickReport) {
        self.pools_ticked += 1;
        self.recycled += tick.recycled;
        self.degenerate += tick.degenerate;
        self.clock_anomaly |= tick.clock_anomaly;
    }

    fn merge(mut self, other: FrameReport) -> FrameReport {
        self.pools_ticked += other.pools_ticked;
        self.recycled += other.recycled;
        self.degenerate += other.degenerate;
        self.clock_anomaly |= other.clock_anomaly;
        self
    }
}

// ---------------------------------------------------------------------------
// District
// ---------------------------------------------------------------------------

struct SceneMaterial {
    name: String,
    archetype: Archetype,
    base: UniformSet,
    overrides: BTreeMap<ThreatLevel, UniformSet>,
    active: UniformSet,
    program: BoundProgram,
}

struct ScenePool {
    name: String,
    pool: ParticlePool,
    follow: Option<OrbitalHandle>,
}

struct SceneOrbital {
    name: String,
    entity: OrbitalEntity,
}

/// A loaded district: every material bound, every pool allocated.
pub struct District {
    name: String,
    threat: ThreatLevel,
    pace: ThreatTable<f32>,
    materials: Vec<SceneMaterial>,
    pools: Vec<ScenePool>,
    orbitals: Vec<SceneOrbital>,
    material_names: HashMap<String, MaterialHandle>,
    pool_names: HashMap<String, PoolHandle>,
    orbital_names: HashMap<String, OrbitalHandle>,
}

/// Uniforms a material runs with at `level`: overrides merged over the base,
/// then `speed` scaled by the level's pace.
fn effective_uniforms(
    base: &UniformSet,
    overrides: &BTreeMap<ThreatLevel, UniformSet>,
    level: ThreatLevel,
    pace: f32,
) -> UniformSet {
    let mut uniforms = match overrides.get(&level) {
        Some(over) => base.merged(over),
        None => base.clone(),
    };
    uniforms.scale_scalar(names::SPEED, pace);
    uniforms
}

fn insert_unique<H: Copy>(
    map: &mut HashMap<String, H>,
    kind: &'static str,
    name: &str,
    handle: H,
) -> Result<(), SceneError> {
    if map.insert(name.to_owned(), handle).is_some() {
        return Err(SceneError::DuplicateName {
            kind,
            name: name.to_owned(),
        });
    }
    Ok(())
}

impl District {
    /// Validate and bind everything in `manifest`.
    ///
    /// Every material is bound at every threat level here, so a bad override
    /// fails the load rather than a later threat switch.
    pub fn from_manifest(manifest: &DistrictManifest) -> Result<Self, SceneError> {
        for (level, &value) in manifest.pace.iter() {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidPace { level, value });
            }
        }
        let threat = manifest.threat;
        let pace = *manifest.pace.get(threat);

        let mut orbital_names = HashMap::new();
        let mut orbitals = Vec::with_capacity(manifest.orbitals.len());
        for (index, entry) in manifest.orbitals.iter().enumerate() {
            insert_unique(&mut orbital_names, "orbital", &entry.name, OrbitalHandle(index))?;
            entry.entity.validate().map_err(|source| SceneError::Orbital {
                name: entry.name.clone(),
                source,
            })?;
            orbitals.push(SceneOrbital {
                name: entry.name.clone(),
                entity: entry.entity.clone(),
            });
        }

        let mut material_names = HashMap::new();
        let mut materials = Vec::with_capacity(manifest.materials.len());
        for (index, entry) in manifest.materials.iter().enumerate() {
            insert_unique(&mut material_names, "material", &entry.name, MaterialHandle(index))?;
            materials.push(Self::bind_material(entry, &manifest.pace, threat)?);
        }

        let mut pool_names = HashMap::new();
        let mut pools = Vec::with_capacity(manifest.pools.len());
        for (index, entry) in manifest.pools.iter().enumerate() {
            insert_unique(&mut pool_names, "pool", &entry.name, PoolHandle(index))?;
            let follow = match &entry.follow {
                Some(target) => Some(*orbital_names.get(target).ok_or_else(|| SceneError::UnknownFollowTarget {
                    pool: entry.name.clone(),
                    target: target.clone(),
                })?),
                None => None,
            };
            let pool_err = |source| SceneError::Pool {
                name: entry.name.clone(),
                source,
            };
            let seed = derive_pool_seed(manifest.seed, &entry.name);
            let mut pool = ParticlePool::new(entry.policy.clone(), entry.capacity, seed).map_err(pool_err)?;
            pool.set_pace(pace).map_err(pool_err)?;
            pools.push(ScenePool {
                name: entry.name.clone(),
                pool,
                follow,
            });
        }

        let district = Self {
            name: manifest.name.clone(),
            threat,
            pace: manifest.pace,
            materials,
            pools,
            orbitals,
            material_names,
            pool_names,
            orbital_names,
        };
        log::info!(
            "District `{}` assembled: {} materials, {} pools ({} particles), {} orbitals, threat {}",
            district.name,
            district.materials.len(),
            district.pools.len(),
            district.particle_count(),
            district.orbitals.len(),
            district.threat
        );
        Ok(district)
    }

    fn bind_material(
        entry: &MaterialEntry,
        pace: &ThreatTable<f32>,
        threat: ThreatLevel,
    ) -> Result<SceneMaterial, SceneError> {
        let material_err = |source: ShadingError| SceneError::Material {
            name: entry.name.clone(),
            source,
        };
        for level in ThreatLevel::ALL {
            let uniforms = effective_uniforms(&entry.uniforms, &entry.threat_overrides, level, *pace.get(level));
            entry.archetype.bind(&uniforms).map_err(material_err)?;
        }
        let active = effective_uniforms(&entry.uniforms, &entry.threat_overrides, threat, *pace.get(threat));
        let program = entry.archetype.bind(&active).map_err(material_err)?;
        Ok(SceneMaterial {
            name: entry.name.clone(),
            archetype: entry.archetype,
            base: entry.uniforms.clone(),
            overrides: entry.threat_overrides.clone(),
            active,
            program,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threat_level(&self) -> ThreatLevel {
        self.threat
    }

    /// Total particle capacity across all pools.
    pub fn particle_count(&self) -> usize {
        self.pools.iter().map(|p| p.pool.capacity()).sum()
    }

    // -- Threat --------------------------------------------------------------

    /// Switch the district to `level`.
    ///
    /// Recolours and re-paces everything at once: materials are rebound with
    /// their overrides, pools take the new pace, and orbital samples use the
    /// new level from the next call on. Nothing is interpolated.
    pub fn set_threat_level(&mut self, level: ThreatLevel) -> Result<(), SceneError> {
        let pace = *self.pace.get(level);

        let mut rebound = Vec::with_capacity(self.materials.len());
        for material in &self.materials {
            let active = effective_uniforms(&material.base, &material.overrides, level, pace);
            let program = material
                .archetype
                .bind(&active)
                .map_err(|source| SceneError::Material {
                    name: material.name.clone(),
                    source,
                })?;
            rebound.push((active, program));
        }

        for scene_pool in &mut self.pools {
            scene_pool.pool.set_pace(pace).map_err(|source| SceneError::Pool {
                name: scene_pool.name.clone(),
                source,
            })?;
        }
        for (material, (active, program)) in self.materials.iter_mut().zip(rebound) {
            material.active = active;
            material.program = program;
        }

        if level != self.threat {
            log::info!("District `{}` threat level {} -> {}", self.name, self.threat, level);
        }
        self.threat = level;
        Ok(())
    }

    // -- Lookup --------------------------------------------------------------

    pub fn material(&self, name: &str) -> Option<MaterialHandle> {
        self.material_names.get(name).copied()
    }

    pub fn pool(&self, name: &str) -> Option<PoolHandle> {
        self.pool_names.get(name).copied()
    }

    pub fn orbital(&self, name: &str) -> Option<OrbitalHandle> {
        self.orbital_names.get(name).copied()
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialHandle, &str)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialHandle(i), m.name.as_str()))
    }

    pub fn pools(&self) -> impl Iterator<Item = (PoolHandle, &str)> {
        self.pools.iter().enumerate().map(|(i, p)| (PoolHandle(i), p.name.as_str()))
    }

    pub fn orbitals(&self) -> impl Iterator<Item = (OrbitalHandle, &str)> {
        self.orbitals
            .iter()
            .enumerate()
            .map(|(i, o)| (OrbitalHandle(i), o.name.as_str()))
    }

    fn unknown(&self, kind: &'static str, index: usize) -> SceneError {
        SceneError::UnknownHandle {
            kind,
            index,
            district: self.name.clone(),
        }
    }

    fn scene_material(&self, handle: MaterialHandle) -> Result<&SceneMaterial, SceneError> {
        self.materials.get(handle.0).ok_or_else(|| self.unknown("material", handle.0))
    }

    fn scene_pool_mut(&mut self, handle: PoolHandle) -> Result<&mut ScenePool, SceneError> {
        if handle.0 >= self.pools.len() {
            return Err(self.unknown("pool", handle.0));
        }
        Ok(&mut self.pools[handle.0])
    }

    fn scene_orbital(&self, handle: OrbitalHandle) -> Result<&SceneOrbital, SceneError> {
        self.orbitals.get(handle.0).ok_or_else(|| self.unknown("orbital", handle.0))
    }

    // -- Frame API -----------------------------------------------------------

    /// The bound program for a material, for renderers that shade in bulk.
    pub fn program(&self, handle: MaterialHandle) -> Result<&BoundProgram, SceneError> {
        Ok(&self.scene_material(handle)?.program)
    }

    /// Uniforms the material is currently bound with.
    pub fn active_uniforms(&self, handle: MaterialHandle) -> Result<&UniformSet, SceneError> {
        Ok(&self.scene_material(handle)?.active)
    }

    /// Evaluate a material at one fragment.
    pub fn shade(&self, handle: MaterialHandle, fragment: &Fragment, time: f64) -> Result<Shade, SceneError> {
        Ok(self.scene_material(handle)?.program.evaluate(fragment, time))
    }

    pub fn particle_pool(&self, handle: PoolHandle) -> Result<&ParticlePool, SceneError> {
        self.pools
            .get(handle.0)
            .map(|p| &p.pool)
            .ok_or_else(|| self.unknown("pool", handle.0))
    }

    /// Tick one pool and return its buffers for upload.
    pub fn tick_particles(&mut self, handle: PoolHandle, dt: f32) -> Result<ParticleBuffers<'_>, SceneError> {
        let district = self.name.clone();
        let scene_pool = self.scene_pool_mut(handle)?;
        let report = scene_pool.pool.tick(dt);
        if report.clock_anomaly {
            log::warn!(
                "District `{district}` pool `{}`: clock anomaly (dt={dt}), treated as 0",
                scene_pool.name
            );
        }
        Ok(scene_pool.pool.buffers())
    }

    /// Sample an orbital entity under the current threat level.
    pub fn orbital_position(&self, handle: OrbitalHandle, t: f64) -> Result<OrbitalSample, SceneError> {
        Ok(self.scene_orbital(handle)?.entity.sample(t, self.threat))
    }

    /// Move every following pool to its orbital, then tick all pools.
    pub fn advance(&mut self, time: f64, dt: f32) -> FrameReport {
        self.update_followers(time);
        let report = tick_pools(&mut self.pools, dt);
        self.log_anomaly(&report, dt);
        report
    }

    /// [`District::advance`] with pools split across up to `workers` scoped
    /// threads. Pools share nothing, so the result is identical to the
    /// sequential path.
    pub fn advance_parallel(&mut self, time: f64, dt: f32, workers: usize) -> FrameReport {
        self.update_followers(time);
        let workers = workers.clamp(1, self.pools.len().max(1));
        let report = if workers == 1 {
            tick_pools(&mut self.pools, dt)
        } else {
            let chunk = self.pools.len().div_ceil(workers);
            std::thread::scope(|scope| {
                let handles: Vec<_> = self
                    .pools
                    .chunks_mut(chunk)
                    .map(|pools| scope.spawn(move || tick_pools(pools, dt)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
                    .fold(FrameReport::default(), FrameReport::merge)
            })
        };
        self.log_anomaly(&report, dt);
        report
    }

    fn update_followers(&mut self, time: f64) {
        for scene_pool in &mut self.pools {
            let Some(target) = scene_pool.follow else {
                continue;
            };
            let position = self.orbitals[target.0].entity.sample(time, self.threat).position;
            if let Err(e) = scene_pool.pool.set_origin(position) {
                log::warn!("District `{}` pool `{}` cannot follow: {e}", self.name, scene_pool.name);
            }
        }
    }

    fn log_anomaly(&self, report: &FrameReport, dt: f32) {
        if report.clock_anomaly {
            log::warn!("District `{}`: clock anomaly (dt={dt}), particle time held for this frame", self.name);
        }
    }
}

fn tick_pools(pools: &mut [ScenePool], dt: f32) -> FrameReport {
    let mut report = FrameReport::default();
    for scene_pool in pools {
        report.absorb(scene_pool.pool.tick(dt));
    }
    report
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};
    use sanctum_shading::UniformValue;

    use super::*;
    use crate::manifest::{OrbitalEntry, PoolEntry};

    fn hall() -> District {
        District::from_manifest(&DistrictManifest::ceremonial_hall()).expect("ceremonial hall loads")
    }

    #[test]
    fn test_ceremonial_hall_assembles() {
        let d = hall();
        assert_eq!(d.name(), "ceremonial_hall");
        assert_eq!(d.materials().count(), 5);
        assert_eq!(d.pools().count(), 4);
        assert_eq!(d.orbitals().count(), 4);
        assert_eq!(d.particle_count(), 600 + 400 + 120 + 120);
        assert!(d.material("portal").is_some());
        assert!(d.material("marble").is_none());
    }

    #[test]
    fn test_missing_uniform_fails_load() {
        let mut manifest = DistrictManifest::ceremonial_hall();
        manifest.materials[0].uniforms.remove(names::GLOW_COLOR);
        let err = District::from_manifest(&manifest).err();
        assert!(
            matches!(
                &err,
                Some(SceneError::Material {
                    name,
                    source: ShadingError::MissingParameter { name: "glow_color", .. },
                }) if name == "obsidian_column"
            ),
            "unexpected result: {err:?}"
        );
    }

    #[test]
    fn test_bad_override_fails_load_not_threat_switch() {
        let mut manifest = DistrictManifest::ceremonial_hall();
        manifest.materials[2].threat_overrides.insert(
            ThreatLevel::Danger,
            UniformSet::new().with(names::GLOW_INTENSITY, Vec2::ONE),
        );
        assert!(matches!(
            District::from_manifest(&manifest),
            Err(SceneError::Material { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut manifest = DistrictManifest::ceremonial_hall();
        let dup = manifest.pools[0].clone();
        manifest.pools.push(dup);
        assert!(matches!(
            District::from_manifest(&manifest),
            Err(SceneError::DuplicateName { kind: "pool", .. })
        ));
    }

    #[test]
    fn test_unknown_follow_target_rejected() {
        let mut manifest = DistrictManifest::ceremonial_hall();
        manifest.pools[2].follow = Some("ghost".into());
        assert!(matches!(
            District::from_manifest(&manifest),
            Err(SceneError::UnknownFollowTarget { .. })
        ));
    }

    #[test]
    fn test_invalid_pool_and_orbital_rejected() {
        let mut manifest = DistrictManifest::ceremonial_hall();
        manifest.pools[0].capacity = 0;
        assert!(matches!(District::from_manifest(&manifest), Err(SceneError::Pool { .. })));

        let mut manifest = DistrictManifest::ceremonial_hall();
        manifest.orbitals[0].entity.orbit_radius = -3.0;
        assert!(matches!(District::from_manifest(&manifest), Err(SceneError::Orbital { .. })));

        let mut manifest = DistrictManifest::ceremonial_hall();
        manifest.pace.warning = f32::NAN;
        assert!(matches!(
            District::from_manifest(&manifest),
            Err(SceneError::InvalidPace { level: ThreatLevel::Warning, .. })
        ));
    }

    #[test]
    fn test_threat_switch_recolors_orbitals_immediately() {
        let mut d = hall();
        let sentinel = d.orbital("sentinel_a").expect("sentinel");
        let before = d.orbital_position(sentinel, 10.0).expect("sample");
        d.set_threat_level(ThreatLevel::Danger).expect("switch");
        let after = d.orbital_position(sentinel, 10.0 + 1.0 / 60.0).expect("sample");
        assert_eq!(before.color, Vec3::new(0.3, 0.85, 1.0));
        assert_eq!(after.color, Vec3::new(1.0, 0.1, 0.08));
        assert_eq!(d.threat_level(), ThreatLevel::Danger);
    }

    #[test]
    fn test_threat_switch_applies_overrides_and_pace() {
        let mut d = hall();
        let column = d.material("obsidian_column").expect("column");
        let safe_speed = d.active_uniforms(column).expect("uniforms").get(names::SPEED).copied();
        d.set_threat_level(ThreatLevel::Danger).expect("switch");
        let uniforms = d.active_uniforms(column).expect("uniforms");
        assert_eq!(
            uniforms.get(names::GLOW_COLOR),
            Some(&UniformValue::Color(Vec3::new(1.0, 0.08, 0.05)))
        );
        assert_eq!(uniforms.get(names::GLOW_INTENSITY), Some(&UniformValue::Scalar(2.6)));
        let Some(UniformValue::Scalar(safe)) = safe_speed else {
            panic!("speed should be a scalar");
        };
        assert_eq!(uniforms.get(names::SPEED), Some(&UniformValue::Scalar(safe * 2.5)));

        let fountain = d.pool("fountain").expect("fountain");
        assert_eq!(d.particle_pool(fountain).expect("pool").pace(), 2.5);

        d.set_threat_level(ThreatLevel::Safe).expect("switch back");
        assert_eq!(
            d.active_uniforms(column).expect("uniforms").get(names::SPEED),
            Some(&UniformValue::Scalar(safe)),
            "returning to safe must not compound the pace"
        );
    }

    #[test]
    fn test_shade_through_district() {
        let d = hall();
        let portal = d.material("portal").expect("portal");
        let shade = d.shade(portal, &Fragment::facing(Vec2::splat(0.5)), 4.0).expect("shade");
        assert!((0.8..=1.0).contains(&shade.opacity));
        assert_eq!(d.program(portal).expect("program").archetype(), Archetype::PortalVortex);
    }

    #[test]
    fn test_foreign_handle_is_rejected() {
        let d = hall();
        let empty = District::from_manifest(&DistrictManifest {
            name: "empty".into(),
            seed: 0,
            threat: ThreatLevel::Safe,
            pace: sanctum_math::default_pace(),
            materials: Vec::new(),
            pools: Vec::new(),
            orbitals: Vec::new(),
        })
        .expect("empty district");
        let handle = d.material("glyph_path").expect("glyphs");
        assert!(matches!(
            empty.shade(handle, &Fragment::facing(Vec2::ZERO), 0.0),
            Err(SceneError::UnknownHandle { kind: "material", .. })
        ));
    }

    #[test]
    fn test_tick_particles_returns_buffers() {
        let mut d = hall();
        let fountain = d.pool("fountain").expect("fountain");
        let buffers = d.tick_particles(fountain, 1.0 / 60.0).expect("tick");
        assert_eq!(buffers.positions.len(), 600);
        assert_eq!(buffers.ages.len(), 600);
    }

    #[test]
    fn test_advance_moves_trails_to_sentinels() {
        let mut d = hall();
        let t = 2.5;
        d.advance(t, 1.0 / 60.0);
        for (sentinel, trail) in [("sentinel_a", "sentinel_a_trail"), ("sentinel_b", "sentinel_b_trail")] {
            let position = d
                .orbital_position(d.orbital(sentinel).expect("sentinel"), t)
                .expect("sample")
                .position;
            let pool = d.particle_pool(d.pool(trail).expect("trail")).expect("pool");
            assert_eq!(pool.origin(), position, "{trail} should sit on {sentinel}");
        }
    }

    #[test]
    fn test_advance_reports_clock_anomaly() {
        let mut d = hall();
        let report = d.advance(1.0, -0.5);
        assert!(report.clock_anomaly);
        assert_eq!(report.pools_ticked, 4);
        assert_eq!(report.recycled, 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut seq = hall();
        let mut par = hall();
        let dt = 1.0 / 30.0;
        for frame in 0..90 {
            let t = f64::from(frame) * f64::from(dt);
            let a = seq.advance(t, dt);
            let b = par.advance_parallel(t, dt, 3);
            assert_eq!(a, b, "frame {frame} reports differ");
        }
        for (handle, name) in seq.pools() {
            let other = par.pool(name).expect("same pools");
            assert_eq!(
                seq.particle_pool(handle).expect("pool").positions(),
                par.particle_pool(other).expect("pool").positions(),
                "pool {name} diverged"
            );
        }
    }

    #[test]
    fn test_pool_seed_depends_on_name_not_order() {
        assert_eq!(derive_pool_seed(7, "fountain"), derive_pool_seed(7, "fountain"));
        assert_ne!(derive_pool_seed(7, "fountain"), derive_pool_seed(7, "motes"));
        assert_ne!(derive_pool_seed(7, "fountain"), derive_pool_seed(8, "fountain"));

        let mut reordered = DistrictManifest::ceremonial_hall();
        reordered.pools.reverse();
        let a = hall();
        let b = District::from_manifest(&reordered).expect("reordered loads");
        let ha = a.pool("fountain").expect("fountain");
        let hb = b.pool("fountain").expect("fountain");
        assert_ne!(ha, hb);
        assert_eq!(
            a.particle_pool(ha).expect("pool").positions(),
            b.particle_pool(hb).expect("pool").positions()
        );
    }

    #[test]
    fn test_minimal_manifest_with_follow() {
        let manifest = DistrictManifest {
            name: "grove".into(),
            seed: 1,
            threat: ThreatLevel::Warning,
            pace: sanctum_math::default_pace(),
            materials: Vec::new(),
            pools: vec![PoolEntry {
                name: "trail".into(),
                capacity: 10,
                policy: sanctum_particles::EmitterPolicy::drone_trail(0.1, 1.0),
                follow: Some("drone".into()),
            }],
            orbitals: vec![OrbitalEntry {
                name: "drone".into(),
                entity: OrbitalEntity::circular(Vec3::ZERO, 3.0, 1.0, 0.0, Vec3::ONE),
            }],
        };
        let mut d = District::from_manifest(&manifest).expect("grove loads");
        let trail = d.pool("trail").expect("trail");
        assert_eq!(d.particle_pool(trail).expect("pool").pace(), 1.6);
        d.advance(0.0, 0.1);
        assert_eq!(d.particle_pool(trail).expect("pool").origin(), Vec3::new(3.0, 0.0, 0.0));
    }
}
