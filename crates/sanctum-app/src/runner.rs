//! Headless district runner.
//!
//! Steps a [`District`] on a fixed timestep, applies the configured threat
//! schedule and reports particle statistics through `tracing`.

use std::time::{Duration, Instant};

use sanctum_config::{Config, RuntimeConfig, SceneConfig};
use sanctum_math::ThreatLevel;
use sanctum_scene::{District, DistrictManifest, FrameReport};
use tracing::{debug, info};

use crate::error::AppError;
use crate::frame_loop::FrameClock;

/// Load the configured manifest (or the built-in hall) and apply the seed and
/// threat overrides.
pub fn load_district(scene: &SceneConfig) -> Result<District, AppError> {
    let mut manifest = match &scene.manifest {
        Some(path) => DistrictManifest::from_ron(path)?,
        None => DistrictManifest::ceremonial_hall(),
    };
    if let Some(seed) = scene.seed {
        manifest.seed = seed;
    }
    if let Some(threat) = scene.threat {
        manifest.threat = threat;
    }
    Ok(District::from_manifest(&manifest)?)
}

/// Worker count for parallel ticking; `0` means one per logical CPU.
pub fn resolve_workers(configured: usize) -> usize {
    if configured == 0 { num_cpus::get().max(1) } else { configured }
}

/// Totals over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub sim_time: f64,
    pub recycled: u64,
    pub degenerate: u64,
    pub clock_anomalies: u64,
    pub threat_changes: u32,
    pub final_threat: ThreatLevel,
    pub elapsed: Duration,
}

pub struct Runner {
    district: District,
    scene: SceneConfig,
    parallel: bool,
    workers: usize,
    stats_interval: u64,
    frame: u64,
    sim_time: f64,
    summary: RunSummary,
}

impl Runner {
    pub fn new(district: District, config: &Config) -> Self {
        let summary = RunSummary {
            final_threat: district.threat_level(),
            ..RunSummary::default()
        };
        Self {
            district,
            scene: config.scene.clone(),
            parallel: config.runtime.parallel_pools,
            workers: resolve_workers(config.runtime.workers),
            stats_interval: config.runtime.stats_interval,
            frame: 0,
            sim_time: 0.0,
            summary,
        }
    }

    pub fn district(&self) -> &District {
        &self.district
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Run one simulation step of `dt` seconds.
    pub fn step(&mut self, dt: f64) -> Result<FrameReport, AppError> {
        if let Some(level) = self.scene.scheduled_threat(self.frame)
            && level != self.district.threat_level()
        {
            self.district.set_threat_level(level)?;
            self.summary.threat_changes += 1;
            info!(frame = self.frame, threat = %level, "Threat level changed");
        }

        let report = if self.parallel {
            self.district.advance_parallel(self.sim_time, dt as f32, self.workers)
        } else {
            self.district.advance(self.sim_time, dt as f32)
        };

        self.frame += 1;
        self.sim_time += dt;
        self.summary.frames = self.frame;
        self.summary.sim_time = self.sim_time;
        self.summary.recycled += report.recycled as u64;
        self.summary.degenerate += report.degenerate as u64;
        self.summary.clock_anomalies += u64::from(report.clock_anomaly);
        self.summary.final_threat = self.district.threat_level();

        if self.stats_interval > 0 && self.frame % self.stats_interval == 0 {
            self.log_stats();
        }
        Ok(report)
    }

    /// Run `runtime.frame_count` steps, flat out or paced against the wall
    /// clock.
    pub fn run(&mut self, runtime: &RuntimeConfig) -> Result<RunSummary, AppError> {
        let target = self.frame + runtime.frame_count;
        let mut clock = FrameClock::new(runtime.fixed_dt, runtime.max_frame_time);
        let dt = clock.dt();
        let started = Instant::now();
        info!(
            district = self.district.name(),
            frames = runtime.frame_count,
            dt,
            parallel = self.parallel,
            workers = self.workers,
            "Starting headless run"
        );

        let mut failure = None;
        while self.frame < target && failure.is_none() {
            let mut step = |dt: f64, _sim_time: f64| {
                if self.frame < target
                    && failure.is_none()
                    && let Err(e) = self.step(dt)
                {
                    failure = Some(e);
                }
            };
            if runtime.realtime {
                clock.tick(&mut step);
                std::thread::sleep(Duration::from_secs_f64((1.0 - clock.alpha()) * dt));
            } else {
                clock.advance(dt, &mut step);
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        self.summary.elapsed += started.elapsed();
        self.log_stats();
        Ok(self.summary)
    }

    fn log_stats(&self) {
        let s = &self.summary;
        info!(
            frame = s.frames,
            sim_time = s.sim_time,
            recycled = s.recycled,
            degenerate = s.degenerate,
            clock_anomalies = s.clock_anomalies,
            threat = %s.final_threat,
            particles = self.district.particle_count(),
            "Frame stats"
        );
        for (handle, name) in self.district.orbitals() {
            if let Ok(sample) = self.district.orbital_position(handle, self.sim_time) {
                debug!(
                    orbital = name,
                    x = sample.position.x,
                    y = sample.position.y,
                    z = sample.position.z,
                    scale = sample.scale,
                    "Orbital sample"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sanctum_config::ThreatChange;
    use sanctum_scene::SceneError;

    use super::*;

    fn short_run(frames: u64) -> Config {
        let mut config = Config::default();
        config.runtime.frame_count = frames;
        config.runtime.stats_interval = 0;
        config
    }

    #[test]
    fn test_load_builtin_hall_with_overrides() {
        let scene = SceneConfig {
            threat: Some(ThreatLevel::Danger),
            seed: Some(12),
            ..SceneConfig::default()
        };
        let district = load_district(&scene).unwrap();
        assert_eq!(district.name(), "ceremonial_hall");
        assert_eq!(district.threat_level(), ThreatLevel::Danger);
    }

    #[test]
    fn test_load_manifest_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hall.ron");
        let mut manifest = DistrictManifest::ceremonial_hall();
        manifest.name = "saved_hall".into();
        manifest.save(&path).unwrap();

        let scene = SceneConfig {
            manifest: Some(path),
            ..SceneConfig::default()
        };
        assert_eq!(load_district(&scene).unwrap().name(), "saved_hall");
    }

    #[test]
    fn test_missing_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        let scene = SceneConfig {
            manifest: Some(dir.path().join("absent.ron")),
            ..SceneConfig::default()
        };
        assert!(matches!(load_district(&scene), Err(AppError::Scene(SceneError::Io(_)))));
    }

    #[test]
    fn test_run_steps_requested_frames() {
        let config = short_run(30);
        let mut runner = Runner::new(load_district(&config.scene).unwrap(), &config);
        let summary = runner.run(&config.runtime).unwrap();
        assert_eq!(summary.frames, 30);
        assert!((summary.sim_time - 0.5).abs() < 1e-9);
        assert_eq!(summary.clock_anomalies, 0);
        assert_eq!(summary.threat_changes, 0);
    }

    #[test]
    fn test_threat_schedule_applies() {
        let mut config = short_run(20);
        config.scene.threat_schedule = vec![
            ThreatChange {
                at_frame: 5,
                level: ThreatLevel::Warning,
            },
            ThreatChange {
                at_frame: 10,
                level: ThreatLevel::Danger,
            },
        ];
        let mut runner = Runner::new(load_district(&config.scene).unwrap(), &config);
        for _ in 0..7 {
            runner.step(config.runtime.fixed_dt).unwrap();
        }
        assert_eq!(runner.district().threat_level(), ThreatLevel::Warning);
        let summary = runner.run(&config.runtime).unwrap();
        assert_eq!(summary.final_threat, ThreatLevel::Danger);
        assert_eq!(summary.threat_changes, 2);
        assert_eq!(summary.frames, 27);
    }

    #[test]
    fn test_parallel_run_matches_sequential() {
        let config = short_run(120);
        let mut parallel_config = config.clone();
        parallel_config.runtime.parallel_pools = true;
        parallel_config.runtime.workers = 2;

        let mut sequential = Runner::new(load_district(&config.scene).unwrap(), &config);
        let mut parallel = Runner::new(load_district(&parallel_config.scene).unwrap(), &parallel_config);
        let a = sequential.run(&config.runtime).unwrap();
        let b = parallel.run(&parallel_config.runtime).unwrap();
        assert_eq!(a.recycled, b.recycled);
        assert_eq!(a.degenerate, b.degenerate);
        assert_eq!(a.frames, b.frames);
    }

    #[test]
    fn test_resolve_workers() {
        assert_eq!(resolve_workers(3), 3);
        assert!(resolve_workers(0) >= 1);
    }
}
