//! Fixed-timestep frame clock.
//!
//! Decouples simulation steps (fixed `dt`) from however often the host gets
//! around to calling us, using an accumulator. Long stalls are clamped so a
//! slow frame costs a slowdown instead of a burst of catch-up steps.

use std::time::Instant;

use tracing::warn;

/// Simulation step used when none is configured: 60 Hz.
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// Frame time clamp used when none is configured.
pub const DEFAULT_MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator-driven fixed-step clock.
///
/// [`advance`](Self::advance) takes an explicit frame time;
/// [`tick`](Self::tick) measures it from the wall clock.
pub struct FrameClock {
    dt: f64,
    max_frame_time: f64,
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    step_count: u64,
}

impl FrameClock {
    /// `max_frame_time` is raised to `dt` if smaller.
    pub fn new(dt: f64, max_frame_time: f64) -> Self {
        Self {
            dt,
            max_frame_time: max_frame_time.max(dt),
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Measure the wall time since the previous call and run the steps it
    /// covers. Returns the number of steps run.
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64)) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time, update_fn)
    }

    /// Add `frame_time` seconds and call `update_fn(dt, sim_time)` once per
    /// whole step accumulated. Returns the number of steps run.
    pub fn advance(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> u32 {
        let mut frame_time = if frame_time.is_finite() { frame_time.max(0.0) } else { 0.0 };
        if frame_time > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                self.max_frame_time * 1000.0
            );
            frame_time = self.max_frame_time;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.dt {
            update_fn(self.dt, self.total_sim_time);
            self.total_sim_time += self.dt;
            self.accumulator -= self.dt;
            self.step_count += 1;
            steps += 1;
        }

        self.frame_count += 1;
        steps
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 { self.accumulator / self.dt } else { 0.0 }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of `advance`/`tick` calls.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of simulation steps executed.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Total simulated time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_DT, DEFAULT_MAX_FRAME_TIME)
    }
}
