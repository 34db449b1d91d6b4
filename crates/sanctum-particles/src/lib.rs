//! Fixed-capacity CPU particle pools with in-place recycling.
//!
//! A [`ParticlePool`] owns struct-of-arrays buffers that are allocated once and
//! never resized. Each [`tick`](ParticlePool::tick) integrates every particle
//! and then recycles, in place, any particle that outlived its lifetime, left
//! its [`RecycleBounds`], or degenerated to non-finite values. Spawning draws
//! from an injectable seeded random stream, so equal seeds and equal `dt`
//! sequences reproduce bit-identical buffers.

mod emitter;
mod error;
mod pool;

pub use emitter::{EmitterPolicy, RecycleBounds, SpawnRegion, VelocityDistribution};
pub use error::ParticleError;
pub use pool::{MAX_POOL_CAPACITY, ParticleBuffers, ParticlePool, PoolStats, TickReport};
