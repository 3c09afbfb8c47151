//! One-shot celebration burst simulation.
//!
//! # Responsibility
//! - Integrate per-frame particle physics for the completion celebration.
//! - Drive rendering and frame scheduling through host-provided traits.
//!
//! # Invariants
//! - Particle opacity strictly decreases each tick until removal.
//! - A halted simulator holds no pending frame request.

pub mod particle;
pub mod simulator;

pub use particle::{Particle, ParticleShape, Viewport, BURST_SIZE};
pub use simulator::{
    CelebrationDriver, FrameRequest, FrameScheduler, ParticleSimulator, RenderSurface,
};
