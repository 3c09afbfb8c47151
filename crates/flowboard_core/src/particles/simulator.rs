//! Burst lifecycle, frame scheduling and shape rendering.
//!
//! # Responsibility
//! - Run one burst from activation to exhaustion or forced halt.
//! - Re-request frames only while particles remain, checking cancellation
//!   before each re-submission.
//!
//! # Invariants
//! - At most one frame request is pending at any time.
//! - `halt()` cancels the pending request synchronously; a halted simulator
//!   never schedules again until the next burst.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::particles::particle::{Particle, ParticleShape, Viewport, BURST_SIZE};

/// Host-issued handle for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(pub u64);

/// Per-frame scheduling primitive of the rendering surface collaborator.
pub trait FrameScheduler {
    /// Schedules one future `on_frame` callback.
    fn request_frame(&mut self) -> FrameRequest;

    /// Revokes a not-yet-delivered callback.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// 2D drawing primitives of the rendering surface collaborator.
///
/// All coordinates are in viewport pixels; `opacity` is 0..=1.
pub trait RenderSurface {
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, opacity: f32);
    fn fill_square(&mut self, x: f32, y: f32, size: f32, rotation: f32, color: &str, opacity: f32);
    fn fill_triangle(
        &mut self,
        x: f32,
        y: f32,
        size: f32,
        rotation: f32,
        color: &str,
        opacity: f32,
    );
}

/// Celebration switch the board controller flips on terminal transitions.
pub trait CelebrationDriver {
    /// Starts a burst, displacing any burst still running.
    fn activate(&mut self);

    /// Force-stops the current burst regardless of remaining particles.
    fn deactivate(&mut self);
}

/// One-shot, fixed-population burst simulator.
pub struct ParticleSimulator<S: FrameScheduler> {
    scheduler: S,
    viewport: Viewport,
    rng: StdRng,
    particles: Vec<Particle>,
    pending: Option<FrameRequest>,
    active: bool,
}

impl<S: FrameScheduler> ParticleSimulator<S> {
    pub fn new(scheduler: S, viewport: Viewport) -> Self {
        Self::with_rng(scheduler, viewport, StdRng::from_os_rng())
    }

    /// Deterministic construction for reproducible runs.
    pub fn with_seed(scheduler: S, viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(scheduler, viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(scheduler: S, viewport: Viewport, rng: StdRng) -> Self {
        Self {
            scheduler,
            viewport,
            rng,
            particles: Vec::new(),
            pending: None,
            active: false,
        }
    }

    /// Spawns a fresh burst, displacing any particles still alive.
    pub fn begin_burst(&mut self) {
        self.cancel_pending();
        self.particles = (0..BURST_SIZE)
            .map(|_| Particle::spawn(self.viewport, &mut self.rng))
            .collect();
        self.active = true;
        info!(
            "event=burst_started module=particles status=ok count={}",
            self.particles.len()
        );
        self.schedule_next();
    }

    /// Frame callback: advances every particle one tick and prunes the
    /// expired, then re-schedules while work remains.
    pub fn on_frame(&mut self) {
        self.pending = None;
        if !self.active {
            return;
        }
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.step();
        }
        self.particles.retain(|particle| !particle.is_expired(viewport));

        if self.particles.is_empty() {
            self.active = false;
            debug!("event=burst_exhausted module=particles status=ok");
        } else {
            self.schedule_next();
        }
    }

    /// Draws the active set; the shape tag is resolved by this single match.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.clear();
        for particle in &self.particles {
            match particle.shape {
                ParticleShape::Circle => surface.fill_circle(
                    particle.x,
                    particle.y,
                    particle.size / 2.0,
                    particle.color,
                    particle.opacity,
                ),
                ParticleShape::Square => surface.fill_square(
                    particle.x,
                    particle.y,
                    particle.size,
                    particle.rotation,
                    particle.color,
                    particle.opacity,
                ),
                ParticleShape::Triangle => surface.fill_triangle(
                    particle.x,
                    particle.y,
                    particle.size,
                    particle.rotation,
                    particle.color,
                    particle.opacity,
                ),
            }
        }
    }

    /// Immediately stops the burst and releases the scheduling slot.
    ///
    /// Safe mid-burst: the cancellation happens before any further
    /// re-submission can occur.
    pub fn halt(&mut self) {
        self.active = false;
        self.cancel_pending();
        self.particles.clear();
        debug!("event=burst_halted module=particles status=ok");
    }

    /// Host-pushed viewport change; takes effect on the next expiry check.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Access to the host scheduler the simulator was built with.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn schedule_next(&mut self) {
        if self.active && !self.particles.is_empty() && self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
    }
}

impl<S: FrameScheduler> CelebrationDriver for ParticleSimulator<S> {
    fn activate(&mut self) {
        self.begin_burst();
    }

    fn deactivate(&mut self) {
        self.halt();
    }
}
