//! Particle state and numeric integration.

use rand::Rng;
use std::f32::consts::TAU;

/// Particles spawned per burst.
pub const BURST_SIZE: usize = 150;

/// Downward acceleration applied to `vy` every tick.
pub const GRAVITY: f32 = 0.12;

/// Opacity removed every tick; bounds the burst lifetime.
pub const OPACITY_DECAY: f32 = 0.006;

/// Fixed celebration palette.
pub const PALETTE: [&str; 7] = [
    "#f94144", "#f3722c", "#f8961e", "#f9c74f", "#90be6d", "#43aa8b", "#577590",
];

const SPAWN_BAND_PX: f32 = 40.0;
const MIN_SIZE: f32 = 4.0;
const MAX_SIZE: f32 = 12.0;
const MAX_DRIFT: f32 = 2.0;
const MIN_FALL: f32 = 1.0;
const MAX_FALL: f32 = 4.0;
const MAX_SPIN: f32 = 0.1;

/// Drawing surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Drawable primitive of one particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleShape {
    Circle,
    Square,
    Triangle,
}

/// Ephemeral simulation entity; no identity beyond set membership.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub color: &'static str,
    pub shape: ParticleShape,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub opacity: f32,
}

impl Particle {
    /// Spawns one particle slightly above the top edge with randomized
    /// kinematics and full opacity.
    pub fn spawn(viewport: Viewport, rng: &mut impl Rng) -> Self {
        let shape = match rng.random_range(0..3u8) {
            0 => ParticleShape::Circle,
            1 => ParticleShape::Square,
            _ => ParticleShape::Triangle,
        };
        Self {
            x: rng.random_range(0.0..viewport.width.max(1.0)),
            y: rng.random_range(-SPAWN_BAND_PX..0.0),
            vx: rng.random_range(-MAX_DRIFT..MAX_DRIFT),
            vy: rng.random_range(MIN_FALL..MAX_FALL),
            size: rng.random_range(MIN_SIZE..MAX_SIZE),
            color: PALETTE[rng.random_range(0..PALETTE.len())],
            shape,
            rotation: rng.random_range(0.0..TAU),
            rotation_speed: rng.random_range(-MAX_SPIN..MAX_SPIN),
            opacity: 1.0,
        }
    }

    /// Advances one tick: velocity integration, gravity, fade, spin.
    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.rotation += self.rotation_speed;
        self.opacity -= OPACITY_DECAY;
    }

    /// Whether this particle leaves the active set.
    pub fn is_expired(&self, viewport: Viewport) -> bool {
        self.opacity <= 0.0 || self.y > viewport.height
    }
}
