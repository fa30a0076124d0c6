//! End-of-round explosion
//!
//! Driven by the display's frame callback, independent of the tick timer.

use glam::{IVec2, Vec2};
use rand::Rng;

use crate::Rgba;

/// Largest particle speed component, in grid cells per frame
const PARTICLE_SPEED: f32 = 1.0;

/// A spark flying out of the crash site
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Grid units
    pub pos: Vec2,
    /// Grid units per frame
    pub vel: Vec2,
    /// Pixels
    pub radius: f32,
    /// 1 at spawn, dead at 0
    pub life: f32,
    /// Life lost per frame
    pub decay: f32,
}

impl Particle {
    pub fn spawn(center: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos: center,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * PARTICLE_SPEED,
                (rng.random::<f32>() - 0.5) * PARTICLE_SPEED,
            ),
            radius: rng.random::<f32>() * 3.0 + 2.0,
            life: 1.0,
            decay: rng.random::<f32>() * 0.02 + 0.02,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// A trail cell captured when the round ended, faded out in lockstep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadingCell {
    pub cell: IVec2,
    pub color: Rgba,
    /// Opacity the cell had when captured
    pub base_opacity: f32,
}

/// State of one animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionFrame {
    /// Milliseconds since the first frame
    pub progress_ms: f64,
    /// Multiplier applied to every captured trail cell
    pub trail_opacity: f32,
    pub finished: bool,
}

/// Time-bounded particle burst plus trail fade-out
#[derive(Debug, Clone)]
pub struct Explosion {
    pub particles: Vec<Particle>,
    pub color: Rgba,
    pub cells: Vec<FadingCell>,
    pub duration_ms: f64,
    started_at_ms: Option<f64>,
    last_frame: Option<ExplosionFrame>,
}

impl Explosion {
    pub fn new(
        center: Vec2,
        color: Rgba,
        count: usize,
        cells: Vec<FadingCell>,
        duration_ms: f64,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::spawn(center, rng)).collect(),
            color,
            cells,
            duration_ms,
            started_at_ms: None,
            last_frame: None,
        }
    }

    /// Advance one display frame. The first call fixes the start time.
    pub fn advance(&mut self, timestamp_ms: f64) -> ExplosionFrame {
        let start = *self.started_at_ms.get_or_insert(timestamp_ms);
        let progress_ms = (timestamp_ms - start).max(0.0);

        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.is_dead());

        let frame = ExplosionFrame {
            progress_ms,
            trail_opacity: (1.0 - progress_ms / self.duration_ms).max(0.0) as f32,
            finished: progress_ms >= self.duration_ms,
        };
        self.last_frame = Some(frame);
        frame
    }

    /// Most recent frame, `None` before the first one
    pub fn last_frame(&self) -> Option<ExplosionFrame> {
        self.last_frame
    }
}
