//! Ephemeral cosmetic effects - chop particles and floating credit text
//!
//! These carry no decision logic: spawned by simulation phases, read by
//! the renderer, removed when their lifetime runs out.

use crate::core::types::Vec2;

/// A short-lived particle thrown off a chopped trunk
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub lifetime: f32,
}

/// Rising text for credit/pickup feedback ("+15")
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub position: Vec2,
    pub text: String,
    pub lifetime: f32,
}

const PARTICLE_LIFETIME: f32 = 0.6;
const TEXT_LIFETIME: f32 = 1.2;
const TEXT_RISE_SPEED: f32 = 28.0;

/// Pool of live effects, decayed once per tick
#[derive(Debug, Default)]
pub struct EffectPool {
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
}

impl EffectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Burst of chips at a chop impact
    pub fn spawn_chop_burst(&mut self, position: Vec2) {
        // fixed fan of four; cosmetic, so no rng needed
        for (dx, dy) in [(-30.0, -40.0), (-12.0, -55.0), (12.0, -55.0), (30.0, -40.0)] {
            self.particles.push(Particle {
                position,
                velocity: Vec2::new(dx, dy),
                lifetime: PARTICLE_LIFETIME,
            });
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.texts.clear();
    }

    pub fn spawn_text(&mut self, position: Vec2, text: String) {
        self.texts.push(FloatingText {
            position,
            text,
            lifetime: TEXT_LIFETIME,
        });
    }

    /// Integrate and expire
    pub fn tick(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.position += p.velocity * dt;
            p.lifetime -= dt;
        }
        self.particles.retain(|p| p.lifetime > 0.0);

        for t in &mut self.texts {
            t.position.y -= TEXT_RISE_SPEED * dt;
            t.lifetime -= dt;
        }
        self.texts.retain(|t| t.lifetime > 0.0);
    }
}
