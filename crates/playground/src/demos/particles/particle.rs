//! A single short-lived particle

use glam::Vec2;

use crate::colours::Colour;

/// `Particle`
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Particle {
    /// Where it is
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    /// Drawn size
    pub radius: f32,
    /// Drawn colour
    pub colour: Colour,
    /// Frames left to live
    pub life: u32,
    /// The life it was born with
    pub max_life: u32,
}

impl Particle {
    /// Instantiate
    #[must_use]
    pub const fn new(
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        colour: Colour,
        life: u32,
    ) -> Self {
        Self {
            position,
            velocity,
            radius,
            colour,
            life,
            max_life: life,
        }
    }

    /// Particles fade out as they age.
    #[must_use]
    #[expect(
        clippy::as_conversions,
        clippy::cast_precision_loss,
        reason = "Lifetimes are a few hundred frames at most"
    )]
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    /// Whether the particle still has any life left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Move along the current velocity, then fall.
    pub fn integrate(&mut self, gravity: f32) {
        self.position += self.velocity;
        self.velocity.y += gravity;
    }

    /// Get pulled towards the pointer, if it's close enough. Returns whether there was any pull.
    pub fn attract(&mut self, pointer: Vec2, radius: f32, force: f32, friction: f32) -> bool {
        let delta = pointer - self.position;
        let distance = delta.length();
        if distance >= radius || distance <= 0.0 {
            return false;
        }

        let strength = (radius - distance) / radius;
        self.velocity += delta / distance * strength * force;
        self.velocity *= friction;
        true
    }

    /// One frame older.
    pub const fn age(&mut self) {
        self.life = self.life.saturating_sub(1);
    }
}
