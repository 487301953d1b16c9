//! A single ball and how it behaves against the walls

use glam::Vec2;

use crate::colours::Colour;
use crate::maths::contain;

/// A stable identity, so that a ball can be found again across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[expect(
    clippy::exhaustive_structs,
    reason = "It's just a newtype around a counter"
)]
pub struct BallId(pub u64);

/// `Ball`
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Ball {
    /// Never reused within a world
    pub id: BallId,
    /// Centre
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    /// Always positive
    pub radius: f32,
    /// Drawn colour
    pub colour: Colour,
    /// Always positive
    pub mass: f32,
}

impl Ball {
    /// Instantiate
    #[must_use]
    pub const fn new(
        id: BallId,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        colour: Colour,
        mass: f32,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            radius,
            colour,
            mass,
        }
    }

    /// Fall, then move.
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity.y += gravity;
        self.position += self.velocity;
    }

    /// Reflect off any wall the ball has crossed, losing some speed, and put it back inside.
    /// Each axis is handled independently.
    pub fn bounce_off_walls(&mut self, width: f32, height: f32, restitution: f32) {
        if self.position.x - self.radius < 0.0 || self.position.x + self.radius > width {
            self.velocity.x *= -restitution;
            self.position.x = contain(self.position.x, self.radius, width);
        }

        if self.position.y - self.radius < 0.0 || self.position.y + self.radius > height {
            self.velocity.y *= -restitution;
            self.position.y = contain(self.position.y, self.radius, height);
        }
    }

    /// Put the ball fully inside the walls without touching its velocity.
    pub fn contain(&mut self, width: f32, height: f32) {
        self.position.x = contain(self.position.x, self.radius, width);
        self.position.y = contain(self.position.y, self.radius, height);
    }
}
