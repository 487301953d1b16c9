//! The box of bouncing balls

use glam::Vec2;
use rand::Rng as _;

use super::ball::{Ball, BallId};
use super::config::Config;
use crate::utils::{between, SimulationRng};

/// The runtime-tunable parameters, normally driven by sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
#[expect(
    clippy::exhaustive_structs,
    reason = "New tunables should be a breaking change"
)]
pub struct Parameters {
    /// Downward acceleration. Negative values are accepted and make balls fall upwards.
    pub gravity: f32,
    /// The fraction of normal velocity kept after any collision.
    pub restitution: f32,
}

/// `World`
#[non_exhaustive]
pub struct World {
    /// Width of the box
    pub width: f32,
    /// Height of the box
    pub height: f32,
    /// The current slider values
    pub parameters: Parameters,
    /// All the balls, in the order they were added
    pub balls: Vec<Ball>,
    /// The tunables
    pub config: Config,
    /// The next ball's identity
    next_id: u64,
    /// Source of all the randomness
    rng: SimulationRng,
}

impl World {
    /// Initialise an empty world
    #[must_use]
    pub fn new(config: Config, rng: SimulationRng, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            parameters: Parameters {
                gravity: config.gravity,
                restitution: config.restitution,
            },
            balls: Vec::new(),
            config,
            next_id: 0,
            rng,
        }
    }

    /// Add a ball with a random size and velocity.
    pub fn add_ball(&mut self, x: f32, y: f32) -> BallId {
        let id = BallId(self.next_id);
        self.next_id += 1;

        let speed = self.config.initial_speed.abs();
        let radius = between(&mut self.rng, self.config.radius).max(f32::EPSILON);
        let velocity = Vec2::new(
            between(&mut self.rng, (-speed, speed)),
            between(&mut self.rng, (-speed, speed)),
        );
        let mass = (radius * self.config.density).max(f32::EPSILON);
        let colour = crate::colours::random(&mut self.rng);

        self.balls.push(Ball::new(
            id,
            Vec2::new(x, y),
            velocity,
            radius,
            colour,
            mass,
        ));
        tracing::trace!("Added ball {id:?} at ({x}, {y})");
        id
    }

    /// Drop the given number of balls in at random positions.
    pub fn seed(&mut self, count: usize) {
        for _ in 0..count {
            let x = self.rng.gen::<f32>() * self.width;
            let y = self.rng.gen::<f32>() * self.height;
            self.add_ball(x, y);
        }
    }

    /// Find a ball by its identity.
    #[must_use]
    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|ball| ball.id == id)
    }

    /// Remove every ball.
    pub fn clear(&mut self) {
        self.balls.clear();
    }

    /// Set the gravity slider.
    pub const fn set_gravity(&mut self, gravity: f32) {
        self.parameters.gravity = gravity;
    }

    /// Set the bounciness slider.
    pub const fn set_restitution(&mut self, restitution: f32) {
        self.parameters.restitution = restitution;
    }

    /// Follow the container's size.
    pub const fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Advance the world by one frame using the current parameters.
    pub fn step(&mut self) {
        self.step_with(self.parameters);
    }

    /// Advance the world by one frame.
    ///
    /// Each ball, in order, falls, moves, and bounces off the walls, then resolves collisions
    /// against every ball after it. Balls are updated in place, so a later pair sees the result
    /// of an earlier one: resolving `(i, j)` before `(i, k)` is not the same as the other way
    /// round.
    pub fn step_with(&mut self, parameters: Parameters) {
        let count = self.balls.len();
        for index in 0..count {
            let Some((ball, others)) = self
                .balls
                .get_mut(index..)
                .and_then(<[Ball]>::split_first_mut)
            else {
                continue;
            };

            ball.integrate(parameters.gravity);
            ball.bounce_off_walls(self.width, self.height, parameters.restitution);
            for other in others {
                super::collision::resolve(ball, other, parameters.restitution);
            }
        }

        // Separating a pair can push a ball back through a wall.
        for ball in &mut self.balls {
            ball.contain(self.width, self.height);
        }
    }
}
