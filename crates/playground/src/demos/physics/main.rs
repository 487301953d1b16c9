//! Balls fall, bounce off the walls and knock into each other. Clicking drops in a new ball.

use glam::Vec2;

use super::{config::Config, world::World};
use crate::input::Input;
use crate::surface::{Circle, Surface};

/// How far the highlight sits from the centre, and how big it is, as a fraction of the radius.
const HIGHLIGHT_SCALE: f32 = 0.3;

/// How opaque the highlight is.
const HIGHLIGHT_ALPHA: f32 = 0.3;

/// `PhysicsDemo`
pub struct PhysicsDemo {
    /// The box of balls
    pub world: World,
}

impl PhysicsDemo {
    /// Instantiate, dropping in the configured number of balls.
    #[must_use]
    pub fn new(config: Config, rng: crate::utils::SimulationRng, width: f32, height: f32) -> Self {
        let initial_balls = config.initial_balls;
        let mut world = World::new(config, rng, width, height);
        world.seed(initial_balls);
        tracing::debug!("Physics demo started with {initial_balls} balls");
        Self { world }
    }

    /// The circles that make up one ball.
    fn circles(&self, ball: &super::ball::Ball) -> Vec<Circle> {
        let config = &self.world.config;
        let mut body = Circle::new(ball.position, ball.radius, ball.colour);
        if config.glow {
            body = body.with_glow(config.glow_width);
        }

        let mut circles = vec![body];
        if config.highlight {
            let offset = ball.radius * HIGHLIGHT_SCALE;
            circles.push(
                Circle::new(
                    ball.position - Vec2::splat(offset),
                    offset,
                    crate::colours::WHITE,
                )
                .with_alpha(HIGHLIGHT_ALPHA),
            );
        }
        circles
    }
}

impl crate::demos::index::Demo for PhysicsDemo {
    fn id(&self) -> &'static str {
        "physics"
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
    }

    fn handle_input(&mut self, input: &Input) {
        #[expect(
            clippy::wildcard_enum_match_arm,
            reason = "Balls don't follow the pointer"
        )]
        match *input {
            Input::Click { x, y } => {
                self.world.add_ball(x, y);
            }
            Input::Clear => self.world.clear(),
            Input::Gravity(gravity) => self.world.set_gravity(gravity),
            Input::Restitution(restitution) => self.world.set_restitution(restitution),
            _ => (),
        }
    }

    fn step(&mut self) {
        self.world.step();
    }

    fn draw(&self, surface: &mut Surface) {
        for ball in &self.world.balls {
            for circle in self.circles(ball) {
                surface.fill_circle(&circle);
            }
        }
    }

    fn population(&self) -> usize {
        self.world.balls.len()
    }

    fn positions(&self) -> Vec<Vec2> {
        self.world.balls.iter().map(|ball| ball.position).collect()
    }
}
