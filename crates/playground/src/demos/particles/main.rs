//! Embers drift up the screen, clicks make explosions and the pointer pulls particles in.

use glam::Vec2;

use super::{config::Config, simulation::ParticleSystem};
use crate::input::Input;
use crate::maths::Bounds;
use crate::surface::{Circle, Surface};

/// `ParticlesDemo`
pub struct ParticlesDemo {
    /// All the particles
    pub system: ParticleSystem,
    /// The last known pointer position. Nothing is attracted until the pointer has moved.
    pointer: Option<Vec2>,
    /// Where ambient particles can appear
    bounds: Bounds,
}

impl ParticlesDemo {
    /// Instantiate
    #[must_use]
    pub fn new(config: Config, rng: crate::utils::SimulationRng, width: f32, height: f32) -> Self {
        Self {
            system: ParticleSystem::new(config, rng),
            pointer: None,
            bounds: Bounds::from_size(width, height),
        }
    }
}

impl crate::demos::index::Demo for ParticlesDemo {
    fn id(&self) -> &'static str {
        "particles"
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::from_size(width, height);
    }

    fn handle_input(&mut self, input: &Input) {
        #[expect(
            clippy::wildcard_enum_match_arm,
            reason = "The sliders don't affect particles"
        )]
        match *input {
            Input::PointerMove { x, y } => self.pointer = Some(Vec2::new(x, y)),
            Input::Click { x, y } => {
                let count = self.system.config.burst_count;
                self.system.spawn_burst(Vec2::new(x, y), count);
            }
            Input::Clear => self.system.clear(),
            _ => (),
        }
    }

    fn step(&mut self) {
        self.system.step(self.pointer);
        self.system.spawn_ambient(&self.bounds);
    }

    fn draw(&self, surface: &mut Surface) {
        for particle in &self.system.particles {
            surface.fill_circle(
                &Circle::new(particle.position, particle.radius, particle.colour)
                    .with_alpha(particle.alpha()),
            );
        }
    }

    fn population(&self) -> usize {
        self.system.particles.len()
    }

    fn positions(&self) -> Vec<Vec2> {
        self.system
            .particles
            .iter()
            .map(|particle| particle.position)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::demos::index::Demo as _;

    fn demo() -> ParticlesDemo {
        let config = Config {
            spawn_probability: 0.0,
            ..Config::default()
        };
        ParticlesDemo::new(config, crate::utils::make_rng(Some(3)), 200.0, 200.0)
    }

    #[test]
    fn click_makes_an_explosion() {
        let mut demo = demo();
        demo.handle_input(&Input::Click { x: 50.0, y: 60.0 });
        assert_eq!(demo.population(), 20);
        assert!(demo
            .positions()
            .iter()
            .all(|position| *position == Vec2::new(50.0, 60.0)));
    }

    #[test]
    fn clear_removes_everything() {
        let mut demo = demo();
        demo.handle_input(&Input::Click { x: 50.0, y: 60.0 });
        demo.handle_input(&Input::Clear);
        assert_eq!(demo.population(), 0);
    }

    #[test]
    fn draws_particles() {
        let mut demo = demo();
        demo.handle_input(&Input::Click { x: 20.0, y: 20.0 });
        let mut surface = Surface::new(40.0, 40.0, 1.0).unwrap();
        demo.draw(&mut surface);
        assert!(surface.pixel(20, 20).unwrap().alpha > 0);
    }
}
