//! Map all demos to CLI-callable strings

use color_eyre::eyre::Result;
use glam::Vec2;

use crate::config::main::Config;
use crate::input::Input;
use crate::surface::Surface;

use super::{particles::main::ParticlesDemo, physics::main::PhysicsDemo};

/// The names of all the demos, as used on the CLI.
pub const DEMOS: [&str; 2] = ["particles", "physics"];

/// The trait that all demos must follow
pub trait Demo {
    /// The demo's CLI name
    fn id(&self) -> &'static str;

    /// Tell the demo that its container has changed size.
    fn resize(&mut self, width: f32, height: f32);

    /// React to a user event. Events that mean nothing to the demo are ignored.
    fn handle_input(&mut self, input: &Input);

    /// Advance the simulation by one frame.
    fn step(&mut self);

    /// Draw the current state. The surface has already been cleared.
    fn draw(&self, surface: &mut Surface);

    /// How many bodies are currently alive.
    fn population(&self) -> usize;

    /// The centre of every body, mostly useful for observing the simulation from outside.
    fn positions(&self) -> Vec<Vec2>;
}

/// How to map from a CLI arg to a demo implementation
pub fn create_instance(
    demo: &str,
    config: &Config,
    width: f32,
    height: f32,
) -> Result<Box<dyn Demo>> {
    let rng = crate::utils::make_rng(config.seed);
    match demo {
        "particles" => Ok(Box::new(ParticlesDemo::new(
            config.particles.clone(),
            rng,
            width,
            height,
        ))),
        "physics" => Ok(Box::new(PhysicsDemo::new(
            config.physics.clone(),
            rng,
            width,
            height,
        ))),
        _ => Err(color_eyre::eyre::eyre!(
            "The demo, `{demo}` was not found. Try one of: {}",
            DEMOS.join(", ")
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_demo_can_be_created() {
        for name in DEMOS {
            let demo = create_instance(name, &Config::default(), 100.0, 100.0).unwrap();
            assert_eq!(demo.id(), name);
        }
    }

    #[test]
    fn unknown_demo() {
        let result = create_instance("fireworks", &Config::default(), 100.0, 100.0);
        assert!(result.is_err());
    }
}
