//! Spawning, moving and ageing all the particles

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng as _;

use super::{config::Config, particle::Particle};
use crate::maths::Bounds;
use crate::utils::{between, between_inclusive, is_random_trigger, SimulationRng};

/// `ParticleSystem`
#[non_exhaustive]
pub struct ParticleSystem {
    /// The tunables
    pub config: Config,
    /// All the live particles, oldest first. Never grows beyond `config.max_particles`.
    pub particles: VecDeque<Particle>,
    /// Every particle ever created, including those that have since expired
    pub spawned: u64,
    /// Source of all the randomness
    rng: SimulationRng,
}

impl ParticleSystem {
    /// Initialise a new, empty, system
    #[must_use]
    pub fn new(config: Config, rng: SimulationRng) -> Self {
        let capacity = config.max_particles;
        Self {
            config,
            particles: VecDeque::with_capacity(capacity),
            spawned: 0,
            rng,
        }
    }

    /// Maybe add a single rising ember somewhere within the bounds. Returns whether one was
    /// added.
    pub fn spawn_ambient(&mut self, bounds: &Bounds) -> bool {
        if !is_random_trigger(&mut self.rng, self.config.spawn_probability) {
            return false;
        }

        let position = bounds.min
            + Vec2::new(
                self.rng.gen::<f32>() * bounds.width(),
                self.rng.gen::<f32>() * bounds.height(),
            );
        let velocity = Vec2::new(
            between(&mut self.rng, self.config.ambient_drift),
            between(&mut self.rng, self.config.ambient_rise),
        );
        let life = between_inclusive(&mut self.rng, self.config.ambient_life);
        self.add_particle(position, velocity, life);
        true
    }

    /// An explosion of particles all starting from the same point.
    pub fn spawn_burst(&mut self, position: Vec2, count: usize) {
        let speed = self.config.burst_speed.abs();
        for _ in 0..count {
            let velocity = Vec2::new(
                between(&mut self.rng, (-speed, speed)),
                between(&mut self.rng, (-speed, speed)),
            );
            self.add_particle(position, velocity, self.config.burst_life);
        }
        tracing::trace!("Burst of {count} particles at {position}");
    }

    /// Add a particle, evicting the oldest one if the system is full.
    fn add_particle(&mut self, position: Vec2, velocity: Vec2, life: u32) {
        if self.config.max_particles == 0 {
            return;
        }
        while self.particles.len() >= self.config.max_particles {
            self.particles.pop_front();
        }

        let radius = between(&mut self.rng, self.config.radius);
        let colour = crate::colours::random(&mut self.rng);
        self.particles
            .push_back(Particle::new(position, velocity, radius, colour, life));
        self.spawned += 1;
    }

    /// Advance every particle by one frame and remove the ones that have expired.
    pub fn step(&mut self, maybe_pointer: Option<Vec2>) {
        let config = &self.config;
        for particle in &mut self.particles {
            particle.integrate(config.gravity);
            if let Some(pointer) = maybe_pointer {
                particle.attract(
                    pointer,
                    config.attraction_radius,
                    config.attraction_force,
                    config.friction,
                );
            }
            particle.age();
        }

        self.particles.retain(Particle::is_alive);
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
