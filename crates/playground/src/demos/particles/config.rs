//! All the variables that can be configured for the particle system

/// All the config for the particle system
#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
#[non_exhaustive]
pub struct Config {
    /// The chance, each frame, of a new ambient particle appearing
    pub spawn_probability: f32,
    /// How many particles a click creates
    pub burst_count: usize,
    /// The fastest a burst particle can move along either axis, in pixels per frame
    pub burst_speed: f32,
    /// How many frames a burst particle lives for
    pub burst_life: u32,
    /// The range of frames an ambient particle lives for
    pub ambient_life: (u32, u32),
    /// The range of horizontal drift of ambient particles
    pub ambient_drift: (f32, f32),
    /// The range of vertical velocity of ambient particles. Negative is upwards.
    pub ambient_rise: (f32, f32),
    /// The range of particle radii
    pub radius: (f32, f32),
    /// The maximum number of particles in the system. The oldest are evicted first.
    pub max_particles: usize,
    /// How close the pointer needs to be to pull on a particle
    pub attraction_radius: f32,
    /// How hard the pointer pulls
    pub attraction_force: f32,
    /// Velocity damping whilst a particle is being pulled
    pub friction: f32,
    /// Downward acceleration, in pixels per frame per frame
    pub gravity: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spawn_probability: 0.3,
            burst_count: 20,
            burst_speed: 5.0,
            burst_life: 100,
            ambient_life: (150, 250),
            ambient_drift: (-1.0, 1.0),
            ambient_rise: (-3.0, -1.0),
            radius: (2.0, 6.0),
            max_particles: 2000,
            attraction_radius: 100.0,
            attraction_force: 0.1,
            friction: 0.98,
            gravity: 0.1,
        }
    }
}
