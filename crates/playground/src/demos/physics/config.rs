//! All the variables that can be configured for the ball physics

/// All the config for the ball physics
#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
#[non_exhaustive]
pub struct Config {
    /// How many balls are dropped in when the demo starts
    pub initial_balls: usize,
    /// Downward acceleration, in pixels per frame per frame
    pub gravity: f32,
    /// How much of a ball's speed is kept after a bounce. 0.0 to 1.0.
    pub restitution: f32,
    /// The range of ball radii
    pub radius: (f32, f32),
    /// The fastest a new ball can move along either axis, in pixels per frame
    pub initial_speed: f32,
    /// Mass per pixel of radius
    pub density: f32,
    /// Whether balls get a soft glow
    pub glow: bool,
    /// The width of the glow
    pub glow_width: f32,
    /// Whether balls get a little specular highlight
    pub highlight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_balls: 8,
            gravity: 0.5,
            restitution: 0.8,
            radius: (10.0, 25.0),
            initial_speed: 5.0,
            density: 0.1,
            glow: false,
            glow_width: 8.0,
            highlight: true,
        }
    }
}
