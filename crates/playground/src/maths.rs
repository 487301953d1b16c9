//! Small vector and scalar helpers shared by both simulations.

use glam::Vec2;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[expect(
    clippy::exhaustive_structs,
    reason = "A rectangle is only ever going to have 2 corners"
)]
pub struct Bounds {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Bounds {
    /// Bounds starting at the origin.
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    /// Width, never negative.
    #[must_use]
    pub fn width(&self) -> f32 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Height, never negative.
    #[must_use]
    pub fn height(&self) -> f32 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Whether the point is inside, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Distance between two points.
#[must_use]
pub fn distance(from: Vec2, to: Vec2) -> f32 {
    (to - from).length()
}

/// The angle, in radians, of the vector pointing from `from` to `to`.
#[must_use]
pub fn angle(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Normalise a vector, falling back to `fallback` when the vector has no length.
#[must_use]
pub fn normalise_or(vector: Vec2, fallback: Vec2) -> Vec2 {
    vector.try_normalize().unwrap_or(fallback)
}

/// Express `vector` in a frame whose x-axis is `normal`. The x component of the result is
/// the component along the normal, the y component is the tangential one.
#[must_use]
pub fn into_frame(vector: Vec2, normal: Vec2) -> Vec2 {
    Vec2::new(
        vector.x * normal.x + vector.y * normal.y,
        vector.y * normal.x - vector.x * normal.y,
    )
}

/// The inverse of [`into_frame`].
#[must_use]
pub fn from_frame(vector: Vec2, normal: Vec2) -> Vec2 {
    Vec2::new(
        vector.x * normal.x - vector.y * normal.y,
        vector.y * normal.x + vector.x * normal.y,
    )
}

/// Keep the centre of a circle of `radius` within `0..extent` so that the whole circle is
/// inside. When the circle can't fit it is centred instead.
#[must_use]
pub fn contain(centre: f32, radius: f32, extent: f32) -> f32 {
    if extent <= radius * 2.0 {
        return extent / 2.0;
    }
    centre.clamp(radius, extent - radius)
}
