//! Circle-circle collisions between pairs of balls.
//!
//! The exchange happens in a frame rotated to line up with the collision normal: the normal
//! components of the velocities are swapped using the 1D collision formula, weighted by mass,
//! and the tangential components are left untouched. The pair is then pushed apart so that it
//! no longer overlaps.

use glam::Vec2;

use super::ball::Ball;
use crate::maths::{from_frame, into_frame, normalise_or};

/// The 1D collision formula. Given masses and velocities along the normal, return the new
/// velocities along the normal. A `restitution` of 1.0 is a perfectly elastic collision.
#[must_use]
pub fn exchange(
    mass_a: f32,
    velocity_a: f32,
    mass_b: f32,
    velocity_b: f32,
    restitution: f32,
) -> (f32, f32) {
    let total_mass = mass_a + mass_b;
    let momentum = mass_a * velocity_a + mass_b * velocity_b;
    (
        (momentum + mass_b * restitution * (velocity_b - velocity_a)) / total_mass,
        (momentum + mass_a * restitution * (velocity_a - velocity_b)) / total_mass,
    )
}

/// Resolve a collision between two balls, if they're overlapping. Both balls are updated in
/// place. Returns whether there was a collision.
///
/// Balls with exactly the same centre are separated along the x-axis.
pub fn resolve(a: &mut Ball, b: &mut Ball, restitution: f32) -> bool {
    let delta = a.position - b.position;
    let distance = delta.length();
    let touching = a.radius + b.radius;
    if distance >= touching {
        return false;
    }

    let normal = normalise_or(delta, Vec2::X);
    let a_local = into_frame(a.velocity, normal);
    let b_local = into_frame(b.velocity, normal);

    let (a_normal, b_normal) = exchange(a.mass, a_local.x, b.mass, b_local.x, restitution);
    a.velocity = from_frame(Vec2::new(a_normal, a_local.y), normal);
    b.velocity = from_frame(Vec2::new(b_normal, b_local.y), normal);

    let separation = normal * ((touching - distance) / 2.0);
    a.position += separation;
    b.position -= separation;

    tracing::trace!("Collision between {:?} and {:?}", a.id, b.id);
    true
}
