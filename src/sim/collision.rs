//! Collision detection for balls against pins, side walls and buckets
//!
//! Pure geometry: nothing here mutates state. The step applies the response.

use glam::Vec2;

use super::state::Bucket;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the obstacle surface (if hit)
    pub point: Vec2,
    /// Unit surface normal at contact, pointing from the obstacle toward the ball
    pub normal: Vec2,
    /// Overlap depth (0 when exactly touching)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Direction from `from` to `to` as a unit vector.
///
/// Built from the angle rather than by normalizing, so coincident points
/// still yield a usable normal (+x).
#[inline]
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    let offset = to - from;
    Vec2::from_angle(offset.y.atan2(offset.x))
}

/// Check collision between a ball and a circular pin
///
/// Touching counts: a ball exactly `ball_radius + pin_radius` away hits.
pub fn ball_pin_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    pin_pos: Vec2,
    pin_radius: f32,
) -> CollisionResult {
    let min_distance = ball_radius + pin_radius;
    let distance = ball_pos.distance(pin_pos);

    if distance > min_distance {
        return CollisionResult::miss();
    }

    let normal = direction_between(pin_pos, ball_pos);
    CollisionResult {
        hit: true,
        point: pin_pos + normal * pin_radius,
        normal,
        penetration: min_distance - distance,
    }
}

/// Check collision with the left and right playfield walls
pub fn ball_side_wall_collision(ball_pos: Vec2, ball_radius: f32, width: f32) -> CollisionResult {
    if ball_pos.x < ball_radius {
        return CollisionResult {
            hit: true,
            point: Vec2::new(0.0, ball_pos.y),
            normal: Vec2::X,
            penetration: ball_radius - ball_pos.x,
        };
    }

    if ball_pos.x > width - ball_radius {
        return CollisionResult {
            hit: true,
            point: Vec2::new(width, ball_pos.y),
            normal: Vec2::NEG_X,
            penetration: ball_pos.x - (width - ball_radius),
        };
    }

    CollisionResult::miss()
}

/// Check if the ball's center lies strictly inside a bucket
#[inline]
pub fn ball_in_bucket(ball_pos: Vec2, bucket: &Bucket) -> bool {
    let max = bucket.max();
    ball_pos.x > bucket.min.x && ball_pos.x < max.x && ball_pos.y > bucket.min.y && ball_pos.y < max.y
}

/// Check if the ball fell past the bottom of the playfield
#[inline]
pub fn ball_below_playfield(ball_pos: Vec2, height: f32) -> bool {
    ball_pos.y > height
}
