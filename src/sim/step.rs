//! Per-frame physics step for a single ball
//!
//! Semi-implicit Euler with a fixed step of one frame, followed by wall,
//! pin, bucket and floor resolution in that order.

use super::collision::{
    ball_below_playfield, ball_in_bucket, ball_pin_collision, ball_side_wall_collision,
};
use super::state::{Ball, Bucket, Pin, PinKind};
use crate::config::{PhysicsConfig, Playfield};

/// A pin struck during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinStrike {
    pub pin_id: u32,
    pub kind: PinKind,
}

/// What happened to one ball during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Score earned from pins and buckets
    pub score: u64,
    /// Balls to add to the inventory
    pub bonus_balls: u32,
    pub credits: u32,
    /// Pins deactivated by this step
    pub struck_pins: Vec<PinStrike>,
    /// Index into the bucket slice the ball landed in
    pub bucket: Option<usize>,
    /// Ball fell off the bottom without scoring
    pub lost: bool,
}

impl StepOutcome {
    pub fn is_empty(&self) -> bool {
        self.score == 0 && self.struck_pins.is_empty() && self.bucket.is_none() && !self.lost
    }
}

/// Advance one ball by one frame and resolve its collisions
///
/// Inactive balls are left untouched. At most one pin is struck per call:
/// the first active overlapping pin in slice order. At most one bucket
/// scores: once the ball is captured it is inactive.
pub fn step_ball(
    ball: &mut Ball,
    pins: &mut [Pin],
    buckets: &[Bucket],
    physics: &PhysicsConfig,
    field: &Playfield,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if !ball.active {
        return outcome;
    }

    ball.vel.y += physics.gravity;
    ball.pos += ball.vel;

    let wall = ball_side_wall_collision(ball.pos, ball.radius, field.width);
    if wall.hit {
        ball.pos.x = if wall.normal.x > 0.0 {
            ball.radius
        } else {
            field.width - ball.radius
        };
        ball.vel.x *= -physics.bounce;
    }

    for pin in pins.iter_mut().filter(|p| p.active) {
        let contact = ball_pin_collision(ball.pos, ball.radius, pin.pos, pin.radius);
        if !contact.hit {
            continue;
        }

        // Redirect along the normal, keeping damped speed
        let speed = ball.vel.length();
        ball.vel = contact.normal * speed * physics.bounce;
        ball.pos = pin.pos + contact.normal * (ball.radius + pin.radius);

        pin.active = false;
        outcome.score += pin.kind.score();
        outcome.bonus_balls += pin.kind.bonus_balls();
        outcome.credits += pin.kind.credits();
        outcome.struck_pins.push(PinStrike {
            pin_id: pin.id,
            kind: pin.kind,
        });
        break;
    }

    if let Some(index) = buckets.iter().position(|b| ball_in_bucket(ball.pos, b)) {
        ball.active = false;
        outcome.score += buckets[index].score;
        outcome.bucket = Some(index);
    }

    if ball.active && ball_below_playfield(ball.pos, field.height) {
        ball.active = false;
        outcome.lost = true;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn field() -> Playfield {
        Playfield::default()
    }

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn weightless() -> PhysicsConfig {
        PhysicsConfig {
            gravity: 0.0,
            ..PhysicsConfig::default()
        }
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(1, Vec2::new(x, y), 10.0)
    }

    fn pin_at(id: u32, x: f32, y: f32, kind: PinKind) -> Pin {
        Pin::new(id, Vec2::new(x, y), 5.0, kind)
    }

    #[test]
    fn test_free_fall_from_rest() {
        let mut ball = ball_at(100.0, 100.0);
        let outcome = step_ball(&mut ball, &mut [], &[], &physics(), &field());

        assert!((ball.pos.x - 100.0).abs() < 0.0001);
        assert!((ball.pos.y - 100.2).abs() < 0.0001);
        assert!((ball.vel.y - 0.2).abs() < 0.0001);
        assert_eq!(ball.vel.x, 0.0);
        assert!(ball.active);
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_left_wall_bounce_damps_and_flips() {
        let mut ball = ball_at(10.0, 100.0);
        ball.vel = Vec2::new(-3.0, 0.0);
        step_ball(&mut ball, &mut [], &[], &physics(), &field());

        assert_eq!(ball.pos.x, 10.0);
        assert!((ball.vel.x - 3.0 * 0.6).abs() < 0.0001);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut ball = ball_at(388.0, 100.0);
        ball.vel = Vec2::new(5.0, 0.0);
        step_ball(&mut ball, &mut [], &[], &physics(), &field());

        assert_eq!(ball.pos.x, 390.0);
        assert!((ball.vel.x + 5.0 * 0.6).abs() < 0.0001);
    }

    #[test]
    fn test_exact_touch_strikes_pin() {
        let mut ball = ball_at(100.0, 100.0);
        let mut pins = [pin_at(9, 100.0, 115.0, PinKind::Plain)];
        let outcome = step_ball(&mut ball, &mut pins, &[], &weightless(), &field());

        assert!(!pins[0].active);
        assert_eq!(outcome.score, 50);
        assert_eq!(
            outcome.struck_pins,
            vec![PinStrike {
                pin_id: 9,
                kind: PinKind::Plain
            }]
        );
    }

    #[test]
    fn test_pin_hit_repositions_and_redirects() {
        // Falling straight down onto a pin slightly to the left
        let mut ball = ball_at(103.0, 90.0);
        ball.vel = Vec2::new(0.0, 4.0);
        let mut pins = [pin_at(1, 100.0, 100.0, PinKind::Plain)];
        step_ball(&mut ball, &mut pins, &[], &weightless(), &field());

        let separation = ball.pos.distance(Vec2::new(100.0, 100.0));
        assert!((separation - 15.0).abs() < 0.001);
        // Speed damped, heading away from the pin
        assert!((ball.vel.length() - 4.0 * 0.6).abs() < 0.001);
        let away = (ball.pos - Vec2::new(100.0, 100.0)).normalize();
        assert!(ball.vel.normalize().dot(away) > 0.999);
    }

    #[test]
    fn test_bonus_pins_award_extras() {
        let mut ball = ball_at(100.0, 100.0);
        let mut pins = [pin_at(1, 100.0, 110.0, PinKind::BonusA)];
        let outcome = step_ball(&mut ball, &mut pins, &[], &weightless(), &field());
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.bonus_balls, 3);
        assert_eq!(outcome.credits, 0);

        let mut ball = ball_at(100.0, 100.0);
        let mut pins = [pin_at(2, 100.0, 110.0, PinKind::BonusB)];
        let outcome = step_ball(&mut ball, &mut pins, &[], &weightless(), &field());
        assert_eq!(outcome.score, 50);
        assert_eq!(outcome.bonus_balls, 0);
        assert_eq!(outcome.credits, 1);
    }

    #[test]
    fn test_one_pin_per_step_first_wins() {
        let mut ball = ball_at(100.0, 100.0);
        let mut pins = [
            pin_at(1, 200.0, 200.0, PinKind::Plain),
            pin_at(2, 108.0, 100.0, PinKind::BonusA),
            pin_at(3, 92.0, 100.0, PinKind::Plain),
        ];
        let outcome = step_ball(&mut ball, &mut pins, &[], &weightless(), &field());

        assert_eq!(outcome.struck_pins.len(), 1);
        assert_eq!(outcome.struck_pins[0].pin_id, 2);
        assert!(pins[0].active);
        assert!(!pins[1].active);
        assert!(pins[2].active);
    }

    #[test]
    fn test_inactive_pins_are_ignored() {
        let mut ball = ball_at(100.0, 100.0);
        let mut pins = [pin_at(1, 100.0, 108.0, PinKind::Plain)];
        pins[0].active = false;
        let outcome = step_ball(&mut ball, &mut pins, &[], &weightless(), &field());
        assert!(outcome.struck_pins.is_empty());
        assert_eq!(ball.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_bucket_captures_ball() {
        let buckets = [Bucket::new(25.0, 570.0, 50.0, 30.0, 100)];
        let mut ball = ball_at(50.0, 580.0);
        ball.vel = Vec2::new(0.0, 2.0);
        let outcome = step_ball(&mut ball, &mut [], &buckets, &physics(), &field());

        assert!(!ball.active);
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.bucket, Some(0));
        assert!(!outcome.lost);
    }

    #[test]
    fn test_overlapping_buckets_credit_once() {
        let buckets = [
            Bucket::new(0.0, 500.0, 100.0, 50.0, 100),
            Bucket::new(40.0, 500.0, 100.0, 50.0, 300),
        ];
        let mut ball = ball_at(50.0, 520.0);
        let outcome = step_ball(&mut ball, &mut [], &buckets, &weightless(), &field());

        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.bucket, Some(0));
    }

    #[test]
    fn test_falls_out_without_score() {
        let mut ball = ball_at(200.0, 599.0);
        ball.vel = Vec2::new(0.0, 5.0);
        let outcome = step_ball(&mut ball, &mut [], &[], &physics(), &field());

        assert!(!ball.active);
        assert!(outcome.lost);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_inactive_ball_does_not_move() {
        let mut ball = ball_at(100.0, 100.0);
        ball.active = false;
        let before = ball.clone();
        let mut pins = [pin_at(1, 100.0, 105.0, PinKind::Plain)];
        let outcome = step_ball(&mut ball, &mut pins, &[], &physics(), &field());

        assert_eq!(ball, before);
        assert!(pins[0].active);
        assert!(outcome.is_empty());
    }

    proptest! {
        #[test]
        fn prop_rest_ball_gains_exactly_gravity(
            x in 20.0f32..380.0,
            y in 0.0f32..400.0,
            gravity in 0.0f32..2.0,
        ) {
            let physics = PhysicsConfig { gravity, ..PhysicsConfig::default() };
            let mut ball = ball_at(x, y);
            step_ball(&mut ball, &mut [], &[], &physics, &field());
            prop_assert_eq!(ball.vel.y, gravity);
            prop_assert_eq!(ball.vel.x, 0.0);
        }

        #[test]
        fn prop_ball_stays_between_walls(
            x in 10.0f32..390.0,
            vx in -50.0f32..50.0,
        ) {
            let mut ball = ball_at(x, 100.0);
            ball.vel.x = vx;
            step_ball(&mut ball, &mut [], &[], &physics(), &field());
            prop_assert!(ball.pos.x >= ball.radius);
            prop_assert!(ball.pos.x <= 400.0 - ball.radius);
        }

        #[test]
        fn prop_pin_hit_never_leaves_overlap(
            dx in -14.0f32..14.0,
            dy in -14.0f32..14.0,
            vx in -5.0f32..5.0,
            vy in -5.0f32..5.0,
        ) {
            let pin_pos = Vec2::new(200.0, 300.0);
            let mut pins = [Pin::new(1, pin_pos, 5.0, PinKind::Plain)];
            let mut ball = Ball::new(1, pin_pos + Vec2::new(dx, dy), 10.0);
            ball.vel = Vec2::new(vx, vy);
            let speed_before = ball.vel.length();
            let outcome = step_ball(&mut ball, &mut pins, &[], &weightless(), &field());

            if !outcome.struck_pins.is_empty() {
                prop_assert!(!pins[0].active);
                prop_assert!((ball.pos.distance(pin_pos) - 15.0).abs() < 0.01);
                prop_assert!(ball.vel.length() <= speed_before * 0.6 + 0.001);
            }
        }
    }
}
