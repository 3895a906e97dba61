//! Frame-driven game loop
//!
//! One call to [`tick`] per rendered frame: handles input, steps every ball,
//! folds step outcomes into the score and inventory, and drives level and
//! game-over transitions.

use glam::Vec2;

use super::level::start_level;
use super::state::{GameEvent, GamePhase, GameState};
use super::step::{StepOutcome, step_ball};
use crate::config::GameConfig;

/// Input commands for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drop a ball here (click/tap position in playfield coordinates)
    pub drop_at: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Start a new game with this seed
    pub restart: Option<u64>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    if let Some(seed) = input.restart {
        state.restart(seed, config);
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at frame {}", state.frame);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("Resumed at frame {}", state.frame);
            }
            _ => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    state.frame += 1;

    match state.phase {
        GamePhase::LevelComplete => {
            // Balls already in flight keep falling and scoring
            step_balls(state, config);
            check_high_score(state);

            state.transition_frames = state.transition_frames.saturating_sub(1);
            if state.transition_frames == 0 {
                start_level(state, config);
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => {
            if let Some(pos) = input.drop_at {
                try_drop_ball(state, pos, config);
            }

            step_balls(state, config);
            check_level_end(state, config);
            check_high_score(state);
        }

        _ => {}
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Spawn a ball if the position is inside the drop zone and the inventory
/// is not empty. Returns whether a ball was dropped.
pub fn try_drop_ball(state: &mut GameState, pos: Vec2, config: &GameConfig) -> bool {
    if pos.y >= config.rules.drop_zone_height {
        log::trace!("Drop at {:?} ignored: below drop zone", pos);
        return false;
    }
    if state.balls_remaining == 0 {
        log::trace!("Drop at {:?} ignored: no balls left", pos);
        return false;
    }

    state.balls_remaining -= 1;
    let ball_id = state.spawn_ball(pos, config.physics.ball_radius);
    state.events.push(GameEvent::BallDropped { ball_id, pos });
    true
}

/// Step every ball in play, then drop the ones that left play
fn step_balls(state: &mut GameState, config: &GameConfig) {
    for i in 0..state.balls.len() {
        let outcome = step_ball(
            &mut state.balls[i],
            &mut state.pins,
            &state.buckets,
            &config.physics,
            &config.playfield,
        );
        if !outcome.is_empty() {
            let ball_id = state.balls[i].id;
            apply_outcome(state, ball_id, outcome);
        }
    }
    state.balls.retain(|b| b.active);
}

/// Fold one ball's step outcome into the game state
fn apply_outcome(state: &mut GameState, ball_id: u32, outcome: StepOutcome) {
    state.score += outcome.score;
    state.balls_remaining += outcome.bonus_balls;
    state.credits += outcome.credits;

    for strike in &outcome.struck_pins {
        let pos = state
            .pins
            .iter()
            .find(|p| p.id == strike.pin_id)
            .map(|p| p.pos)
            .unwrap_or(Vec2::ZERO);
        state.events.push(GameEvent::PinHit {
            pin_id: strike.pin_id,
            kind: strike.kind,
            score: strike.kind.score(),
            pos,
        });
    }
    if outcome.bonus_balls > 0 {
        state.events.push(GameEvent::BonusBalls {
            count: outcome.bonus_balls,
        });
    }
    if outcome.credits > 0 {
        state.events.push(GameEvent::CreditEarned {
            count: outcome.credits,
        });
    }

    if let Some(bucket) = outcome.bucket {
        let score = state.buckets[bucket].score;
        let pos = state
            .balls
            .iter()
            .find(|b| b.id == ball_id)
            .map(|b| Vec2::new(b.pos.x, state.buckets[bucket].min.y))
            .unwrap_or(state.buckets[bucket].min);
        log::debug!("Ball {} landed in bucket {} (+{})", ball_id, bucket, score);
        state.events.push(GameEvent::BucketScored { bucket, score, pos });
    }

    if outcome.lost {
        state.events.push(GameEvent::BallLost { ball_id });
    }
}

/// Level clear takes priority over game over
fn check_level_end(state: &mut GameState, config: &GameConfig) {
    if state.active_pin_count() == 0 {
        log::info!("Level {} complete, score {}", state.level, state.score);
        state.events.push(GameEvent::LevelCleared { level: state.level });
        state.level += 1;
        state.phase = GamePhase::LevelComplete;
        state.transition_frames = config.rules.level_transition_frames;
        if state.transition_frames == 0 {
            start_level(state, config);
            state.phase = GamePhase::Playing;
        }
        return;
    }

    if state.balls_remaining == 0 && state.active_ball_count() == 0 {
        log::info!("Game over on level {}: final score {}", state.level, state.score);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

fn check_high_score(state: &mut GameState) {
    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore { score: state.score });
    }
}
