//! Level construction: bucket row and seeded pin scatter

use glam::Vec2;
use rand::Rng;

use super::state::{Bucket, GameEvent, GameState, Pin, PinKind};
use crate::config::{GameConfig, RulesConfig};

/// Bucket geometry (pixels)
pub const BUCKET_START_X: f32 = 25.0;
pub const BUCKET_SPACING: f32 = 75.0;
pub const BUCKET_WIDTH: f32 = 50.0;
pub const BUCKET_HEIGHT: f32 = 30.0;
/// Score of the first bucket; bucket `i` is worth `(i + 1)` times this
pub const BUCKET_BASE_SCORE: u64 = 100;

/// Pins keep this far from the side walls
pub const PIN_MARGIN_X: f32 = 100.0;
/// Pins start below the drop zone and stop this far above the floor
pub const PIN_TOP: f32 = 150.0;
pub const PIN_BOTTOM_MARGIN: f32 = 150.0;

/// Reset the board for `state.level` and top up the ball inventory
pub fn start_level(state: &mut GameState, config: &GameConfig) {
    state.balls.clear();
    state.pins.clear();
    state.balls_remaining += config.rules.balls_per_level;

    state.buckets = generate_buckets(config);
    generate_pins(state, config);

    log::info!(
        "Level {} started: {} pins, {} balls in inventory",
        state.level,
        state.pins.len(),
        state.balls_remaining
    );
    state.events.push(GameEvent::LevelStarted { level: state.level });
}

/// The fixed row of scoring buckets along the floor
pub fn generate_buckets(config: &GameConfig) -> Vec<Bucket> {
    let y = config.playfield.height - BUCKET_HEIGHT;
    (0..config.rules.bucket_count)
        .map(|i| {
            Bucket::new(
                BUCKET_START_X + i as f32 * BUCKET_SPACING,
                y,
                BUCKET_WIDTH,
                BUCKET_HEIGHT,
                (i as u64 + 1) * BUCKET_BASE_SCORE,
            )
        })
        .collect()
}

/// Number of pins placed on a level
pub fn pin_count_for_level(level: u32, rules: &RulesConfig) -> u32 {
    rules.base_pin_count + rules.pins_per_level * level
}

/// Scatter pins uniformly over the middle of the playfield
///
/// Deterministic: the RNG stream is the level number, so a run's seed fixes
/// every level's layout.
pub fn generate_pins(state: &mut GameState, config: &GameConfig) {
    state.rng_state.stream = state.level as u64;
    let mut rng = state.rng_state.to_rng();

    let field = &config.playfield;
    let x_range = PIN_MARGIN_X..(field.width - PIN_MARGIN_X).max(PIN_MARGIN_X + 1.0);
    let y_range = PIN_TOP..(field.height - PIN_BOTTOM_MARGIN).max(PIN_TOP + 1.0);

    let count = pin_count_for_level(state.level, &config.rules);
    for _ in 0..count {
        let pos = Vec2::new(
            rng.random_range(x_range.clone()),
            rng.random_range(y_range.clone()),
        );
        let kind = roll_pin_kind(&mut rng, &config.rules);
        let id = state.next_entity_id();
        state.pins.push(Pin::new(id, pos, config.physics.pin_radius, kind));
    }

    log::debug!(
        "Level {} pins: {} bonus-A, {} bonus-B",
        state.level,
        state.pins.iter().filter(|p| p.kind == PinKind::BonusA).count(),
        state.pins.iter().filter(|p| p.kind == PinKind::BonusB).count()
    );
}

/// Roll a pin category: bonus-A first, then bonus-B among the rest
pub fn roll_pin_kind(rng: &mut impl Rng, rules: &RulesConfig) -> PinKind {
    if rng.random::<f32>() < rules.bonus_a_chance {
        PinKind::BonusA
    } else if rng.random::<f32>() < rules.bonus_b_chance {
        PinKind::BonusB
    } else {
        PinKind::Plain
    }
}
