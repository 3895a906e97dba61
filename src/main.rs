//! Ball Drop entry point
//!
//! Native builds run a seeded headless autoplay: one ball is dropped at a
//! random spot whenever the board is clear, until the game ends.
//!
//! Usage: `ball-drop [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_drop::GameConfig;
    use ball_drop::consts::{DEFAULT_SEED, FRAMES_PER_SECOND};
    use ball_drop::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 10 * 60 * FRAMES_PER_SECOND as u64;

    env_logger::init();
    log::info!("Ball Drop (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut state = GameState::new(seed, &config);
    let mut aim = Pcg32::seed_from_u64(seed ^ 0xa11d);
    let (mut pins_hit, mut buckets_hit, mut lost) = (0u32, 0u32, 0u32);

    while state.phase != GamePhase::GameOver && state.frame < MAX_FRAMES {
        let mut input = TickInput::default();
        if state.phase == GamePhase::Playing && state.balls.is_empty() {
            let r = config.physics.ball_radius;
            let x = aim.random_range(r..config.playfield.width - r);
            input.drop_at = Some(Vec2::new(x, config.rules.drop_zone_height / 3.0));
        }

        tick(&mut state, &input, &config);

        for event in state.drain_events() {
            log::debug!("{:?}", event);
            match event {
                GameEvent::PinHit { .. } => pins_hit += 1,
                GameEvent::BucketScored { .. } => buckets_hit += 1,
                GameEvent::BallLost { .. } => lost += 1,
                _ => {}
            }
        }
    }

    println!("Seed {}: reached level {} in {} frames", seed, state.level, state.frame);
    println!(
        "Score {} | pins {} | buckets {} | lost {} | credits {}",
        state.score, pins_hit, buckets_hit, lost, state.credits
    );
    if state.phase != GamePhase::GameOver {
        log::warn!("Stopped after {} frames without game over", MAX_FRAMES);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
