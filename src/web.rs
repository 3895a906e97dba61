//! Browser bindings
//!
//! The host page owns the canvas and the animation loop: it calls
//! `frame()` once per `requestAnimationFrame`, forwards clicks to
//! `drop_ball`, and draws from `state_json()` / `drain_events_json()`.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::sim::{GameState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Ball Drop (web) starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    config: GameConfig,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a new game. `config_json` overrides the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, config_json: Option<String>) -> WebGame {
        let config = match config_json.as_deref().map(GameConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Invalid config: {}, using defaults", e);
                GameConfig::default()
            }
            None => GameConfig::default(),
        };
        let state = GameState::new(seed as u64, &config);
        WebGame {
            state,
            config,
            input: TickInput::default(),
        }
    }

    /// Advance one animation frame
    pub fn frame(&mut self) {
        tick(&mut self.state, &self.input, &self.config);

        // Clear one-shot inputs after processing
        self.input = TickInput::default();
    }

    /// Queue a drop at canvas coordinates for the next frame
    pub fn drop_ball(&mut self, x: f32, y: f32) {
        self.input.drop_at = Some(glam::Vec2::new(x, y));
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn restart(&mut self, seed: f64) {
        self.input.restart = Some(seed as u64);
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.state.high_score as f64
    }

    /// Seed the high score from the host's storage
    pub fn set_high_score(&mut self, score: f64) {
        self.state.high_score = score.max(0.0) as u64;
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn balls_remaining(&self) -> u32 {
        self.state.balls_remaining
    }

    pub fn credits(&self) -> u32 {
        self.state.credits
    }

    pub fn phase(&self) -> String {
        self.state.phase.as_str().to_string()
    }

    /// Full state snapshot for rendering
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        let events = self.state.drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
