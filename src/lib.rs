//! Ball Drop - a pachinko-style arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: Tunable playfield, physics and rule constants
//! - `web`: wasm-bindgen facade for a browser host (wasm32 only)

pub mod config;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{GameConfig, PhysicsConfig, Playfield, RulesConfig};

/// Game configuration constants
pub mod consts {
    /// Simulation runs one step per animation frame
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Seed used when the host does not supply one
    pub const DEFAULT_SEED: u64 = 0x8a11_d809;
}
