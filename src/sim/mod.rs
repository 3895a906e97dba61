//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep of one frame
//! - Seeded RNG only
//! - Stable iteration order (pins by placement, balls by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod step;
pub mod tick;

pub use collision::{CollisionResult, ball_pin_collision};
pub use level::{generate_buckets, start_level};
pub use state::{Ball, Bucket, GameEvent, GamePhase, GameState, Pin, PinKind};
pub use step::{PinStrike, StepOutcome, step_ball};
pub use tick::{TickInput, tick, try_drop_ball};
