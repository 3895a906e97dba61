//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; there are no globals.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::start_level;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Balls fall, drops are accepted
    Playing,
    /// Game is paused
    Paused,
    /// All pins struck, waiting for the next level to start
    LevelComplete,
    /// Inventory empty and no ball left in play
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::LevelComplete => "level_complete",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// A falling ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cleared when the ball lands in a bucket or leaves the playfield
    pub active: bool,
}

impl Ball {
    /// A ball at rest at `pos`
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            active: true,
        }
    }
}

/// Pin category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PinKind {
    #[default]
    Plain,
    /// Blue pin: double score and extra balls
    BonusA,
    /// Gold pin: awards a credit
    BonusB,
}

impl PinKind {
    /// Score awarded when struck
    pub fn score(&self) -> u64 {
        match self {
            PinKind::BonusA => 100,
            PinKind::Plain | PinKind::BonusB => 50,
        }
    }

    /// Balls added to the inventory when struck
    pub fn bonus_balls(&self) -> u32 {
        match self {
            PinKind::BonusA => 3,
            _ => 0,
        }
    }

    /// Credits awarded when struck
    pub fn credits(&self) -> u32 {
        match self {
            PinKind::BonusB => 1,
            _ => 0,
        }
    }
}

/// A static circular obstacle, removed on first contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PinKind,
    pub active: bool,
}

impl Pin {
    pub fn new(id: u32, pos: Vec2, radius: f32, kind: PinKind) -> Self {
        Self {
            id,
            pos,
            radius,
            kind,
            active: true,
        }
    }
}

/// Axis-aligned scoring region at the bottom of the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
    pub score: u64,
}

impl Bucket {
    pub fn new(x: f32, y: f32, width: f32, height: f32, score: u64) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
            score,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    BallDropped { ball_id: u32, pos: Vec2 },
    PinHit { pin_id: u32, kind: PinKind, score: u64, pos: Vec2 },
    BonusBalls { count: u32 },
    CreditEarned { count: u32 },
    BucketScored { bucket: usize, score: u64, pos: Vec2 },
    BallLost { ball_id: u32 },
    LevelCleared { level: u32 },
    LevelStarted { level: u32 },
    GameOver { score: u64 },
    NewHighScore { score: u64 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state; the stream selects the level being generated
    pub rng_state: RngState,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Balls the player can still drop
    pub balls_remaining: u32,
    pub credits: u32,
    /// Best score seen by this state, survives restarts
    pub high_score: u64,
    /// Simulated frame counter
    pub frame: u64,
    pub phase: GamePhase,
    /// Frames left before the next level starts (LevelComplete only)
    pub transition_frames: u32,
    /// Balls in play (sorted by id)
    pub balls: Vec<Ball>,
    /// Pins of the current level, in placement order
    pub pins: Vec<Pin>,
    pub buckets: Vec<Bucket>,
    /// Events produced since the last drain (not gameplay-affecting)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given seed, starting at level 1
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            level: 1,
            score: 0,
            balls_remaining: config.rules.starting_balls,
            credits: 0,
            high_score: 0,
            frame: 0,
            phase: GamePhase::Playing,
            transition_frames: 0,
            balls: Vec::new(),
            pins: Vec::new(),
            buckets: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        start_level(&mut state, config);

        state
    }

    /// Start over with a new seed, keeping the high score
    pub fn restart(&mut self, seed: u64, config: &GameConfig) {
        let high_score = self.high_score;
        *self = Self::new(seed, config);
        self.high_score = high_score;
        log::info!("Game restarted with seed {}", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put a new ball into play at `pos`. Does not touch the inventory.
    pub fn spawn_ball(&mut self, pos: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, pos, radius));
        id
    }

    pub fn active_pin_count(&self) -> usize {
        self.pins.iter().filter(|p| p.active).count()
    }

    pub fn active_ball_count(&self) -> usize {
        self.balls.iter().filter(|b| b.active).count()
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}
