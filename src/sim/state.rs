//! Game state and core simulation types
//!
//! `GameState` is the single owner of the player and every entity
//! collection. Policy modules (spawner, collision, difficulty) borrow it
//! mutably for the duration of one frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{NeonColor, Obstacle, Particle, ParticleMode, Pickup, Player};
use crate::consts::*;

/// Current phase of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the start command
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended, simulation frozen
    GameOver,
}

/// Discrete events for fire-and-forget consumers (audio, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    PickupCollected { value: u32 },
    Crashed { score: u32 },
}

/// Scrolling background grid (decorative only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeonGrid {
    pub cell_size: f32,
    /// Vertical scroll offset in [0, cell_size)
    pub offset_y: f32,
    /// Horizon pulse phase in [0, TAU)
    pub pulse: f32,
}

impl NeonGrid {
    const SCROLL_SPEED: f32 = 2.0;
    const PULSE_SPEED: f32 = 0.02;

    pub fn update(&mut self, speed_factor: f32) {
        self.offset_y = (self.offset_y + Self::SCROLL_SPEED * speed_factor).rem_euclid(self.cell_size);
        self.pulse = (self.pulse + Self::PULSE_SPEED).rem_euclid(std::f32::consts::TAU);
    }
}

impl Default for NeonGrid {
    fn default() -> Self {
        Self {
            cell_size: 50.0,
            offset_y: 0.0,
            pulse: 0.0,
        }
    }
}

/// Read-only view handed to the renderer once per frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub game_speed: f32,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub pickups: &'a [Pickup],
    pub particles: &'a [Particle],
    pub grid: &'a NeonGrid,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from (for reproducing a session)
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// Best score reached during this process; survives resets
    pub high_score: u32,
    /// Fall speed handed to newly spawned obstacles
    pub game_speed: f32,
    /// Frames accumulated toward the next speed increase
    pub difficulty_frames: u32,
    /// Frames since the last obstacle spawn
    pub obstacle_timer: u32,
    /// Frames since the last pickup spawn
    pub pickup_timer: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub grid: NeonGrid,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state on the start screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            score: 0,
            high_score: 0,
            game_speed: INITIAL_GAME_SPEED,
            difficulty_frames: 0,
            obstacle_timer: 0,
            pickup_timer: 0,
            player: Player::new(),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            grid: NeonGrid::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Create a state seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seconds accumulated toward the next speed increase
    pub fn difficulty_timer(&self) -> f32 {
        self.difficulty_frames as f32 * FRAME_DT
    }

    /// Restore every per-run field to its initial value.
    ///
    /// The high score, RNG stream and background grid carry over.
    pub fn reset(&mut self) {
        self.score = 0;
        self.game_speed = INITIAL_GAME_SPEED;
        self.difficulty_frames = 0;
        self.obstacle_timer = 0;
        self.pickup_timer = 0;
        self.player = Player::new();
        self.obstacles.clear();
        self.pickups.clear();
        self.particles.clear();
    }

    /// Reset and enter `Playing` (start and restart share this path)
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::GameStarted);
        log::info!("Run started (best so far: {})", self.high_score);
    }

    /// End the run, folding the score into the high score
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        if self.score > self.high_score {
            log::info!("New high score: {}", self.score);
        }
        self.high_score = self.high_score.max(self.score);
        self.push_event(GameEvent::Crashed { score: self.score });
        log::info!(
            "Crashed with score {} at speed {:.1}",
            self.score,
            self.game_speed
        );
    }

    /// Append an obstacle falling at the current game speed
    pub fn spawn_obstacle(&mut self) {
        let obstacle = Obstacle::spawn(&mut self.rng, self.game_speed);
        log::trace!("Spawned obstacle at x={} w={}", obstacle.pos.x, obstacle.size.x);
        self.obstacles.push(obstacle);
    }

    /// Append a pickup falling slightly slower than the game speed
    pub fn spawn_pickup(&mut self) {
        let pickup = Pickup::spawn(&mut self.rng, self.game_speed * PICKUP_SPEED_FACTOR);
        log::trace!("Spawned pickup at x={} value={}", pickup.pos.x, pickup.value);
        self.pickups.push(pickup);
    }

    /// Emit a burst of `count` particles at `pos`
    pub fn emit_burst(&mut self, pos: Vec2, color: NeonColor, mode: ParticleMode, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(&mut self.rng, pos, color, mode);
            self.particles.push(particle);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            game_speed: self.game_speed,
            player: &self.player,
            obstacles: &self.obstacles,
            pickups: &self.pickups,
            particles: &self.particles,
            grid: &self.grid,
        }
    }
}
