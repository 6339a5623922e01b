//! Neon Dash - a lane-dodging arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, spawning, collisions, difficulty)
//! - `renderer`: Terminal half-block renderer consuming read-only snapshots
//! - `input`: Terminal key events folded into per-frame commands
//! - `audio`: Best-effort procedural sound effects
//! - `settings`: User preferences loaded once at startup

pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Logical play area (the renderer scales this to the terminal)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Fixed frame rate; one frame is one simulation step
    pub const FPS: u32 = 60;
    /// Seconds credited per simulated frame (frame-count based, not wall clock)
    pub const FRAME_DT: f32 = 1.0 / FPS as f32;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Distance of the player's top edge from the bottom of the screen
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const PLAYER_BOOST_SPEED: f32 = 12.0;
    pub const TRAIL_LENGTH: usize = 10;

    /// Boost meter
    pub const MAX_BOOST: f32 = 100.0;
    /// Meter must be strictly above this to activate boost
    pub const BOOST_THRESHOLD: f32 = 20.0;
    pub const BOOST_DRAIN_RATE: f32 = 1.0;
    pub const BOOST_FILL_RATE: f32 = 0.2;
    /// Meter refill per collected pickup
    pub const PICKUP_BOOST_BONUS: f32 = 10.0;

    /// Difficulty ramp
    pub const INITIAL_GAME_SPEED: f32 = 5.0;
    pub const DIFFICULTY_INTERVAL_SECS: u32 = 5;
    pub const SPEED_INCREMENT: f32 = 0.5;

    /// Spawning
    pub const PICKUP_SPAWN_INTERVAL_FRAMES: u32 = FPS * 3;
    /// Pickups fall slightly slower than obstacles
    pub const PICKUP_SPEED_FACTOR: f32 = 0.8;

    /// Obstacle dimensions (inclusive ranges)
    pub const OBSTACLE_MIN_WIDTH: u32 = 50;
    pub const OBSTACLE_MAX_WIDTH: u32 = 200;
    pub const OBSTACLE_MIN_HEIGHT: u32 = 20;
    pub const OBSTACLE_MAX_HEIGHT: u32 = 40;

    pub const PICKUP_RADIUS: f32 = 15.0;
    /// Weighted value table: 1 is three times as likely as 2 or 3
    pub const PICKUP_VALUES: [u32; 5] = [1, 1, 1, 2, 3];

    /// Particle bursts
    pub const CRASH_BURST: usize = 50;
    pub const PICKUP_BURST: usize = 20;
    pub const PARTICLE_MAX_LIFETIME: i32 = 40;
}
