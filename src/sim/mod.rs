//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - One call to `tick` is one frame (no wall-clock time)
//! - Seeded RNG only, owned by `GameState`
//! - No rendering, audio or terminal dependencies

pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionResult, resolve_collisions};
pub use difficulty::{DIFFICULTY_INTERVAL_FRAMES, advance_difficulty};
pub use entities::{
    BoostState, Direction, NeonColor, Obstacle, Particle, ParticleMode, Pickup, Player, TrailPoint,
};
pub use spawner::{NoSpawner, Spawner, TimedSpawner, obstacle_spawn_interval};
pub use state::{GameEvent, GamePhase, GameState, NeonGrid, Snapshot};
pub use tick::{TickInput, tick, tick_with};
