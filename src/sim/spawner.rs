//! Timed spawning of obstacles and pickups
//!
//! Both timers count frames and live in `GameState` so that a reset clears
//! them along with everything else.

use super::state::GameState;
use crate::consts::*;

/// Frames between obstacle spawns at the given game speed.
///
/// Shrinks linearly with speed until `speed / 15` reaches 1.5, after which
/// it stays at half a second.
pub fn obstacle_spawn_interval(game_speed: f32) -> f32 {
    FPS as f32 * (2.0 - (game_speed / 15.0).min(1.5))
}

/// Spawn policy invoked once per `Playing` frame
pub trait Spawner {
    fn spawn(&self, state: &mut GameState);
}

/// Frame-count spawner used by the real game
#[derive(Debug, Clone, Copy, Default)]
pub struct TimedSpawner;

impl Spawner for TimedSpawner {
    fn spawn(&self, state: &mut GameState) {
        state.obstacle_timer += 1;
        if state.obstacle_timer as f32 >= obstacle_spawn_interval(state.game_speed) {
            state.obstacle_timer = 0;
            state.spawn_obstacle();
        }

        state.pickup_timer += 1;
        if state.pickup_timer >= PICKUP_SPAWN_INTERVAL_FRAMES {
            state.pickup_timer = 0;
            state.spawn_pickup();
        }
    }
}

/// Spawns nothing (attract screens, scripted tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpawner;

impl Spawner for NoSpawner {
    fn spawn(&self, _state: &mut GameState) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_at_initial_speed() {
        // 60 * (2 - 1/3) = 100 frames
        assert!((obstacle_spawn_interval(INITIAL_GAME_SPEED) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_interval_floor() {
        let floor = FPS as f32 * 0.5;
        assert!((obstacle_spawn_interval(22.5) - floor).abs() < 1e-3);
        assert_eq!(obstacle_spawn_interval(30.0), obstacle_spawn_interval(100.0));
        assert!((obstacle_spawn_interval(100.0) - floor).abs() < 1e-3);
    }

    #[test]
    fn test_first_obstacle_after_interval() {
        let mut state = GameState::new(5);
        state.start();
        for _ in 0..99 {
            TimedSpawner.spawn(&mut state);
        }
        assert!(state.obstacles.is_empty());
        TimedSpawner.spawn(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacle_timer, 0);
    }

    #[test]
    fn test_pickup_every_three_seconds() {
        let mut state = GameState::new(6);
        state.start();
        for _ in 0..(PICKUP_SPAWN_INTERVAL_FRAMES * 2) {
            TimedSpawner.spawn(&mut state);
        }
        assert_eq!(state.pickups.len(), 2);
    }

    #[test]
    fn test_no_spawner_is_inert() {
        let mut state = GameState::new(7);
        state.start();
        for _ in 0..1000 {
            NoSpawner.spawn(&mut state);
        }
        assert!(state.obstacles.is_empty());
        assert!(state.pickups.is_empty());
        assert_eq!(state.obstacle_timer, 0);
    }
}
