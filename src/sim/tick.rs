//! Fixed-rate frame step
//!
//! Drives the lifecycle state machine and, while playing, the per-frame
//! pipeline: input, player, entities, spawning, collisions, difficulty.

use std::ops::ControlFlow;

use super::collision::resolve_collisions;
use super::difficulty::advance_difficulty;
use super::entities::Direction;
use super::spawner::{Spawner, TimedSpawner};
use super::state::{GamePhase, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held this frame
    pub move_left: bool,
    /// Held this frame
    pub move_right: bool,
    /// Boost key went down this frame
    pub boost_down: bool,
    /// Boost key went up this frame
    pub boost_up: bool,
    /// Start from the title screen
    pub start: bool,
    /// Restart after game over
    pub restart: bool,
    /// Quit from the game over screen
    pub quit: bool,
    /// Window/terminal close, honoured in every phase
    pub close: bool,
}

/// Advance one frame with the standard timed spawner
pub fn tick(state: &mut GameState, input: &TickInput) -> ControlFlow<()> {
    tick_with(state, input, &TimedSpawner)
}

/// Advance one frame using the given spawn policy.
///
/// Returns `Break` when the game should exit; the frame's side effects
/// have already been applied by then.
pub fn tick_with(state: &mut GameState, input: &TickInput, spawner: &impl Spawner) -> ControlFlow<()> {
    if input.close {
        return ControlFlow::Break(());
    }

    // Commands that do not apply to the current phase are ignored
    match state.phase {
        GamePhase::NotStarted => {
            if input.start {
                state.start();
            } else {
                state.grid.update(0.5);
                return ControlFlow::Continue(());
            }
        }
        GamePhase::GameOver => {
            if input.quit {
                log::info!("Quit requested");
                return ControlFlow::Break(());
            }
            if input.restart {
                state.start();
            } else {
                return ControlFlow::Continue(());
            }
        }
        GamePhase::Playing => {}
    }

    step_playing(state, input, spawner);
    ControlFlow::Continue(())
}

fn step_playing(state: &mut GameState, input: &TickInput, spawner: &impl Spawner) {
    if input.boost_down {
        state.player.activate_boost();
    }
    if input.boost_up {
        state.player.deactivate_boost();
    }
    if input.move_left {
        state.player.move_toward(Direction::Left);
    }
    if input.move_right {
        state.player.move_toward(Direction::Right);
    }

    state.player.update();

    state.obstacles.retain_mut(|obstacle| {
        obstacle.update();
        !obstacle.is_off_screen()
    });
    state.pickups.retain_mut(|pickup| {
        pickup.update();
        !pickup.is_off_screen()
    });
    state.particles.retain_mut(|particle| {
        particle.update();
        !particle.is_dead()
    });

    spawner.spawn(state);

    let collisions = resolve_collisions(state);
    if collisions.crashed {
        return;
    }

    advance_difficulty(state);
    state.grid.update(state.game_speed / 5.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawner::NoSpawner;
    use crate::sim::state::GameEvent;

    fn start_input() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_not_started_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::NotStarted);

        // Without start stays on the title screen
        let flow = tick(&mut state, &TickInput::default());
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(state.phase, GamePhase::NotStarted);

        tick(&mut state, &start_input());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.take_events(), vec![GameEvent::GameStarted]);
    }

    #[test]
    fn test_title_screen_ignores_gameplay_input() {
        let mut state = GameState::new(1);
        let x = state.player.pos.x;
        let input = TickInput {
            move_left: true,
            restart: true,
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input), ControlFlow::Continue(()));
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn test_restart_while_playing_ignored() {
        let mut state = GameState::new(2);
        tick_with(&mut state, &start_input(), &NoSpawner);
        state.score = 5;
        let input = TickInput {
            restart: true,
            start: true,
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick_with(&mut state, &input, &NoSpawner), ControlFlow::Continue(()));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = GameState::new(3);
        tick_with(&mut state, &start_input(), &NoSpawner);
        state.end_run();
        state.spawn_obstacle();
        let before = state.obstacles[0].pos;
        let particles = state.particles.len();

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.obstacles[0].pos, before);
        assert_eq!(state.particles.len(), particles);
    }

    #[test]
    fn test_restart_and_quit_from_game_over() {
        let mut state = GameState::new(4);
        tick_with(&mut state, &start_input(), &NoSpawner);
        state.end_run();

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick_with(&mut state, &restart, &NoSpawner);
        assert_eq!(state.phase, GamePhase::Playing);

        state.end_run();
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &quit), ControlFlow::Break(()));
    }

    #[test]
    fn test_close_in_any_phase() {
        let close = TickInput {
            close: true,
            ..Default::default()
        };
        let mut state = GameState::new(5);
        assert_eq!(tick(&mut state, &close), ControlFlow::Break(()));
        tick(&mut state, &start_input());
        assert_eq!(tick(&mut state, &close), ControlFlow::Break(()));
    }

    #[test]
    fn test_boost_edges() {
        let mut state = GameState::new(6);
        tick_with(&mut state, &start_input(), &NoSpawner);
        state.player.boost_meter = 50.0;

        let down = TickInput {
            boost_down: true,
            ..Default::default()
        };
        tick_with(&mut state, &down, &NoSpawner);
        assert!(state.player.is_boosting());

        let up = TickInput {
            boost_up: true,
            ..Default::default()
        };
        tick_with(&mut state, &up, &NoSpawner);
        assert!(!state.player.is_boosting());
    }

    #[test]
    fn test_offscreen_entities_culled() {
        let mut state = GameState::new(7);
        tick_with(&mut state, &start_input(), &NoSpawner);
        state.spawn_obstacle();
        state.spawn_pickup();
        state.obstacles[0].pos.x = 0.0;
        state.obstacles[0].pos.y = SCREEN_HEIGHT - 1.0;
        state.pickups[0].pos.x = SCREEN_WIDTH - PICKUP_RADIUS;
        state.pickups[0].pos.y = SCREEN_HEIGHT + PICKUP_RADIUS;
        // Keep the player clear of both
        state.player.pos.x = SCREEN_WIDTH / 2.0;

        tick_with(&mut state, &TickInput::default(), &NoSpawner);
        assert!(state.obstacles.is_empty());
        assert!(state.pickups.is_empty());
    }
}
