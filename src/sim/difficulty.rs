//! Difficulty ramp
//!
//! Time is credited per frame (`1/FPS`), not from the wall clock, so the
//! ramp follows the number of simulated frames even if rendering stalls.

use super::state::GameState;
use crate::consts::*;

/// Frames between speed increases
pub const DIFFICULTY_INTERVAL_FRAMES: u32 = FPS * DIFFICULTY_INTERVAL_SECS;

/// Credit one frame; bump the speed when the interval elapses.
///
/// Returns true on the frame the speed increased.
pub fn advance_difficulty(state: &mut GameState) -> bool {
    state.difficulty_frames += 1;
    if state.difficulty_frames < DIFFICULTY_INTERVAL_FRAMES {
        return false;
    }

    state.difficulty_frames = 0;
    state.game_speed += SPEED_INCREMENT;
    log::debug!("Game speed increased to {:.1}", state.game_speed);
    true
}
