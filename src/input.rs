//! Terminal input
//!
//! Folds crossterm key events into one `TickInput` per frame. Movement and
//! boost are held keys; start, restart and quit are edge commands.
//!
//! Many terminals never report key releases. Until a release event has
//! been seen, a held key is considered released once no press or repeat
//! for it has arrived within `HOLD_GRACE`.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// How long a key counts as held after its last press/repeat when the
/// terminal does not report releases (covers the typical repeat delay)
pub const HOLD_GRACE: Duration = Duration::from_millis(450);

/// Logical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    Boost,
    Start,
    Restart,
    Quit,
    Close,
}

impl GameKey {
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')).then_some(GameKey::Close);
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameKey::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameKey::Right),
            KeyCode::Char(' ') => Some(GameKey::Boost),
            KeyCode::Enter => Some(GameKey::Start),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(GameKey::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameKey::Quit),
            KeyCode::Esc => Some(GameKey::Close),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    down: bool,
    last_seen: Option<Instant>,
}

impl HeldKey {
    /// Returns true on the transition from up to down
    fn press(&mut self, now: Instant) -> bool {
        let was_down = self.down;
        self.down = true;
        self.last_seen = Some(now);
        !was_down
    }

    /// Returns true on the transition from down to up
    fn release(&mut self) -> bool {
        let was_down = self.down;
        self.down = false;
        self.last_seen = None;
        was_down
    }

    fn expired(&self, now: Instant) -> bool {
        self.down
            && self
                .last_seen
                .is_some_and(|seen| now.saturating_duration_since(seen) > HOLD_GRACE)
    }
}

/// Accumulates key events between frames
#[derive(Debug, Default)]
pub struct InputTracker {
    left: HeldKey,
    right: HeldKey,
    boost: HeldKey,
    /// Edge commands waiting for the next frame
    pending: TickInput,
    /// Terminal has reported at least one key release
    release_events: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether real key-release events are available
    pub fn has_release_events(&self) -> bool {
        self.release_events
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        if let Event::Key(key) = event {
            self.handle_key(key, now);
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release && !self.release_events {
            log::debug!("Terminal reports key releases");
            self.release_events = true;
        }
        let Some(game_key) = GameKey::from_key_event(key) else {
            return;
        };

        if key.kind == KeyEventKind::Release {
            match game_key {
                GameKey::Left => {
                    self.left.release();
                }
                GameKey::Right => {
                    self.right.release();
                }
                GameKey::Boost => {
                    if self.boost.release() {
                        self.pending.boost_up = true;
                    }
                }
                _ => {}
            }
            return;
        }

        // Press or Repeat
        match game_key {
            GameKey::Left => {
                self.left.press(now);
            }
            GameKey::Right => {
                self.right.press(now);
            }
            GameKey::Boost => {
                if self.boost.press(now) {
                    self.pending.boost_down = true;
                }
            }
            GameKey::Start if key.kind == KeyEventKind::Press => self.pending.start = true,
            GameKey::Restart if key.kind == KeyEventKind::Press => self.pending.restart = true,
            GameKey::Quit if key.kind == KeyEventKind::Press => self.pending.quit = true,
            GameKey::Close => self.pending.close = true,
            _ => {}
        }
    }

    /// Build this frame's input and clear the edge commands
    pub fn frame_input(&mut self, now: Instant) -> TickInput {
        if !self.release_events {
            if self.left.expired(now) {
                self.left.release();
            }
            if self.right.expired(now) {
                self.right.release();
            }
            if self.boost.expired(now) && self.boost.release() {
                self.pending.boost_up = true;
            }
        }

        let input = TickInput {
            move_left: self.left.down,
            move_right: self.right.down,
            ..self.pending
        };
        self.pending = TickInput::default();
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_edge_commands_fire_once() {
        let mut tracker = InputTracker::new();
        let now = Instant::now();
        tracker.handle_key(&key(KeyCode::Enter, KeyEventKind::Press), now);
        let input = tracker.frame_input(now);
        assert!(input.start);
        assert!(!tracker.frame_input(now).start);
    }

    #[test]
    fn test_held_movement_with_release_events() {
        let mut tracker = InputTracker::new();
        let now = Instant::now();
        tracker.handle_key(&key(KeyCode::Left, KeyEventKind::Press), now);
        assert!(tracker.frame_input(now).move_left);
        // Still held much later: a release-reporting terminal would tell us
        tracker.handle_key(&key(KeyCode::Char('x'), KeyEventKind::Release), now);
        assert!(tracker.frame_input(now + Duration::from_secs(2)).move_left);

        tracker.handle_key(&key(KeyCode::Left, KeyEventKind::Release), now);
        assert!(!tracker.frame_input(now).move_left);
    }

    #[test]
    fn test_held_movement_expires_without_release_events() {
        let mut tracker = InputTracker::new();
        let now = Instant::now();
        tracker.handle_key(&key(KeyCode::Char('d'), KeyEventKind::Press), now);
        assert!(tracker.frame_input(now + Duration::from_millis(100)).move_right);
        assert!(!tracker.frame_input(now + HOLD_GRACE + Duration::from_millis(1)).move_right);
    }

    #[test]
    fn test_boost_down_up_edges() {
        let mut tracker = InputTracker::new();
        let now = Instant::now();
        tracker.handle_key(&key(KeyCode::Char(' '), KeyEventKind::Press), now);
        tracker.handle_key(&key(KeyCode::Char(' '), KeyEventKind::Repeat), now);
        let input = tracker.frame_input(now);
        assert!(input.boost_down);
        assert!(!input.boost_up);

        tracker.handle_key(&key(KeyCode::Char(' '), KeyEventKind::Release), now);
        let input = tracker.frame_input(now);
        assert!(input.boost_up);
        assert!(!input.boost_down);
    }

    #[test]
    fn test_boost_up_synthesised_after_grace() {
        let mut tracker = InputTracker::new();
        let now = Instant::now();
        tracker.handle_key(&key(KeyCode::Char(' '), KeyEventKind::Press), now);
        assert!(tracker.frame_input(now).boost_down);
        let later = now + HOLD_GRACE * 2;
        assert!(tracker.frame_input(later).boost_up);
    }

    #[test]
    fn test_ctrl_c_closes() {
        let mut tracker = InputTracker::new();
        let now = Instant::now();
        let ctrl_c = KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        tracker.handle_key(&ctrl_c, now);
        assert!(tracker.frame_input(now).close);
    }

    #[test]
    fn test_repeat_does_not_retrigger_commands() {
        let mut tracker = InputTracker::new();
        let now = Instant::now();
        tracker.handle_key(&key(KeyCode::Char('r'), KeyEventKind::Repeat), now);
        assert!(!tracker.frame_input(now).restart);
    }
}
