//! HUD and overlay text
//!
//! Builds positioned text lines in terminal cells; writing them out is left
//! to the renderer so the layout can be tested without a terminal.

use super::canvas::Rgb;
use super::shapes::neon_rgb;
use crate::sim::{GamePhase, NeonColor, Snapshot};

/// Brightness left on the playfield behind an overlay
pub const OVERLAY_DIM: f32 = 55.0 / 255.0;

/// One line of text at a terminal cell position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub color: Rgb,
    pub bold: bool,
}

impl TextLine {
    fn at(col: u16, row: u16, text: impl Into<String>, color: Rgb) -> Self {
        Self {
            col,
            row,
            text: text.into(),
            color,
            bold: false,
        }
    }

    /// Horizontally centred on a row offset from the middle of the screen
    fn centered(cols: u16, rows: u16, row_offset: i32, text: impl Into<String>, color: Rgb) -> Self {
        let text = text.into();
        let len = text.chars().count() as u16;
        let col = cols.saturating_sub(len) / 2;
        let row = (rows as i32 / 2 + row_offset).clamp(0, rows.saturating_sub(1) as i32) as u16;
        Self::at(col, row, text, color)
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Score, best and speed readouts
pub fn hud_lines(snapshot: &Snapshot<'_>, fps: Option<f32>, cols: u16) -> Vec<TextLine> {
    let mut lines = vec![TextLine::at(2, 1, format!("Score: {}", snapshot.score), Rgb::WHITE).bold()];
    if snapshot.high_score > 0 {
        lines.push(TextLine::at(
            2,
            2,
            format!("Best: {}", snapshot.high_score),
            neon_rgb(NeonColor::Yellow),
        ));
    }

    let speed = format!("Speed: {}", snapshot.game_speed.trunc() as u32);
    let col = cols.saturating_sub(speed.len() as u16 + 2);
    lines.push(TextLine::at(col, 1, speed, neon_rgb(NeonColor::Lime)));

    if let Some(fps) = fps {
        let text = format!("{fps:.0} FPS");
        let col = cols.saturating_sub(text.len() as u16 + 2);
        lines.push(TextLine::at(col, 2, text, Rgb(128, 128, 128)));
    }
    lines
}

/// Start screen (title, controls, prompt)
pub fn start_screen_lines(cols: u16, rows: u16) -> Vec<TextLine> {
    vec![
        TextLine::centered(cols, rows, -4, "N E O N   D A S H", neon_rgb(NeonColor::Cyan)).bold(),
        TextLine::centered(cols, rows, 0, "Arrow keys / A D to move", Rgb::WHITE),
        TextLine::centered(cols, rows, 1, "Space for boost", neon_rgb(NeonColor::Yellow)),
        TextLine::centered(cols, rows, 4, "Press ENTER to start", neon_rgb(NeonColor::Magenta)).bold(),
    ]
}

/// Game over overlay with the final score
pub fn game_over_lines(score: u32, cols: u16, rows: u16) -> Vec<TextLine> {
    vec![
        TextLine::centered(cols, rows, -4, "G A M E   O V E R", neon_rgb(NeonColor::Magenta)).bold(),
        TextLine::centered(cols, rows, 0, format!("Score: {score}"), neon_rgb(NeonColor::Cyan)).bold(),
        TextLine::centered(cols, rows, 2, "Press R to restart", Rgb::WHITE),
        TextLine::centered(cols, rows, 3, "Press Q to quit", Rgb::WHITE),
    ]
}

/// Every text line for the current phase
pub fn frame_lines(snapshot: &Snapshot<'_>, fps: Option<f32>, cols: u16, rows: u16) -> Vec<TextLine> {
    match snapshot.phase {
        GamePhase::NotStarted => start_screen_lines(cols, rows),
        GamePhase::Playing => hud_lines(snapshot, fps, cols),
        GamePhase::GameOver => {
            let mut lines = hud_lines(snapshot, fps, cols);
            lines.extend(game_over_lines(snapshot.score, cols, rows));
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    fn texts(lines: &[TextLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_best_hidden_until_nonzero() {
        let mut state = GameState::new(1);
        state.start();
        let lines = hud_lines(&state.snapshot(), None, 80);
        assert!(!texts(&lines).iter().any(|t| t.starts_with("Best")));

        state.high_score = 7;
        let lines = hud_lines(&state.snapshot(), None, 80);
        assert!(texts(&lines).contains(&"Best: 7"));
    }

    #[test]
    fn test_speed_shows_integer_part() {
        let mut state = GameState::new(1);
        state.start();
        state.game_speed = 6.5;
        let lines = hud_lines(&state.snapshot(), None, 80);
        assert!(texts(&lines).contains(&"Speed: 6"));
    }

    #[test]
    fn test_fps_readout_optional() {
        let state = GameState::new(1);
        let lines = hud_lines(&state.snapshot(), Some(59.6), 80);
        assert!(texts(&lines).contains(&"60 FPS"));
    }

    #[test]
    fn test_phase_selects_overlay() {
        let mut state = GameState::new(1);
        let start = frame_lines(&state.snapshot(), None, 80, 24);
        assert!(texts(&start).contains(&"Press ENTER to start"));

        state.start();
        state.score = 12;
        state.end_run();
        let over = frame_lines(&state.snapshot(), None, 80, 24);
        let over = texts(&over);
        assert!(over.contains(&"Score: 12"));
        assert!(over.contains(&"Press R to restart"));
        assert!(over.contains(&"Press Q to quit"));
    }

    #[test]
    fn test_centered_lines_fit_tiny_terminal() {
        for line in game_over_lines(3, 10, 3) {
            assert!(line.row < 3);
        }
    }
}
