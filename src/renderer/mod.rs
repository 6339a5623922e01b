//! Terminal rendering module
//!
//! Rasterises a `Snapshot` onto a half-block pixel canvas, then writes
//! HUD and overlay text on top of it.

pub mod canvas;
pub mod hud;
pub mod shapes;

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color},
};

pub use canvas::{Canvas, Rgb};
pub use hud::TextLine;
pub use shapes::Viewport;

use crate::settings::Settings;
use crate::sim::{GamePhase, Snapshot};

/// Owns the pixel canvas sized to the terminal
pub struct TerminalRenderer {
    canvas: Canvas,
    viewport: Viewport,
    cols: u16,
    rows: u16,
    trails: bool,
    particles: bool,
}

impl TerminalRenderer {
    pub fn new(cols: u16, rows: u16, settings: &Settings) -> Self {
        let mut renderer = Self {
            canvas: Canvas::new(0, 0),
            viewport: Viewport::fit(0, 0),
            cols: 0,
            rows: 0,
            trails: settings.trails,
            particles: settings.particles,
        };
        renderer.resize(cols, rows);
        renderer
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Handle terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let (w, h) = (cols as usize, rows as usize * 2);
        self.canvas.resize(w, h);
        self.viewport = Viewport::fit(w, h);
        log::debug!("Renderer resized to {cols}x{rows} cells ({w}x{h} px)");
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Rasterise the playfield for this frame
    pub fn compose(&mut self, snapshot: &Snapshot<'_>) {
        let vp = self.viewport;
        let canvas = &mut self.canvas;

        shapes::draw_grid(canvas, &vp, snapshot.grid);
        for obstacle in snapshot.obstacles {
            shapes::draw_obstacle(canvas, &vp, obstacle);
        }
        for pickup in snapshot.pickups {
            shapes::draw_pickup(canvas, &vp, pickup);
        }
        if snapshot.phase != GamePhase::GameOver {
            if self.trails {
                shapes::draw_trail(canvas, &vp, snapshot.player);
            }
            shapes::draw_player(canvas, &vp, snapshot.player);
        }
        if self.particles {
            for particle in snapshot.particles {
                shapes::draw_particle(canvas, &vp, particle);
            }
        }
        if snapshot.phase != GamePhase::Playing {
            canvas.dim(hud::OVERLAY_DIM);
        }
    }

    /// Compose and write a full frame, flushing `out`
    pub fn render(&mut self, out: &mut impl Write, snapshot: &Snapshot<'_>, fps: Option<f32>) -> io::Result<()> {
        self.compose(snapshot);
        self.canvas.write_to(out)?;
        for line in hud::frame_lines(snapshot, fps, self.cols, self.rows) {
            write_line(out, &line, self.cols)?;
        }
        queue!(out, style::ResetColor, style::SetAttribute(Attribute::Reset))?;
        out.flush()
    }
}

fn write_line(out: &mut impl Write, line: &TextLine, cols: u16) -> io::Result<()> {
    if line.col >= cols {
        return Ok(());
    }
    let room = (cols - line.col) as usize;
    let text: String = line.text.chars().take(room).collect();
    let Rgb(r, g, b) = line.color;
    queue!(
        out,
        cursor::MoveTo(line.col, line.row),
        style::SetBackgroundColor(Color::Black),
        style::SetForegroundColor(Color::Rgb { r, g, b }),
    )?;
    if line.bold {
        queue!(out, style::SetAttribute(Attribute::Bold))?;
    }
    queue!(out, style::Print(text), style::SetAttribute(Attribute::NormalIntensity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    fn lit_pixels(canvas: &Canvas) -> usize {
        (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.get(x, y) != Rgb::BLACK)
            .count()
    }

    #[test]
    fn test_canvas_tracks_terminal_size() {
        let mut renderer = TerminalRenderer::new(80, 24, &Settings::default());
        assert_eq!((renderer.canvas().width(), renderer.canvas().height()), (80, 48));
        renderer.resize(40, 10);
        assert_eq!((renderer.canvas().width(), renderer.canvas().height()), (40, 20));
        assert_eq!(renderer.size(), (40, 10));
    }

    #[test]
    fn test_player_hidden_after_crash() {
        let mut state = GameState::new(3);
        state.start();
        let mut renderer = TerminalRenderer::new(80, 30, &Settings::default());
        let vp = Viewport::fit(80, 60);
        let center = vp.point(state.player.center());
        let (x, y) = (center.x as usize, center.y as usize);

        renderer.compose(&state.snapshot());
        let playing = renderer.canvas().get(x, y);

        state.end_run();
        renderer.compose(&state.snapshot());
        let crashed = renderer.canvas().get(x, y);
        assert_ne!(playing, crashed);
    }

    #[test]
    fn test_particles_toggle() {
        let mut state = GameState::new(3);
        state.start();
        state.emit_burst(
            glam::Vec2::new(425.0, 225.0),
            crate::sim::NeonColor::Magenta,
            crate::sim::ParticleMode::Crash,
            50,
        );
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let mut without = TerminalRenderer::new(80, 30, &settings);
        let mut with = TerminalRenderer::new(80, 30, &Settings::default());
        without.compose(&state.snapshot());
        with.compose(&state.snapshot());
        assert!(lit_pixels(with.canvas()) > lit_pixels(without.canvas()));
    }

    #[test]
    fn test_render_writes_hud_text() {
        let mut state = GameState::new(3);
        state.start();
        let mut renderer = TerminalRenderer::new(60, 20, &Settings::default());
        let mut out = Vec::new();
        renderer.render(&mut out, &state.snapshot(), None).expect("render to memory");
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Speed: 5"));
    }
}
