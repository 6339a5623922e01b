//! Neon Dash entry point
//!
//! Sets up the terminal and runs the fixed-rate frame loop.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};

use neon_dash::Settings;
use neon_dash::audio::AudioManager;
use neon_dash::consts::FPS;
use neon_dash::input::InputTracker;
use neon_dash::renderer::TerminalRenderer;
use neon_dash::sim::{GameState, tick};

/// Frames averaged by the FPS readout
const FPS_WINDOW: usize = 60;

/// Raw mode + alternate screen for the lifetime of the value
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, Drop restores the terminal even if setup fails
        let mut guard = Self {
            keyboard_enhanced: false,
        };
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide, terminal::DisableLineWrap)?;

        // Key release events, where the terminal supports them
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.keyboard_enhanced = true;
        } else {
            log::info!("Keyboard enhancement unavailable, using hold grace window");
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.keyboard_enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        if let Err(e) = execute!(out, terminal::LeaveAlternateScreen, cursor::Show, terminal::EnableLineWrap) {
            log::error!("Failed to leave alternate screen: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Failed to disable raw mode: {e}");
        }
    }
}

/// Ring buffer of frame start times
struct FpsCounter {
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
            fps: 0.0,
        }
    }

    fn record(&mut self, now: Instant) {
        let oldest = self.frame_times[self.frame_index].replace(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        if let Some(oldest) = oldest {
            let elapsed = now.saturating_duration_since(oldest).as_secs_f32();
            if elapsed > 0.0 {
                self.fps = FPS_WINDOW as f32 / elapsed;
            }
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::load();
    let mut state = match settings.seed {
        Some(seed) => GameState::new(seed),
        None => GameState::from_entropy(),
    };
    log::info!("Neon Dash starting with seed: {}", state.seed);

    let mut audio = AudioManager::new(&settings);
    let mut out = BufWriter::with_capacity(1 << 16, io::stdout());
    let _guard = TerminalGuard::enter(&mut out)?;

    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(cols, rows, &settings);
    let mut input = InputTracker::new();
    let mut fps = FpsCounter::new();
    let frame_dur = Duration::from_secs(1) / FPS;

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Resize(c, r) = event {
                renderer.resize(c, r);
            }
            input.handle_event(&event, frame_start);
        }

        let flow = tick(&mut state, &input.frame_input(frame_start));
        for event in state.take_events() {
            audio.handle_event(event);
        }
        if flow.is_break() {
            break;
        }

        fps.record(frame_start);
        let shown_fps = settings.show_fps.then(|| fps.fps());
        renderer.render(&mut out, &state.snapshot(), shown_fps)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }

    log::info!("Neon Dash exiting (best score {})", state.high_score);
    Ok(())
}
