//! Audio system using rodio
//!
//! Procedurally generated sound effects - no external files needed!
//! Audio is strictly best-effort: if no output device can be opened at
//! startup the manager stays silent for the rest of the process.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Output sample rate for generated buffers
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// New run started
    GameStart,
    /// Pickup collected
    PickupCollect,
    /// Player hit an obstacle
    Crash,
}

impl SoundEffect {
    /// Render the effect into a mono buffer
    pub fn samples(self, sample_rate: u32) -> Vec<f32> {
        match self {
            SoundEffect::GameStart => render(&start_tones(), sample_rate),
            SoundEffect::PickupCollect => render(&pickup_tones(), sample_rate),
            SoundEffect::Crash => render(&crash_tones(), sample_rate),
        }
    }
}

/// Oscillator shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

impl Waveform {
    /// Sample at `phase` (in cycles, any real value)
    fn sample(self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (p * std::f32::consts::TAU).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * p - 1.0,
        }
    }
}

/// One oscillator voice with exponential pitch and gain ramps
#[derive(Debug, Clone, Copy)]
struct Tone {
    wave: Waveform,
    /// Offset from buffer start (seconds)
    start: f32,
    /// Length of the pitch/gain ramps (seconds)
    ramp: f32,
    /// Voice length (seconds)
    stop: f32,
    freq: (f32, f32),
    gain: f32,
}

impl Tone {
    const fn new(wave: Waveform, start: f32, ramp: f32, stop: f32, freq: (f32, f32), gain: f32) -> Self {
        Self {
            wave,
            start,
            ramp,
            stop,
            freq,
            gain,
        }
    }
}

/// Exponential interpolation from `a` to `b`, holding `b` past the end
fn exp_ramp(a: f32, b: f32, t: f32, duration: f32) -> f32 {
    let u = (t / duration).clamp(0.0, 1.0);
    a * (b / a).powf(u)
}

fn render(tones: &[Tone], sample_rate: u32) -> Vec<f32> {
    let sr = sample_rate as f32;
    let total = tones
        .iter()
        .map(|tone| tone.start + tone.stop)
        .fold(0.0, f32::max);
    let mut samples = vec![0.0f32; (total * sr).ceil() as usize];

    for tone in tones {
        let first = (tone.start * sr) as usize;
        let count = (tone.stop * sr) as usize;
        let mut phase = 0.0f32;
        for (i, out) in samples.iter_mut().skip(first).take(count).enumerate() {
            let t = i as f32 / sr;
            let freq = exp_ramp(tone.freq.0, tone.freq.1, t, tone.ramp);
            let gain = exp_ramp(tone.gain, 0.01, t, tone.ramp);
            *out += tone.wave.sample(phase) * gain;
            phase += freq / sr;
        }
    }

    for s in &mut samples {
        *s = s.clamp(-1.0, 1.0);
    }
    samples
}

/// Rising three-note chime
fn pickup_tones() -> Vec<Tone> {
    [600.0, 800.0, 1000.0]
        .iter()
        .enumerate()
        .map(|(i, &f)| Tone::new(Waveform::Sine, i as f32 * 0.08, 0.15, 0.2, (f, f), 0.25))
        .collect()
}

/// Low sawtooth boom with a short square crack on top
fn crash_tones() -> Vec<Tone> {
    vec![
        Tone::new(Waveform::Sawtooth, 0.0, 0.4, 0.5, (100.0, 30.0), 0.5),
        Tone::new(Waveform::Square, 0.0, 0.1, 0.15, (1500.0, 1500.0), 0.2),
    ]
}

/// Upward whoosh
fn start_tones() -> Vec<Tone> {
    vec![Tone::new(Waveform::Triangle, 0.0, 0.2, 0.25, (200.0, 600.0), 0.3)]
}

/// Synthwave arpeggio over a sawtooth bass, four seconds, loops cleanly
pub fn music_loop_samples(sample_rate: u32) -> Vec<f32> {
    const BASS: [f32; 4] = [110.0, 87.31, 130.81, 98.0];
    const ARP: [f32; 4] = [2.0, 3.0, 4.0, 3.0];
    const BAR: f32 = 1.0;
    const STEP: f32 = BAR / 8.0;

    let mut tones = Vec::with_capacity(BASS.len() * 9);
    for (bar, &root) in BASS.iter().enumerate() {
        let bar_start = bar as f32 * BAR;
        tones.push(Tone::new(Waveform::Sawtooth, bar_start, BAR, BAR, (root, root), 0.12));
        for step in 0..8 {
            let f = root * ARP[step % ARP.len()];
            tones.push(Tone::new(
                Waveform::Triangle,
                bar_start + step as f32 * STEP,
                STEP,
                STEP,
                (f, f),
                0.15,
            ));
        }
    }
    let mut samples = render(&tones, sample_rate);
    samples.truncate((BASS.len() as f32 * BAR * sample_rate as f32) as usize);
    samples
}

/// Open output device
struct Backend {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Backend>,
    /// Decided once at startup; every playback call checks it first
    available: bool,
    sfx_volume: f32,
    music_volume: f32,
    music: Option<Sink>,
    /// Playback failures are reported once
    warned: bool,
}

impl AudioManager {
    /// Try to open the default output device
    pub fn new(settings: &Settings) -> Self {
        let backend = match OutputStream::try_default() {
            Ok((stream, handle)) => {
                log::info!("Audio output opened");
                Some(Backend {
                    _stream: stream,
                    handle,
                })
            }
            Err(e) => {
                log::warn!("No audio output ({e}) - audio disabled");
                None
            }
        };
        Self::with_backend(backend, settings)
    }

    /// Silent manager (headless runs, tests)
    pub fn disabled(settings: &Settings) -> Self {
        Self::with_backend(None, settings)
    }

    fn with_backend(backend: Option<Backend>, settings: &Settings) -> Self {
        Self {
            available: backend.is_some(),
            backend,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music: None,
            warned: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.is_some()
    }

    /// React to a simulation event
    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameStarted => {
                self.play(SoundEffect::GameStart);
                self.start_music();
            }
            GameEvent::PickupCollected { .. } => self.play(SoundEffect::PickupCollect),
            GameEvent::Crashed { .. } => {
                self.stop_music();
                self.play(SoundEffect::Crash);
            }
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.available || self.sfx_volume <= 0.0 {
            return;
        }
        let samples = effect.samples(SAMPLE_RATE);
        let volume = self.sfx_volume;
        if let Some(sink) = self.new_sink() {
            sink.set_volume(volume);
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }

    /// Start the background loop (restarts it if already playing)
    pub fn start_music(&mut self) {
        self.stop_music();
        if !self.available || self.music_volume <= 0.0 {
            return;
        }
        let volume = self.music_volume;
        if let Some(sink) = self.new_sink() {
            sink.set_volume(volume);
            let source = SamplesBuffer::new(1, SAMPLE_RATE, music_loop_samples(SAMPLE_RATE));
            sink.append(source.repeat_infinite());
            self.music = Some(sink);
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }

    fn new_sink(&mut self) -> Option<Sink> {
        let backend = self.backend.as_ref()?;
        match Sink::try_new(&backend.handle) {
            Ok(sink) => Some(sink),
            Err(e) => {
                if !self.warned {
                    log::warn!("Audio playback failed: {e}");
                    self.warned = true;
                }
                None
            }
        }
    }
}
