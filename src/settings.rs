//! Game settings and preferences
//!
//! Read once at startup from a JSON file, then overridden by environment
//! variables. A missing or broken file falls back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Background music loop while playing
    pub music: bool,

    // === Visual Effects ===
    /// Player trail
    pub trails: bool,
    /// Particle effects (crash and pickup bursts)
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music: true,

            trails: true,
            particles: true,

            show_fps: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Default settings file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "neon_dash.json";
    /// Overrides the settings file location
    pub const PATH_ENV: &'static str = "NEON_DASH_SETTINGS";
    pub const MUTE_ENV: &'static str = "NEON_DASH_MUTE";
    pub const SEED_ENV: &'static str = "NEON_DASH_SEED";

    /// Load settings, falling back to defaults on any error
    pub fn load() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME));

        let mut settings = if path.exists() {
            match Self::load_from(&path) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("{e}; using default settings");
                    Self::default()
                }
            }
        } else {
            log::info!("Using default settings");
            Self::default()
        };

        settings.apply_env(|key| std::env::var(key).ok());
        settings
    }

    /// Load and validate settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validated()
    }

    /// Reject non-finite volumes, clamp the rest into range
    pub fn validated(mut self) -> Result<Self, SettingsError> {
        for (field, volume) in [
            ("master_volume", &mut self.master_volume),
            ("sfx_volume", &mut self.sfx_volume),
            ("music_volume", &mut self.music_volume),
        ] {
            if !volume.is_finite() {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("{volume} is not a number in 0..=1"),
                });
            }
            if !(0.0..=1.0).contains(&*volume) {
                log::warn!("{field} {volume} out of range, clamping");
                *volume = volume.clamp(0.0, 1.0);
            }
        }
        Ok(self)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(mute) = lookup(Self::MUTE_ENV) {
            self.muted = matches!(mute.trim(), "1" | "true" | "yes" | "on");
        }
        if let Some(seed) = lookup(Self::SEED_ENV) {
            match seed.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring {}={seed:?}: not a u64", Self::SEED_ENV),
            }
        }
    }

    /// Effective sound-effect gain (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music gain (0 when muted or music disabled)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted || !self.music {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}
