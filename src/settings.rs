//! Game settings and runtime configuration
//!
//! `Settings` are user preferences persisted as JSON. `Config` is read from
//! the process environment once at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{StartupError, StartupResult};

/// Environment variable naming the settings file
pub const ENV_SETTINGS: &str = "WAVE_INTERFERENCE_SETTINGS";
/// `"1"` turns telemetry on
pub const ENV_LOGGING: &str = "GAME_LOGGING";
/// Append telemetry records to this file instead of the log
pub const ENV_TELEMETRY_FILE: &str = "WAVE_INTERFERENCE_TELEMETRY_FILE";
/// Integer seed for the simulation RNG
pub const ENV_RAND_SEED: &str = "GAME_RAND_SEED";
/// Headless run length in ticks
pub const ENV_RUN_TICKS: &str = "WAVE_INTERFERENCE_TICKS";

/// Run length when none is configured (one minute of play)
pub const DEFAULT_RUN_TICKS: u64 = 3600;

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Load from the file named by `WAVE_INTERFERENCE_SETTINGS`, or defaults
    pub fn load(config: &Config) -> StartupResult<Self> {
        match &config.settings_path {
            Some(path) => Self::load_from(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> StartupResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| StartupError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings =
            serde_json::from_str(&json).map_err(|source| StartupError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Startup configuration taken from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub telemetry_enabled: bool,
    /// JSON-lines destination; `None` writes through `log`
    pub telemetry_path: Option<PathBuf>,
    /// `None` means seed from the clock
    pub rand_seed: Option<u64>,
    pub run_ticks: u64,
    pub settings_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telemetry_enabled: false,
            telemetry_path: None,
            rand_seed: None,
            run_ticks: DEFAULT_RUN_TICKS,
            settings_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            telemetry_enabled: parse_logging_flag(lookup(ENV_LOGGING).as_deref()),
            telemetry_path: parse_path(lookup(ENV_TELEMETRY_FILE)),
            rand_seed: parse_seed(lookup(ENV_RAND_SEED).as_deref()),
            run_ticks: parse_run_ticks(lookup(ENV_RUN_TICKS).as_deref()),
            settings_path: parse_path(lookup(ENV_SETTINGS)),
        }
    }
}

/// Empty values count as unset
fn parse_path(value: Option<String>) -> Option<PathBuf> {
    value.filter(|p| !p.is_empty()).map(PathBuf::from)
}

/// Only the exact value `"1"` enables telemetry
pub fn parse_logging_flag(value: Option<&str>) -> bool {
    value == Some("1")
}

pub fn parse_seed(value: Option<&str>) -> Option<u64> {
    let raw = value?;
    match raw.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(e) => {
            log::warn!("Ignoring {}={:?} ({}), seeding from time", ENV_RAND_SEED, raw, e);
            None
        }
    }
}

pub fn parse_run_ticks(value: Option<&str>) -> u64 {
    let Some(raw) = value else {
        return DEFAULT_RUN_TICKS;
    };
    match raw.trim().parse::<u64>() {
        Ok(ticks) => ticks,
        Err(e) => {
            log::warn!(
                "Ignoring {}={:?} ({}), running {} ticks",
                ENV_RUN_TICKS,
                raw,
                e,
                DEFAULT_RUN_TICKS
            );
            DEFAULT_RUN_TICKS
        }
    }
}
