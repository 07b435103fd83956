//! Startup error types
//!
//! The simulation itself never fails; these cover what the shell has to
//! set up before the first tick.

use std::path::PathBuf;
use thiserror::Error;

/// Startup result type alias.
pub type StartupResult<T> = Result<T, StartupError>;

/// Failure while bringing the game up.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Settings file could not be read.
    #[error("Failed to read settings from {}: {source}", path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for `Settings`.
    #[error("Invalid settings in {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Telemetry output file could not be opened.
    #[error("Failed to open telemetry file {}: {source}", path.display())]
    TelemetryOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A background worker thread could not be started.
    #[error("Failed to spawn {worker} worker: {source}")]
    WorkerSpawn {
        worker: &'static str,
        #[source]
        source: std::io::Error,
    },
}
