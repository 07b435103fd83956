//! Wave Interference - charge waves, lift the swimmer, grab coins, dodge sharks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (wave field, entities, collisions, modes)
//! - `platform`: Input tracking, fixed timestep clock, autopilot
//! - `audio`: Fire-and-forget sound playback
//! - `telemetry`: Fire-and-forget usage logging
//! - `renderer`: CPU mesh renderer
//! - `app`: Application shell wiring the above together

pub mod app;
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use app::Game;
pub use error::StartupError;
pub use settings::{Config, Settings};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Name reported with every telemetry record
    pub const GAME_NAME: &str = "wave-interference";

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f64 = 640.0;
    pub const SCREEN_HEIGHT: f64 = 480.0;
    pub const SCREEN_CENTER_X: f64 = SCREEN_WIDTH / 2.0;
    /// Resting water line (two thirds down the screen)
    pub const SURFACE_BASELINE: f64 = 320.0;

    /// Horizontal speed of every travelling wave
    pub const WAVE_SPEED: f64 = 2.0;
    pub const COIN_SPEED: f64 = 1.0;
    pub const SHARK_SPEED: f64 = 0.5;
    /// Shark speed while homing = SHARK_SPEED * this
    pub const SHARK_ATTACK_MULTIPLIER: f64 = 2.5;
    /// Cruising sharks start homing inside this distance
    pub const SHARK_TRIGGER_RADIUS: f64 = 150.0;
    /// Sharks swim this far below the baseline
    pub const SHARK_DEPTH: f64 = 100.0;

    pub const PLAYER_RADIUS: f64 = 10.0;
    pub const COIN_RADIUS: f64 = 15.0;
    pub const SHARK_RADIUS: f64 = 10.0;

    /// Charge gained per tick while holding
    pub const CHARGE_RATE: f64 = 0.8;
    pub const MAX_CHARGE: f64 = 300.0;
    /// Releases weaker than this are silent
    pub const RELEASE_SOUND_THRESHOLD: f64 = 50.0;

    /// Player-released waves enter from the left
    pub const PLAYER_WAVE_ENTRY_X: f64 = -100.0;
    pub const PLAYER_WAVE_LENGTH: f64 = 200.0;

    pub const AMBIENT_WAVE_HEIGHT: f64 = 50.0;
    pub const AMBIENT_WAVE_LENGTH: f64 = 150.0;
    /// Ambient waves start this far outside their edge
    pub const AMBIENT_WAVE_MARGIN: f64 = 75.0;
    pub const AMBIENT_WAVE_PERIOD: u64 = 180;

    pub const COIN_PERIOD: u64 = 180;
    pub const SHARK_PERIOD: u64 = 630;
    /// Coins and sharks enter this far outside their edge
    pub const ENTRY_MARGIN: f64 = 50.0;
    pub const COIN_EXIT_MARGIN: f64 = 50.0;
    pub const SHARK_EXIT_MARGIN: f64 = 100.0;

    /// Coin popups float for this many ticks
    pub const COIN_EFFECT_TICKS: u32 = 60;
    pub const SPLASH_PARTICLES: usize = 10;
    pub const SPLASH_GRAVITY: f64 = 0.1;

    /// Playing heartbeat telemetry period
    pub const TELEMETRY_PERIOD: u64 = 600;
    /// GameOver ignores input until this many ticks have passed
    pub const GAME_OVER_DELAY: u64 = 15;
}

/// Position the swimmer is drawn and collides at, given its lift
#[inline]
pub fn player_position(player_height: f64) -> DVec2 {
    DVec2::new(consts::SCREEN_CENTER_X, consts::SURFACE_BASELINE - player_height)
}

/// Strict circle overlap: touching circles do not overlap
#[inline]
pub fn circles_overlap(a: DVec2, a_radius: f64, b: DVec2, b_radius: f64) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}
