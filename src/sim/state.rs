//! Session state and the side effects a tick asks the shell to perform

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Coin, CoinEffect, Shark, SplashEffect};
use super::wave::WaveField;
use crate::player_position;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the first tap
    #[default]
    Title,
    /// Simulation running
    Playing,
    /// Frozen until the next tap re-initializes
    GameOver,
}

/// One-shot sounds the simulation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    GameStart,
    GameOver,
    ScoreUp,
    WaveRelease,
}

/// Usage-log actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryAction {
    Initialize,
    StartGame,
    Playing,
    GameOver,
}

impl TelemetryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryAction::Initialize => "initialize",
            TelemetryAction::StartGame => "start_game",
            TelemetryAction::Playing => "playing",
            TelemetryAction::GameOver => "game_over",
        }
    }
}

/// Side effect requested during a tick, performed by the shell afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Rewind and start the background loop
    MusicRestart,
    MusicPause,
    Telemetry {
        action: TelemetryAction,
        ticks: Option<u64>,
        score: Option<u64>,
    },
}

/// The single mutable game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub mode: GameMode,
    /// Ticks since the current mode was entered
    pub ticks_in_mode: u64,
    pub score: u64,
    /// Charging flag, set by a tap and cleared by the release
    pub charging: bool,
    /// Accumulated amplitude of the next released wave
    pub charge_height: f64,
    /// Swimmer's lift above the baseline
    pub player_height: f64,
    pub waves: WaveField,
    pub coins: Vec<Coin>,
    pub sharks: Vec<Shark>,
    pub coin_effects: Vec<CoinEffect>,
    pub splash_effects: Vec<SplashEffect>,
    /// Side effects not yet handed to the shell
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A freshly initialized session on the title screen
    pub fn new() -> Self {
        let mut session = Self {
            mode: GameMode::Title,
            ticks_in_mode: 0,
            score: 0,
            charging: false,
            charge_height: 0.0,
            player_height: 0.0,
            waves: WaveField::new(),
            coins: Vec::new(),
            sharks: Vec::new(),
            coin_effects: Vec::new(),
            splash_effects: Vec::new(),
            events: Vec::new(),
        };
        session.initialize();
        session
    }

    /// Clear everything and return to the title tableau
    pub fn initialize(&mut self) {
        self.emit(GameEvent::Telemetry {
            action: TelemetryAction::Initialize,
            ticks: None,
            score: None,
        });

        self.mode = GameMode::Title;
        self.ticks_in_mode = 0;
        self.charging = false;
        self.charge_height = 0.0;
        self.score = 0;
        self.coins.clear();
        self.sharks.clear();
        self.coin_effects.clear();
        self.splash_effects.clear();

        self.waves = WaveField::title_tableau();
        self.player_height = self.waves.surface_height(crate::consts::SCREEN_CENTER_X);
    }

    /// Switch mode and restart the mode clock
    pub fn enter(&mut self, mode: GameMode) {
        log::debug!("Mode {:?} -> {:?} after {} ticks", self.mode, mode, self.ticks_in_mode);
        self.mode = mode;
        self.ticks_in_mode = 0;
    }

    pub fn player_position(&self) -> DVec2 {
        player_position(self.player_height)
    }

    /// Surface height at the centre column
    pub fn surface_at_player(&self) -> f64 {
        self.waves.surface_height(crate::consts::SCREEN_CENTER_X)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    #[cfg(test)]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand all queued side effects to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
