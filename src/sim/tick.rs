//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Anything the
//! outside world has to do (sounds, music, usage logging) is queued on the
//! session as a `GameEvent` rather than performed here.

use super::collision::{collect_coins, just_landed, shark_strike};
use super::entity::{
    Coin, CoinEffect, Shark, advance_coin_effects, advance_coins, advance_sharks,
    advance_splash_effects, splash_burst,
};
use super::rng::RandomSource;
use super::state::{GameEvent, GameMode, Session, SoundCue, TelemetryAction};
use super::wave::{AMBIENT_WAVES, WavePulse};
use crate::consts::*;
use crate::platform::InputSource;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Pointer went down this tick (tap / click / key press)
    pub activate: bool,
    /// Pointer went up this tick
    pub release: bool,
    /// Pointer is currently down
    pub held: bool,
}

impl TickInput {
    /// Sample an input source once
    pub fn poll(source: &dyn InputSource) -> Self {
        Self {
            activate: source.just_activated(),
            release: source.just_released(),
            held: source.is_held(),
        }
    }

    pub fn press() -> Self {
        Self {
            activate: true,
            release: false,
            held: true,
        }
    }

    pub fn hold() -> Self {
        Self {
            activate: false,
            release: false,
            held: true,
        }
    }

    pub fn release() -> Self {
        Self {
            activate: false,
            release: true,
            held: false,
        }
    }
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, rng: &mut impl RandomSource) {
    session.ticks_in_mode += 1;

    match session.mode {
        GameMode::Title => {
            if input.activate {
                start_run(session);
            }
        }
        GameMode::Playing => play(session, input, rng),
        GameMode::GameOver => {
            if session.ticks_in_mode > GAME_OVER_DELAY && input.activate {
                session.initialize();
                session.emit(GameEvent::MusicPause);
            }
        }
    }
}

/// Title -> Playing
fn start_run(session: &mut Session) {
    session.enter(GameMode::Playing);
    session.waves.clear();
    session.player_height = 0.0;

    session.emit(GameEvent::Telemetry {
        action: TelemetryAction::StartGame,
        ticks: None,
        score: None,
    });
    session.emit(GameEvent::Sound(SoundCue::GameStart));
    session.emit(GameEvent::MusicRestart);
    log::info!("Run started");
}

fn play(session: &mut Session, input: &TickInput, rng: &mut impl RandomSource) {
    let ticks = session.ticks_in_mode;

    if ticks % TELEMETRY_PERIOD == 0 {
        session.emit(GameEvent::Telemetry {
            action: TelemetryAction::Playing,
            ticks: Some(ticks),
            score: Some(session.score),
        });
    }

    update_charge(session, input);

    for ambient in &AMBIENT_WAVES {
        if ambient.is_due(ticks) {
            session.waves.spawn(ambient.pulse());
        }
    }
    if ticks % COIN_PERIOD == 0 {
        session.coins.push(Coin::spawn(rng));
    }
    if ticks % SHARK_PERIOD == 0 {
        let shark = Shark::spawn(rng);
        log::debug!("Shark spawned at x={}", shark.pos.x);
        session.sharks.push(shark);
    }

    session.waves.tick();
    advance_coins(&mut session.coins);
    let target = session.player_position();
    advance_sharks(&mut session.sharks, target);

    let prev_height = session.player_height;
    session.player_height = session.surface_at_player();
    if just_landed(prev_height, session.player_height) {
        let drops = splash_burst(prev_height, rng);
        session.splash_effects.extend(drops);
    }

    advance_coin_effects(&mut session.coin_effects);
    advance_splash_effects(&mut session.splash_effects);

    for pickup in collect_coins(&mut session.coins, session.player_height) {
        session.score += u64::from(pickup.plus);
        session
            .coin_effects
            .push(CoinEffect::new(pickup.pos, pickup.plus));
        session.emit(GameEvent::Sound(SoundCue::ScoreUp));
    }

    if shark_strike(&session.sharks, session.player_height).is_some() {
        session.emit(GameEvent::Telemetry {
            action: TelemetryAction::GameOver,
            ticks: Some(ticks),
            score: Some(session.score),
        });
        session.enter(GameMode::GameOver);
        // A charge in progress dies with the run
        session.charging = false;
        session.charge_height = 0.0;
        session.emit(GameEvent::Sound(SoundCue::GameOver));
        log::info!("Game over with score {}", session.score);
    }
}

/// Grow, start or release the charge
fn update_charge(session: &mut Session, input: &TickInput) {
    if session.charging && input.held {
        session.charge_height = (session.charge_height + CHARGE_RATE).min(MAX_CHARGE);
    }

    if input.activate {
        session.charging = true;
        session.charge_height = 0.0;
    }

    if input.release {
        if session.charging {
            let amplitude = session.charge_height;
            session.waves.spawn(WavePulse::released(amplitude));
            if amplitude > RELEASE_SOUND_THRESHOLD {
                session.emit(GameEvent::Sound(SoundCue::WaveRelease));
            }
        }
        session.charging = false;
        session.charge_height = 0.0;
    }
}
