//! Demo player for headless runs
//!
//! Watches the session and drives a virtual pointer: taps through the title
//! and game over screens, and times charges so a released wave reaches the
//! centre as the next coin does.

use super::input::{InputSource, PointerInput};
use crate::consts::*;
use crate::sim::{GameMode, Session};

/// Ticks to wait after a release before charging again
const COOLDOWN_TICKS: u32 = 30;
/// Slack allowed when lining up a charge with a coin's arrival
const TIMING_WINDOW: f64 = 20.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pointer: PointerInput,
    hold_target: u32,
    held_ticks: u32,
    cooldown: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this tick's pointer state from what the session looks like now
    pub fn observe(&mut self, session: &Session) {
        self.pointer.end_tick();

        match session.mode {
            GameMode::Title => self.tap(),
            GameMode::GameOver => {
                if session.ticks_in_mode >= GAME_OVER_DELAY {
                    self.tap();
                }
            }
            GameMode::Playing => self.play(session),
        }
    }

    /// Press on one tick, release on the next
    fn tap(&mut self) {
        if self.pointer.is_held() {
            self.pointer.release();
        } else {
            self.pointer.press();
        }
    }

    fn play(&mut self, session: &Session) {
        if self.pointer.is_held() {
            self.held_ticks += 1;
            if !session.charging || self.held_ticks >= self.hold_target {
                self.pointer.release();
                self.cooldown = COOLDOWN_TICKS;
            }
            return;
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
            return;
        }

        if let Some(hold) = self.plan_charge(session) {
            self.hold_target = hold;
            self.held_ticks = 0;
            self.pointer.press();
        }
    }

    /// Charge length for the next reachable coin, if now is the time to start
    fn plan_charge(&self, session: &Session) -> Option<u32> {
        let wave_travel = (SCREEN_CENTER_X - PLAYER_WAVE_ENTRY_X) / WAVE_SPEED;

        session
            .coins
            .iter()
            .filter(|c| (c.velocity_x > 0.0) == (c.pos.x < SCREEN_CENTER_X))
            .filter_map(|c| {
                let lift = (SURFACE_BASELINE - c.pos.y).clamp(0.0, MAX_CHARGE);
                let hold = (lift / CHARGE_RATE).ceil();
                let arrival = (SCREEN_CENTER_X - c.pos.x).abs() / c.velocity_x.abs();
                let slack = arrival - wave_travel - hold;
                (0.0..TIMING_WINDOW).contains(&slack).then_some(hold as u32)
            })
            .min()
    }
}

impl InputSource for Autopilot {
    fn just_activated(&self) -> bool {
        self.pointer.just_activated()
    }

    fn just_released(&self) -> bool {
        self.pointer.just_released()
    }

    fn is_held(&self) -> bool {
        self.pointer.is_held()
    }
}
