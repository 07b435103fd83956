//! Coins, sharks and the cosmetic effects that share their tick loop

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::rng::RandomSource;
use super::wave::Edge;
use crate::consts::*;

/// Pick an entry edge; `true` from the source means left
fn random_edge(rng: &mut impl RandomSource) -> Edge {
    if rng.next_bool() { Edge::Left } else { Edge::Right }
}

/// A coin drifting across the sky
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: DVec2,
    pub velocity_x: f64,
    pub radius: f64,
}

impl Coin {
    pub fn new(pos: DVec2, velocity_x: f64) -> Self {
        Self {
            pos,
            velocity_x,
            radius: COIN_RADIUS,
        }
    }

    /// Enter from a random edge at a random height above the baseline
    pub fn spawn(rng: &mut impl RandomSource) -> Self {
        let edge = random_edge(rng);
        let y = (SURFACE_BASELINE - 200.0) * rng.next_f64() + 50.0;
        Self::new(
            DVec2::new(edge.outside_x(ENTRY_MARGIN), y),
            COIN_SPEED * edge.inward_sign(),
        )
    }

    pub fn is_on_screen(&self) -> bool {
        self.pos.x > -COIN_EXIT_MARGIN && self.pos.x < SCREEN_WIDTH + COIN_EXIT_MARGIN
    }
}

/// Shark behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SharkState {
    /// Horizontal drift at base speed
    #[default]
    Cruising,
    /// Re-aims at the swimmer every tick
    Attacking,
}

/// A shark patrolling below the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shark {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub state: SharkState,
}

impl Shark {
    pub fn new(pos: DVec2, velocity_x: f64) -> Self {
        Self {
            pos,
            vel: DVec2::new(velocity_x, 0.0),
            radius: SHARK_RADIUS,
            state: SharkState::Cruising,
        }
    }

    /// Enter from a random edge at fixed depth, cruising
    pub fn spawn(rng: &mut impl RandomSource) -> Self {
        let edge = random_edge(rng);
        Self::new(
            DVec2::new(edge.outside_x(ENTRY_MARGIN), SURFACE_BASELINE + SHARK_DEPTH),
            SHARK_SPEED * edge.inward_sign(),
        )
    }

    pub fn is_attacking(&self) -> bool {
        self.state == SharkState::Attacking
    }

    /// Still heading toward `center_x` from its spawn side
    fn approaching(&self, center_x: f64) -> bool {
        (self.vel.x > 0.0 && self.pos.x < center_x) || (self.vel.x < 0.0 && self.pos.x > center_x)
    }

    /// Update state against the swimmer's position, then move one tick
    pub fn advance(&mut self, target: DVec2) {
        let d2 = self.pos.distance_squared(target);

        if d2 < SHARK_TRIGGER_RADIUS * SHARK_TRIGGER_RADIUS && self.approaching(target.x) {
            self.state = SharkState::Attacking;
        }

        if d2 < self.radius * self.radius {
            self.state = SharkState::Cruising;
            let dir = if self.vel.x > 0.0 { 1.0 } else { -1.0 };
            self.vel = DVec2::new(SHARK_SPEED * dir, 0.0);
        }

        if self.state == SharkState::Attacking {
            let to_target = target - self.pos;
            let theta = to_target.y.atan2(to_target.x);
            self.vel = SHARK_SPEED * SHARK_ATTACK_MULTIPLIER * DVec2::new(theta.cos(), theta.sin());
        }

        self.pos += self.vel;
    }

    pub fn is_on_screen(&self) -> bool {
        self.pos.x > -SHARK_EXIT_MARGIN && self.pos.x < SCREEN_WIDTH + SHARK_EXIT_MARGIN
    }
}

/// Floating "+N" popup where a coin was collected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinEffect {
    pub pos: DVec2,
    pub plus: u32,
    pub ticks: u32,
}

impl CoinEffect {
    pub fn new(pos: DVec2, plus: u32) -> Self {
        Self { pos, plus, ticks: 0 }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn is_alive(&self) -> bool {
        self.ticks < COIN_EFFECT_TICKS
    }

    /// Popup rises and falls back over its lifetime
    pub fn display_y(&self) -> f64 {
        let t = self.ticks as f64 / COIN_EFFECT_TICKS as f64;
        self.pos.y - 30.0 * (t * PI).sin()
    }
}

/// Ballistic water droplet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplashEffect {
    pub pos: DVec2,
    pub vel: DVec2,
    pub ticks: u32,
}

impl SplashEffect {
    pub fn advance(&mut self) {
        self.ticks += 1;
        self.vel.y += SPLASH_GRAVITY;
        self.pos += self.vel;
    }

    /// Droplets die when they fall back into the water
    pub fn is_alive(&self) -> bool {
        self.pos.y < SURFACE_BASELINE
    }
}

/// Droplets thrown up where the swimmer lands; faster for higher falls
pub fn splash_burst(fall_height: f64, rng: &mut impl RandomSource) -> Vec<SplashEffect> {
    let speed = 4.0 * fall_height.ln();
    let origin = DVec2::new(SCREEN_CENTER_X, SURFACE_BASELINE);
    (0..SPLASH_PARTICLES)
        .map(|_| {
            // Upward cone between 45 and 135 degrees
            let theta = -(FRAC_PI_4 + FRAC_PI_2 * rng.next_f64());
            SplashEffect {
                pos: origin,
                vel: speed * DVec2::new(theta.cos(), theta.sin()),
                ticks: 0,
            }
        })
        .collect()
}

/// Drift every coin and drop those past the far edge
pub fn advance_coins(coins: &mut Vec<Coin>) {
    for coin in coins.iter_mut() {
        coin.pos.x += coin.velocity_x;
    }
    coins.retain(Coin::is_on_screen);
}

/// Steer and move every shark relative to the swimmer, drop those past the far edge
pub fn advance_sharks(sharks: &mut Vec<Shark>, target: DVec2) {
    for shark in sharks.iter_mut() {
        shark.advance(target);
    }
    sharks.retain(Shark::is_on_screen);
}

pub fn advance_coin_effects(effects: &mut Vec<CoinEffect>) {
    for effect in effects.iter_mut() {
        effect.advance();
    }
    effects.retain(CoinEffect::is_alive);
}

pub fn advance_splash_effects(effects: &mut Vec<SplashEffect>) {
    for effect in effects.iter_mut() {
        effect.advance();
    }
    effects.retain(SplashEffect::is_alive);
}
