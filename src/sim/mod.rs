//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected random source only
//! - Entity lists pruned once per tick by predicate
//! - No rendering, audio or platform side effects (requests go out as `GameEvent`s)

pub mod collision;
pub mod entity;
pub mod rng;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{CoinPickup, coin_points, collect_coins, just_landed, shark_strike};
pub use entity::{Coin, CoinEffect, Shark, SharkState, SplashEffect};
pub use rng::{RandomSource, SimRng};
pub use state::{GameEvent, GameMode, Session, SoundCue, TelemetryAction};
pub use tick::{TickInput, tick};
pub use wave::{AMBIENT_WAVES, AmbientWave, Edge, WaveField, WavePulse};
