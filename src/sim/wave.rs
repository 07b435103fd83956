//! Travelling half-sine pulses and their superposition
//!
//! The water surface is never stored as a grid. Its height at any x is the
//! sum of every live pulse whose window covers x, evaluated in closed form.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::consts::*;

/// One travelling half-sine hump
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePulse {
    /// Center of the hump (screen x)
    pub position: f64,
    /// Pixels per tick (negative moves left)
    pub velocity: f64,
    /// Peak lift at the center
    pub amplitude: f64,
    /// Full span of the hump in screen units
    pub width: f64,
}

impl WavePulse {
    pub fn new(position: f64, velocity: f64, amplitude: f64, width: f64) -> Self {
        Self {
            position,
            velocity,
            amplitude,
            width,
        }
    }

    /// Pulse released by the player with the given charge
    pub fn released(charge: f64) -> Self {
        Self::new(PLAYER_WAVE_ENTRY_X, WAVE_SPEED, charge, PLAYER_WAVE_LENGTH)
    }

    /// Whether x lies strictly inside the half-width window
    #[inline]
    pub fn covers(&self, x: f64) -> bool {
        (x - self.position).abs() < self.width / 2.0
    }

    /// Lift this pulse adds at x (zero outside its window)
    pub fn contribution(&self, x: f64) -> f64 {
        if !self.covers(x) {
            return 0.0;
        }
        let left_edge = self.position - self.width / 2.0;
        self.amplitude * (PI * (x - left_edge) / self.width).sin()
    }

    /// Still inside the visible range extended by one width on each side
    pub fn is_alive(&self) -> bool {
        self.position > -self.width && self.position < SCREEN_WIDTH + self.width
    }
}

/// Screen edge a pulse or entity enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
}

impl Edge {
    /// Direction of travel toward the opposite edge
    pub fn inward_sign(self) -> f64 {
        match self {
            Edge::Left => 1.0,
            Edge::Right => -1.0,
        }
    }

    /// x that is `margin` pixels outside this edge
    pub fn outside_x(self, margin: f64) -> f64 {
        match self {
            Edge::Left => -margin,
            Edge::Right => SCREEN_WIDTH + margin,
        }
    }
}

/// A periodically spawned background pulse class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientWave {
    pub edge: Edge,
    /// Spawns when ticks % period == phase
    pub phase: u64,
}

/// Right-edge class first, left-edge class half a period later
pub const AMBIENT_WAVES: [AmbientWave; 2] = [
    AmbientWave {
        edge: Edge::Right,
        phase: 0,
    },
    AmbientWave {
        edge: Edge::Left,
        phase: AMBIENT_WAVE_PERIOD / 2,
    },
];

impl AmbientWave {
    pub fn is_due(&self, ticks: u64) -> bool {
        ticks % AMBIENT_WAVE_PERIOD == self.phase
    }

    pub fn pulse(&self) -> WavePulse {
        WavePulse::new(
            self.edge.outside_x(AMBIENT_WAVE_MARGIN),
            WAVE_SPEED * self.edge.inward_sign(),
            AMBIENT_WAVE_HEIGHT,
            AMBIENT_WAVE_LENGTH,
        )
    }
}

/// The set of live pulses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveField {
    pulses: Vec<WavePulse>,
}

impl WaveField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stationary humps shown behind the title screen
    pub fn title_tableau() -> Self {
        Self {
            pulses: vec![
                WavePulse::new(200.0, 0.0, 60.0, 100.0),
                WavePulse::new(320.0, 0.0, 90.0, 100.0),
                WavePulse::new(440.0, 0.0, 60.0, 100.0),
            ],
        }
    }

    pub fn pulses(&self) -> &[WavePulse] {
        &self.pulses
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    pub fn clear(&mut self) {
        self.pulses.clear();
    }

    pub fn spawn(&mut self, pulse: WavePulse) {
        self.pulses.push(pulse);
    }

    /// Signed displacement from the baseline at x (positive = up)
    pub fn surface_height(&self, x: f64) -> f64 {
        self.pulses.iter().map(|p| p.contribution(x)).sum()
    }

    /// Move every pulse, then drop the ones that left the extended range
    pub fn tick(&mut self) {
        for pulse in &mut self.pulses {
            pulse.position += pulse.velocity;
        }
        self.pulses.retain(WavePulse::is_alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_field_is_flat() {
        let field = WaveField::new();
        assert_eq!(field.surface_height(SCREEN_CENTER_X), 0.0);
    }

    #[test]
    fn test_single_pulse_peak_and_edges() {
        let mut field = WaveField::new();
        field.spawn(WavePulse::new(300.0, 0.0, 120.0, 200.0));

        assert!((field.surface_height(300.0) - 120.0).abs() < EPS);
        // Window is open: the edges themselves contribute nothing
        assert_eq!(field.surface_height(200.0), 0.0);
        assert_eq!(field.surface_height(400.0), 0.0);
        // Just inside an edge the lobe is close to zero
        assert!(field.surface_height(200.001) < 0.01);
    }

    #[test]
    fn test_constructive_interference() {
        let mut field = WaveField::new();
        field.spawn(WavePulse::new(320.0, 0.0, 60.0, 100.0));
        field.spawn(WavePulse::new(320.0, 0.0, 90.0, 100.0));
        assert!((field.surface_height(320.0) - 150.0).abs() < EPS);
    }

    #[test]
    fn test_destructive_interference() {
        let mut field = WaveField::new();
        field.spawn(WavePulse::new(320.0, 0.0, 70.0, 100.0));
        field.spawn(WavePulse::new(320.0, 0.0, -70.0, 100.0));
        assert!(field.surface_height(320.0).abs() < EPS);
    }

    #[test]
    fn test_title_tableau_lifts_center() {
        let field = WaveField::title_tableau();
        assert!((field.surface_height(SCREEN_CENTER_X) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_tick_moves_and_prunes() {
        let mut field = WaveField::new();
        field.spawn(WavePulse::new(SCREEN_WIDTH + 149.0, 2.0, 50.0, 150.0));
        field.spawn(WavePulse::new(100.0, -2.0, 50.0, 150.0));
        field.tick();
        assert_eq!(field.len(), 1);
        assert_eq!(field.pulses()[0].position, 98.0);
    }

    #[test]
    fn test_released_pulse_leaves_after_crossing() {
        let mut field = WaveField::new();
        field.spawn(WavePulse::released(80.0));

        // Travels from -100 to just under 640 + 200 at 2 px per tick
        let ticks_alive = ((SCREEN_WIDTH + PLAYER_WAVE_LENGTH - PLAYER_WAVE_ENTRY_X) / WAVE_SPEED)
            as usize
            - 1;
        for _ in 0..ticks_alive {
            field.tick();
        }
        assert_eq!(field.len(), 1);
        assert_eq!(field.pulses()[0].position, 838.0);
        field.tick();
        assert!(field.is_empty());
    }

    #[test]
    fn test_left_moving_pulse_leaves_past_negative_width() {
        let mut field = WaveField::new();
        field.spawn(AMBIENT_WAVES[0].pulse());
        assert_eq!(field.pulses()[0].velocity, -WAVE_SPEED);

        // From 715 down to -149, the last position still above -150
        let start = SCREEN_WIDTH + AMBIENT_WAVE_MARGIN;
        let last_alive = -AMBIENT_WAVE_LENGTH + 1.0;
        let ticks_alive = ((start - last_alive) / WAVE_SPEED) as usize;
        assert_eq!(ticks_alive, 432);
        for _ in 0..ticks_alive {
            field.tick();
        }
        assert_eq!(field.len(), 1);
        assert_eq!(field.pulses()[0].position, last_alive);
        field.tick();
        assert!(field.is_empty());
    }

    #[test]
    fn test_pulse_lifetime_bounds_are_exclusive() {
        let w = AMBIENT_WAVE_LENGTH;
        let at = |x: f64| WavePulse::new(x, -WAVE_SPEED, AMBIENT_WAVE_HEIGHT, w).is_alive();
        assert!(at(-w + 1e-9));
        assert!(!at(-w));
        assert!(at(SCREEN_WIDTH + w - 1e-9));
        assert!(!at(SCREEN_WIDTH + w));
    }

    #[test]
    fn test_ambient_classes_alternate() {
        let mut due = Vec::new();
        for t in 0..AMBIENT_WAVE_PERIOD {
            for ambient in &AMBIENT_WAVES {
                if ambient.is_due(t) {
                    due.push((t, ambient.edge));
                }
            }
        }
        assert_eq!(due, vec![(0, Edge::Right), (90, Edge::Left)]);

        let right = AMBIENT_WAVES[0].pulse();
        assert_eq!(right.position, SCREEN_WIDTH + AMBIENT_WAVE_MARGIN);
        assert_eq!(right.velocity, -WAVE_SPEED);
        let left = AMBIENT_WAVES[1].pulse();
        assert_eq!(left.position, -AMBIENT_WAVE_MARGIN);
        assert_eq!(left.velocity, WAVE_SPEED);
    }

    proptest! {
        #[test]
        fn prop_zero_outside_every_window(
            pos in -200.0f64..840.0,
            width in 10.0f64..300.0,
            amp in 0.0f64..300.0,
            offset in 0.001f64..500.0,
        ) {
            let mut field = WaveField::new();
            field.spawn(WavePulse::new(pos, 0.0, amp, width));
            let x = pos + width / 2.0 + offset;
            prop_assert_eq!(field.surface_height(x), 0.0);
            let x = pos - width / 2.0 - offset;
            prop_assert_eq!(field.surface_height(x), 0.0);
        }

        #[test]
        fn prop_superposition_is_sum(
            a in -100.0f64..700.0,
            b in -100.0f64..700.0,
            x in 0.0f64..640.0,
        ) {
            let pa = WavePulse::new(a, 0.0, 60.0, 150.0);
            let pb = WavePulse::new(b, 0.0, 90.0, 200.0);
            let mut field = WaveField::new();
            field.spawn(pa);
            field.spawn(pb);
            let sum = pa.contribution(x) + pb.contribution(x);
            prop_assert!((field.surface_height(x) - sum).abs() < EPS);
        }
    }
}
