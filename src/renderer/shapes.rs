//! Shape generation for 2D primitives

use glam::{DVec2, Vec2};
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::player_position;
use crate::sim::{Coin, CoinEffect, Shark, SplashEffect, WaveField};

/// Size of one surface dot
pub const SURFACE_DOT: f32 = 5.0;
/// Distance between surface dot origins
pub const SURFACE_DOT_SPACING: f64 = 8.0;
/// Width of the charge gauge at the left edge
pub const GAUGE_WIDTH: f32 = 5.0;

/// Generate vertices for an axis-aligned rectangle (top-left origin)
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Water surface as a row of dots following the field
pub fn surface(field: &WaveField) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut x = 0.0;
    while x < SCREEN_WIDTH {
        let y = SURFACE_BASELINE - field.surface_height(x);
        vertices.extend(rect(
            Vec2::new(x as f32, y as f32),
            Vec2::splat(SURFACE_DOT),
            colors::WATER,
        ));
        x += SURFACE_DOT_SPACING;
    }
    vertices
}

/// Vertical bar showing the pending wave's height
pub fn charge_gauge(charge: f64) -> Vec<Vertex> {
    if charge <= 0.0 {
        return Vec::new();
    }
    let top = (SURFACE_BASELINE - charge) as f32;
    rect(
        Vec2::new(3.0, top),
        Vec2::new(GAUGE_WIDTH, charge as f32),
        colors::WATER,
    )
}

pub fn coin(coin: &Coin) -> Vec<Vertex> {
    let center = coin.pos.as_vec2();
    let radius = coin.radius as f32;
    let mut vertices = circle(center, radius, colors::COIN_RIM, 24);
    vertices.extend(circle(center, radius * 0.75, colors::COIN, 24));
    vertices
}

/// Shark body pointing along its velocity
pub fn shark(shark: &Shark) -> Vec<Vertex> {
    shark_at(shark.pos, shark.vel, shark.radius)
}

pub fn shark_at(pos: DVec2, vel: DVec2, radius: f64) -> Vec<Vertex> {
    let center = pos.as_vec2();
    let heading = vel.as_vec2().normalize_or(Vec2::X);
    let side = heading.perp();
    let r = radius as f32;

    let nose = center + heading * r;
    let belly = center - heading * (r * 0.6);
    let tail = center - heading * r;

    let c = colors::SHARK;
    vec![
        // Body
        Vertex::new(nose.x, nose.y, c),
        Vertex::new(belly.x + side.x * r * 0.5, belly.y + side.y * r * 0.5, c),
        Vertex::new(belly.x - side.x * r * 0.5, belly.y - side.y * r * 0.5, c),
        // Tail fin
        Vertex::new(belly.x, belly.y, c),
        Vertex::new(tail.x + side.x * r * 0.5, tail.y + side.y * r * 0.5, c),
        Vertex::new(tail.x - side.x * r * 0.5, tail.y - side.y * r * 0.5, c),
        // Dorsal fin
        Vertex::new(center.x + side.x * r * 0.3, center.y + side.y * r * 0.3, c),
        Vertex::new(
            center.x - heading.x * r * 0.3 - side.x * r * 0.9,
            center.y - heading.y * r * 0.3 - side.y * r * 0.9,
            c,
        ),
        Vertex::new(
            center.x - heading.x * r * 0.4 + side.x * r * 0.3,
            center.y - heading.y * r * 0.4 + side.y * r * 0.3,
            c,
        ),
    ]
}

/// Swimmer riding the surface at the centre column
pub fn swimmer(height: f64) -> Vec<Vertex> {
    let center = player_position(height).as_vec2();
    let r = PLAYER_RADIUS as f32;
    let mut vertices = circle(center, r, colors::SWIMMER, 16);
    for eye in [-0.35, 0.35] {
        vertices.extend(circle(
            center + Vec2::new(eye * r, -0.2 * r),
            r * 0.2,
            colors::SWIMMER_FACE,
            8,
        ));
    }
    vertices
}

/// Rising marker for collected coins, one pip per point
pub fn coin_effect(effect: &CoinEffect) -> Vec<Vertex> {
    let y = effect.display_y() as f32;
    let x = effect.pos.x as f32;
    (0..effect.plus)
        .flat_map(|i| circle(Vec2::new(x + i as f32 * 8.0, y), 3.0, colors::COIN, 8))
        .collect()
}

pub fn splash(effect: &SplashEffect) -> Vec<Vertex> {
    let p = effect.pos.as_vec2() - Vec2::splat(1.5);
    rect(p, Vec2::splat(3.0), colors::WATER)
}
