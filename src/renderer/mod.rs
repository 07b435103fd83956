//! Rendering module
//!
//! Tessellates a session into a flat triangle list each frame. Any GPU or
//! software rasterizer can upload `MeshRenderer::vertex_bytes` as-is.

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

use glam::DVec2;

use crate::consts::*;
use crate::sim::{GameMode, Session};

/// Frame output as seen from the game shell
pub trait Renderer {
    fn render(&mut self, session: &Session);
}

/// Decorative sharks drawn behind the title
const TITLE_SHARKS: [(DVec2, DVec2); 2] = [
    (DVec2::new(70.0, SURFACE_BASELINE + 50.0), DVec2::new(1.0, 0.0)),
    (
        DVec2::new(SCREEN_WIDTH - 80.0, SURFACE_BASELINE + 100.0),
        DVec2::new(-1.0, 0.0),
    ),
];

/// CPU renderer producing one vertex list per frame
#[derive(Debug, Default)]
pub struct MeshRenderer {
    vertices: Vec<Vertex>,
    frames: u64,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Packed vertex buffer for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn draw_playfield(&mut self, session: &Session) {
        let v = &mut self.vertices;
        for shark in &session.sharks {
            v.extend(shapes::shark(shark));
        }
        v.extend(shapes::surface(&session.waves));
        v.extend(shapes::charge_gauge(session.charge_height));
        for coin in &session.coins {
            v.extend(shapes::coin(coin));
        }
        for effect in &session.coin_effects {
            v.extend(shapes::coin_effect(effect));
        }
        for effect in &session.splash_effects {
            v.extend(shapes::splash(effect));
        }
    }
}

impl Renderer for MeshRenderer {
    fn render(&mut self, session: &Session) {
        self.vertices.clear();

        match session.mode {
            GameMode::Title => {
                self.vertices.extend(shapes::surface(&session.waves));
                for (pos, vel) in TITLE_SHARKS {
                    self.vertices
                        .extend(shapes::shark_at(pos, vel, SHARK_RADIUS));
                }
            }
            GameMode::Playing | GameMode::GameOver => self.draw_playfield(session),
        }
        self.vertices.extend(shapes::swimmer(session.player_height));

        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Coin, Shark};

    #[test]
    fn test_title_frame() {
        let session = Session::new();
        let mut renderer = MeshRenderer::new();
        renderer.render(&session);

        let expected = shapes::surface(&session.waves).len()
            + 2 * shapes::shark_at(DVec2::ZERO, DVec2::X, SHARK_RADIUS).len()
            + shapes::swimmer(session.player_height).len();
        assert_eq!(renderer.vertices().len(), expected);
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_playing_frame_includes_entities() {
        let mut session = Session::new();
        session.enter(GameMode::Playing);
        session.waves.clear();
        session.player_height = 0.0;

        let mut renderer = MeshRenderer::new();
        renderer.render(&session);
        let empty = renderer.vertices().len();

        let coin = Coin::new(DVec2::new(100.0, 100.0), COIN_SPEED);
        let shark = Shark::new(DVec2::new(50.0, 420.0), SHARK_SPEED);
        session.coins.push(coin);
        session.sharks.push(shark);
        renderer.render(&session);

        assert_eq!(
            renderer.vertices().len(),
            empty + shapes::coin(&coin).len() + shapes::shark(&shark).len()
        );
    }

    #[test]
    fn test_vertex_bytes_are_packed() {
        let mut renderer = MeshRenderer::new();
        renderer.render(&Session::new());
        assert_eq!(
            renderer.vertex_bytes().len(),
            renderer.vertices().len() * Vertex::STRIDE
        );
        assert_eq!(Vertex::STRIDE, 24);
    }
}
