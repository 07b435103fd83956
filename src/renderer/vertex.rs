//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.937, 0.937, 0.937, 1.0];
    pub const WATER: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.878, 0.0, 1.0];
    pub const COIN_RIM: [f32; 4] = [0.961, 0.753, 0.0, 1.0];
    pub const SHARK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SWIMMER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const SWIMMER_FACE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
