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
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Opaque color from a `0xRRGGBB` literal
    pub const fn rgb(hex: u32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0x333333);
    pub const FIELD: [f32; 4] = rgb(0x2e7d32);
    pub const YARD: [f32; 4] = rgb(0xffff00);
    /// Player and assistant share a color
    pub const PLAYER: [f32; 4] = rgb(0xff0000);
    pub const ANIMAL: [f32; 4] = rgb(0xffffff);
    pub const ANIMAL_HEAD: [f32; 4] = rgb(0xeeeeee);
    pub const ANIMAL_EAR: [f32; 4] = rgb(0xcccccc);
    pub const ANIMAL_LEG: [f32; 4] = rgb(0x444444);
    pub const SHOP: [f32; 4] = [0.16, 0.36, 0.84, 0.35];
    pub const SHOP_OPEN: [f32; 4] = [0.16, 0.36, 0.84, 0.6];
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    #[test]
    fn test_rgb_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(YARD, [1.0, 1.0, 0.0, 1.0]);
        assert!((BACKGROUND[0] - 0.2).abs() < 1e-6);
    }
}
