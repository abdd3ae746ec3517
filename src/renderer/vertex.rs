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

/// Opaque color from a `0xRRGGBB` literal
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for board elements
pub mod colors {
    use super::rgb;

    pub const PEG: [f32; 4] = rgb(0x0B7D5C);
    pub const SLOT_HIGH: [f32; 4] = rgb(0x0B7D5C);
    pub const SLOT_EVEN: [f32; 4] = rgb(0xCDEFE3);
    pub const SLOT_LOSS: [f32; 4] = rgb(0xFF6B6B);
    pub const BALL: [f32; 4] = rgb(0xFF6B6B);
    pub const BALL_OUTLINE: [f32; 4] = rgb(0xFFFFFF);
    pub const BACKGROUND: [f32; 4] = rgb(0xFFFFFF);
}
