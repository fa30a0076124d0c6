//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in canvas pixels (origin top-left, y down) with a color
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
    use crate::{Rgba, rgb, rgba};

    pub const SNAKE_BACKGROUND: Rgba = rgb(0xf1f8e9);
    pub const CHECKER: Rgba = rgba(0x000000, 0.05);
    pub const FOOD_FALLBACK: Rgba = rgb(0xe53935);
    pub const FOOD_HIGHLIGHT: Rgba = rgba(0xffffff, 0.55);
    pub const SNAKE_EYE: Rgba = rgba(0x000000, 0.9);
    pub const GAME_OVER_SHADE: Rgba = rgba(0x000000, 0.48);
    pub const TRON_BACKGROUND: Rgba = rgb(0x000000);
}
