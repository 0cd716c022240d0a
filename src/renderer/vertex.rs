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
    pub const SKY: [f32; 4] = [0.44, 0.77, 0.81, 1.0];
    pub const PIPE: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const PIPE_CAP: [f32; 4] = [0.33, 0.56, 0.12, 1.0];
    pub const AVATAR: [f32; 4] = [0.98, 0.80, 0.18, 1.0];
    pub const AVATAR_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const AVATAR_PUPIL: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PANEL: [f32; 4] = [0.93, 0.55, 0.16, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}
