//! Vertex and instance types for 3D box rendering

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Mesh vertex with position and normal
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// One drawn box: model matrix, base color and emissive strength
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = emissive (0 = fully lit, 1 = unlit glow), rest unused
    pub params: [f32; 4],
}

impl Instance {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            params: [0.0; 4],
        }
    }

    pub fn emissive(mut self, amount: f32) -> Self {
        self.params[0] = amount;
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.529, 0.808, 0.922, 1.0];
    pub const ROAD: [f32; 4] = [0.02, 0.02, 0.02, 1.0];
    pub const BARRIER: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
    pub const MARKING: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const WINDOW: [f32; 4] = [0.067, 0.067, 0.067, 1.0];
    pub const WHEEL: [f32; 4] = [0.067, 0.067, 0.067, 1.0];
    pub const HEADLIGHT: [f32; 4] = [1.0, 1.0, 0.933, 1.0];
    pub const TAILLIGHT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const DIAGNOSTIC_CUBE: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

    /// Obstacle palette: blue, red, green, magenta, orange, cyan
    pub const OBSTACLES: [[f32; 4]; 6] = [
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 1.0],
        [1.0, 0.533, 0.0, 1.0],
        [0.0, 1.0, 1.0, 1.0],
    ];

    pub fn obstacle(variant: u8) -> [f32; 4] {
        OBSTACLES[variant as usize % OBSTACLES.len()]
    }
}
