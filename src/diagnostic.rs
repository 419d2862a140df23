//! Diagnostic scene: a single spinning cube
//!
//! Used to confirm the render stack comes up before debugging the game
//! itself. Selected with `?diagnostic` in the page URL.

use glam::{Mat4, Vec3};

/// Rotation added per frame on both the x and y axes (radians)
pub const SPIN_PER_FRAME: f32 = 0.01;
/// Camera distance from the cube along +z
pub const CAMERA_Z: f32 = 5.0;

#[derive(Debug, Clone, Default)]
pub struct SpinningCube {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub frames: u64,
}

impl SpinningCube {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame
    pub fn step(&mut self) {
        self.rotation_x += SPIN_PER_FRAME;
        self.rotation_y += SPIN_PER_FRAME;
        self.frames += 1;
    }

    /// Model matrix for the cube
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation_x) * Mat4::from_rotation_y(self.rotation_y)
    }

    /// View matrix: camera on +z looking at the origin
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y)
    }
}

/// True when the page query string asks for the diagnostic scene
pub fn requested(query: &str) -> bool {
    query
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair.split('=').next() == Some("diagnostic"))
}
