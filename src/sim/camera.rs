//! Rigid chase camera

use glam::{Mat4, Vec3};

use crate::consts::CAMERA_OFFSET;

/// Camera pinned at a fixed offset behind and above the player.
/// No smoothing: it snaps to the player every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseCamera {
    pub position: Vec3,
    pub target: Vec3,
}

impl ChaseCamera {
    pub fn following(target: Vec3) -> Self {
        Self {
            position: target + CAMERA_OFFSET,
            target,
        }
    }

    pub fn follow(&mut self, target: Vec3) {
        *self = Self::following(target);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}
