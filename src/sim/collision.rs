//! Axis-aligned bounding box collision
//!
//! Boxes are rebuilt every tick from an entity's position, yaw and local
//! hitbox, so a steering car's box grows slightly while it is banked.
//! There is no swept test: fast entities can tunnel between ticks.

use glam::Vec3;

/// Local-space bounds of an entity, before its transform is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Box center relative to the entity origin
    pub center: Vec3,
    /// Half size along each local axis
    pub half_extents: Vec3,
}

impl Hitbox {
    pub const fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }
}

/// World-space axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Bounds of `hitbox` placed at `position` and rotated by `yaw` about +Y
    pub fn from_transform(position: Vec3, yaw: f32, hitbox: &Hitbox) -> Self {
        let (sin, cos) = yaw.sin_cos();
        let c = hitbox.center;
        let center = position + Vec3::new(c.x * cos + c.z * sin, c.y, -c.x * sin + c.z * cos);

        let h = hitbox.half_extents;
        let (sin, cos) = (sin.abs(), cos.abs());
        let half = Vec3::new(cos * h.x + sin * h.z, h.y, sin * h.x + cos * h.z);
        Self::from_center_half(center, half)
    }

    /// Boxes intersect on all three axes (touching counts)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
