//! Recycled ring of road segments
//!
//! Twenty segments laid end to end scroll toward the camera. Once a segment
//! is far enough behind, it jumps back by the full ring length, which keeps
//! the road endless with a fixed number of segments. Segment order within
//! the ring does not matter.

use crate::consts::{ROAD_RING_SPAN, ROAD_SEGMENT_COUNT, ROAD_SEGMENT_LENGTH, ROAD_WRAP_Z};

/// One road tile; barriers and markings are drawn relative to `z`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSegment {
    /// Center of the segment along the travel axis
    pub z: f32,
}

impl RoadSegment {
    /// Move toward the camera and wrap to the back of the ring if needed.
    /// Returns true when the segment was recycled.
    pub fn advance(&mut self, speed: f32) -> bool {
        self.z += speed;
        self.recycle()
    }

    /// Relocate by exactly one ring span once past the wrap threshold
    pub fn recycle(&mut self) -> bool {
        if self.z > ROAD_WRAP_Z {
            self.z -= ROAD_RING_SPAN;
            true
        } else {
            false
        }
    }
}

/// Segments at z = 0, -100, ..., -1900
pub fn build_ring() -> Vec<RoadSegment> {
    (0..ROAD_SEGMENT_COUNT)
        .map(|i| RoadSegment {
            z: -(i as f32) * ROAD_SEGMENT_LENGTH,
        })
        .collect()
}
