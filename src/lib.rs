//! Road Racer - An endless 3D car-driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input mapping
//! - `tuning`: Data-driven game balance
//! - `diagnostic`: Spinning cube scene to verify the render stack
//! - `error`: Startup failures

pub mod diagnostic;
pub mod error;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Number of road segments in the recycled ring
    pub const ROAD_SEGMENT_COUNT: usize = 20;
    /// Length of one road segment along the travel axis
    pub const ROAD_SEGMENT_LENGTH: f32 = 100.0;
    /// Distance a segment is moved back when recycled
    pub const ROAD_RING_SPAN: f32 = ROAD_SEGMENT_COUNT as f32 * ROAD_SEGMENT_LENGTH;
    /// Segments past this z are recycled
    pub const ROAD_WRAP_Z: f32 = 100.0;
    /// Road surface width
    pub const ROAD_WIDTH: f32 = 10.0;
    /// Barrier x offset from the road center
    pub const BARRIER_X: f32 = 5.25;

    /// Lateral lane bounds for the player and spawns
    pub const LANE_MIN_X: f32 = -4.0;
    pub const LANE_MAX_X: f32 = 4.0;

    /// Visual yaw applied while steering (radians)
    pub const BANK_YAW: f32 = 0.2;

    /// Obstacles spawn this far up the road
    pub const OBSTACLE_SPAWN_Z: f32 = -100.0;
    /// Obstacles past this z count as passed
    pub const OBSTACLE_DESPAWN_Z: f32 = 10.0;
    /// Random speed multiplier range added on top of 1.0
    pub const OBSTACLE_SPEED_JITTER: f32 = 0.5;
    /// Number of obstacle color variants
    pub const OBSTACLE_VARIANTS: u8 = 6;

    /// Coins per spawned batch
    pub const COIN_BATCH_SIZE: usize = 5;
    /// Coin hover height
    pub const COIN_Y: f32 = 1.0;
    /// Coins spawn between these distances ahead of the player
    pub const COIN_MIN_AHEAD: f32 = 20.0;
    pub const COIN_MAX_AHEAD: f32 = 70.0;
    /// Coin spin per tick (radians, cosmetic)
    pub const COIN_SPIN: f32 = 0.02;

    /// Camera offset from the player
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 5.0, 10.0);

    /// Player car local bounds: center offset and half extents
    pub const PLAYER_HITBOX_CENTER: Vec3 = Vec3::new(0.0, 0.5, 0.0);
    pub const PLAYER_HITBOX_HALF: Vec3 = Vec3::new(1.26, 0.5, 1.75);
    /// Obstacle car local bounds
    pub const OBSTACLE_HITBOX_CENTER: Vec3 = Vec3::new(0.0, 0.625, 0.0);
    pub const OBSTACLE_HITBOX_HALF: Vec3 = Vec3::new(1.25, 0.625, 1.75);
    /// Coin local bounds (a disc standing on its edge)
    pub const COIN_HITBOX_CENTER: Vec3 = Vec3::ZERO;
    pub const COIN_HITBOX_HALF: Vec3 = Vec3::new(0.5, 0.5, 0.1);
}

/// Clamp a lateral position to the lane bounds
#[inline]
pub fn clamp_lane(x: f32) -> f32 {
    x.clamp(consts::LANE_MIN_X, consts::LANE_MAX_X)
}
