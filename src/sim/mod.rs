//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display refresh, speeds in units per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod road;
pub mod state;
pub mod tick;

pub use camera::ChaseCamera;
pub use collision::{Aabb, Hitbox};
pub use road::{RoadSegment, build_ring};
pub use state::{Coin, Difficulty, GameEvent, GamePhase, GameState, Obstacle, Player};
pub use tick::{TickInput, tick};
