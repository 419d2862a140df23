//! Data-driven game balance
//!
//! Every speed and rate the simulation reads at runtime lives here so a
//! balance pass does not require touching `sim`. Values are in units per tick.
//! On web, a JSON override can be stored in LocalStorage under
//! `road_racer_tuning`; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World scroll speed along the travel axis
    pub road_speed: f32,
    /// Player translation speed (both axes)
    pub player_speed: f32,
    /// Base obstacle speed before the per-instance multiplier
    pub obstacle_speed: f32,
    /// Per-tick obstacle spawn probability once past the threshold
    pub obstacle_spawn_rate: f32,
    /// Probability of a fresh coin batch after a pickup
    pub coin_spawn_rate: f32,
    /// Distance traveled before obstacles may spawn
    pub obstacle_start_distance: f32,
    /// Highest difficulty tier
    pub max_difficulty: u32,
    /// Score interval between difficulty bumps
    pub points_per_level: u64,
    /// Multiplier applied to road, player and obstacle speed on each bump
    pub speed_multiplier: f32,
    /// Multiplier applied to the spawn rate on each bump
    pub spawn_rate_multiplier: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            road_speed: 0.3,
            player_speed: 0.3,
            obstacle_speed: 0.3,
            obstacle_spawn_rate: 0.005,
            coin_spawn_rate: 0.02,
            obstacle_start_distance: 50.0,
            max_difficulty: 5,
            points_per_level: 10,
            speed_multiplier: 1.1,
            spawn_rate_multiplier: 1.2,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "road_racer_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring invalid tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
