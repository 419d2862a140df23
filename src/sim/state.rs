//! Game state and core simulation types
//!
//! One `GameState` owns every mutable counter and live entity of a session.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::ChaseCamera;
use super::collision::{Aabb, Hitbox};
use super::road::{RoadSegment, build_ring};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player crashed; terminal for the session
    Over,
}

/// Something the frontend may want to react to (HUD refresh, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    ObstaclePassed { score: u64 },
    CoinCollected { coins: u64 },
    CoinsRespawned,
    LevelUp { tier: u32 },
    Crashed { obstacle_id: u32 },
}

impl GameEvent {
    /// Whether this event changes what the HUD shows
    pub fn affects_hud(&self) -> bool {
        matches!(
            self,
            GameEvent::ObstaclePassed { .. } | GameEvent::CoinCollected { .. }
        )
    }
}

/// The player's car
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    /// Visual banking yaw (radians)
    pub yaw: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            yaw: 0.0,
        }
    }
}

impl Player {
    pub const HITBOX: Hitbox = Hitbox::new(PLAYER_HITBOX_CENTER, PLAYER_HITBOX_HALF);

    pub fn bounds(&self) -> Aabb {
        Aabb::from_transform(self.pos, self.yaw, &Self::HITBOX)
    }
}

/// An oncoming car
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
    /// Travel per tick, fixed at spawn
    pub speed: f32,
    /// Color index into the obstacle palette
    pub variant: u8,
}

impl Obstacle {
    pub const HITBOX: Hitbox = Hitbox::new(OBSTACLE_HITBOX_CENTER, OBSTACLE_HITBOX_HALF);
    /// Obstacles face the player
    pub const YAW: f32 = std::f32::consts::PI;

    pub fn bounds(&self) -> Aabb {
        Aabb::from_transform(self.pos, Self::YAW, &Self::HITBOX)
    }
}

/// A collectible coin
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec3,
    /// Cosmetic spin angle (radians)
    pub spin: f32,
}

impl Coin {
    pub const HITBOX: Hitbox = Hitbox::new(COIN_HITBOX_CENTER, COIN_HITBOX_HALF);

    /// Pickup bounds; spin is cosmetic and never turns the box
    pub fn bounds(&self) -> Aabb {
        Aabb::from_transform(self.pos, 0.0, &Self::HITBOX)
    }
}

/// Spawn speed multiplier in `[1.0, 1.0 + OBSTACLE_SPEED_JITTER)`
pub fn speed_factor(rng: &mut Pcg32) -> f32 {
    let max = 1.0 + OBSTACLE_SPEED_JITTER;
    loop {
        let factor = rng.random_range(1.0..max);
        // Rounding can land on the upper bound
        if factor < max {
            return factor;
        }
    }
}

/// Difficulty tier plus the speed values it has scaled
#[derive(Debug, Clone)]
pub struct Difficulty {
    /// Current tier, 1..=max
    pub tier: u32,
    pub road_speed: f32,
    pub player_speed: f32,
    pub obstacle_speed: f32,
    pub obstacle_spawn_rate: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            tier: 1,
            road_speed: tuning.road_speed,
            player_speed: tuning.player_speed,
            obstacle_speed: tuning.obstacle_speed,
            obstacle_spawn_rate: tuning.obstacle_spawn_rate,
        }
    }

    /// Tier for a given score, capped at the max tier
    pub fn tier_for_score(score: u64, tuning: &Tuning) -> u32 {
        let tier = score / tuning.points_per_level.max(1) + 1;
        tier.min(tuning.max_difficulty as u64) as u32
    }

    /// Apply the level-up rule after a score change.
    ///
    /// Speeds keep compounding on every multiple even once the tier is capped.
    /// Returns the new tier when a bump happened.
    pub fn on_score(&mut self, score: u64, tuning: &Tuning) -> Option<u32> {
        if score == 0 || !score.is_multiple_of(tuning.points_per_level.max(1)) {
            return None;
        }
        self.tier = Self::tier_for_score(score, tuning);
        self.road_speed *= tuning.speed_multiplier;
        self.player_speed *= tuning.speed_multiplier;
        self.obstacle_speed *= tuning.speed_multiplier;
        self.obstacle_spawn_rate *= tuning.spawn_rate_multiplier;
        Some(self.tier)
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Obstacles passed
    pub score: u64,
    pub coins_collected: u64,
    pub difficulty: Difficulty,
    /// Cumulative world scroll
    pub distance_traveled: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub camera: ChaseCamera,
    pub road: Vec<RoadSegment>,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live coins in spawn order
    pub coins: Vec<Coin>,
    /// Events raised since the frontend last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::default();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty: Difficulty::new(&tuning),
            tuning,
            phase: GamePhase::Running,
            score: 0,
            coins_collected: 0,
            distance_traveled: 0.0,
            time_ticks: 0,
            camera: ChaseCamera::following(player.pos),
            player,
            road: build_ring(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_coin_batch();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Spawn an obstacle up the road with a randomized lane, speed and color
    pub fn spawn_obstacle(&mut self) -> u32 {
        let x = self.rng.random_range(LANE_MIN_X..LANE_MAX_X);
        let factor = speed_factor(&mut self.rng);
        let variant = self.rng.random_range(0..OBSTACLE_VARIANTS);
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec3::new(x, 0.0, OBSTACLE_SPAWN_Z),
            speed: self.difficulty.obstacle_speed * factor,
            variant,
        });
        id
    }

    /// Scatter a batch of coins ahead of the player
    pub fn spawn_coin_batch(&mut self) {
        for _ in 0..COIN_BATCH_SIZE {
            let x = self.rng.random_range(LANE_MIN_X..LANE_MAX_X);
            let ahead = self.rng.random_range(COIN_MIN_AHEAD..COIN_MAX_AHEAD);
            let id = self.next_entity_id();
            self.coins.push(Coin {
                id,
                pos: Vec3::new(x, COIN_Y, self.player.pos.z - ahead),
                spin: 0.0,
            });
        }
    }

    /// Count a passed obstacle and apply the level-up rule
    pub fn record_pass(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::ObstaclePassed { score: self.score });
        if let Some(tier) = self.difficulty.on_score(self.score, &self.tuning) {
            log::info!(
                "Level {} reached at score {} (road speed {:.3})",
                tier,
                self.score,
                self.difficulty.road_speed
            );
            self.events.push(GameEvent::LevelUp { tier });
        }
    }

    /// Text for the score line of the HUD
    pub fn hud_text(&self) -> String {
        crate::hud::score_line(self.score, self.coins_collected, self.difficulty.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_ring_and_coins() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.road.len(), ROAD_SEGMENT_COUNT);
        assert_eq!(state.coins.len(), COIN_BATCH_SIZE);
        for coin in &state.coins {
            assert!(coin.pos.x >= LANE_MIN_X && coin.pos.x < LANE_MAX_X);
            assert!(coin.pos.z <= -COIN_MIN_AHEAD && coin.pos.z > -COIN_MAX_AHEAD);
            assert_eq!(coin.pos.y, COIN_Y);
        }
    }

    #[test]
    fn speed_factor_excludes_upper_bound() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..1_000_000 {
            let f = speed_factor(&mut rng);
            assert!((1.0..1.5).contains(&f), "factor {} out of range", f);
        }
    }

    #[test]
    fn coin_bounds_ignore_spin() {
        let mut coin = Coin {
            id: 1,
            pos: Vec3::new(1.6, 1.0, 0.0),
            spin: 0.0,
        };
        let flat = coin.bounds();
        coin.spin = std::f32::consts::FRAC_PI_2;
        assert_eq!(coin.bounds(), flat);
    }

    #[test]
    fn state_records_seed() {
        assert_eq!(GameState::new(7).seed, 7);
    }

    #[test]
    fn tier_for_score_caps() {
        let tuning = Tuning::default();
        assert_eq!(Difficulty::tier_for_score(0, &tuning), 1);
        assert_eq!(Difficulty::tier_for_score(37, &tuning), 4);
        assert_eq!(Difficulty::tier_for_score(40, &tuning), 5);
        assert_eq!(Difficulty::tier_for_score(120, &tuning), 5);
    }

    #[test]
    fn level_up_only_on_multiples() {
        let tuning = Tuning::default();
        let mut d = Difficulty::new(&tuning);
        assert_eq!(d.on_score(9, &tuning), None);
        assert_eq!(d.road_speed, 0.3);
        assert_eq!(d.on_score(10, &tuning), Some(2));
        assert!((d.road_speed - 0.33).abs() < 1e-6);
        assert!((d.obstacle_spawn_rate - 0.006).abs() < 1e-7);
    }

    #[test]
    fn multipliers_compound_past_tier_cap() {
        let tuning = Tuning::default();
        let mut d = Difficulty::new(&tuning);
        for score in (10..=70).step_by(10) {
            d.on_score(score, &tuning);
        }
        assert_eq!(d.tier, 5);
        let expected = 0.3 * 1.1f32.powi(7);
        assert!((d.player_speed - expected).abs() < 1e-5);
    }

    #[test]
    fn record_pass_emits_events() {
        let mut state = GameState::new(1);
        state.score = 9;
        state.record_pass();
        assert_eq!(state.score, 10);
        assert_eq!(
            state.events,
            vec![
                GameEvent::ObstaclePassed { score: 10 },
                GameEvent::LevelUp { tier: 2 }
            ]
        );
        assert_eq!(state.difficulty.tier, 2);
    }

    #[test]
    fn spawned_obstacle_speed_in_range() {
        let mut state = GameState::new(42);
        for _ in 0..100 {
            state.spawn_obstacle();
        }
        let base = state.difficulty.obstacle_speed;
        for o in &state.obstacles {
            assert!(o.speed >= base && o.speed < base * 1.5);
            assert!(o.variant < OBSTACLE_VARIANTS);
            assert_eq!(o.pos.z, OBSTACLE_SPAWN_Z);
        }
    }
}
