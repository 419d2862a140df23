//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation deterministically. Speeds are
//! in units per tick; the frontend runs one tick per 60 Hz refresh.

use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Player};
use crate::clamp_lane;
use crate::consts::*;

/// Held directional keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one tick.
///
/// Does nothing once the run is over. Events are appended to
/// `state.events` for the caller to drain.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::Over {
        return;
    }

    state.time_ticks += 1;

    // Scroll the road ring toward the camera
    let road_speed = state.difficulty.road_speed;
    for segment in &mut state.road {
        segment.advance(road_speed);
    }

    steer(&mut state.player, input, state.difficulty.player_speed);
    update_obstacles(state);
    update_coins(state);

    state.camera.follow(state.player.pos);
    state.distance_traveled += state.difficulty.road_speed;
}

/// Translate the player from held keys. Left wins over right.
fn steer(player: &mut Player, input: &TickInput, speed: f32) {
    if input.forward {
        player.pos.z -= speed;
    }
    if input.backward {
        player.pos.z += speed;
    }
    if input.left {
        player.pos.x = clamp_lane(player.pos.x - speed);
        player.yaw = BANK_YAW;
    } else if input.right {
        player.pos.x = clamp_lane(player.pos.x + speed);
        player.yaw = -BANK_YAW;
    } else {
        player.yaw = 0.0;
    }
}

fn update_obstacles(state: &mut GameState) {
    // Spawning starts once the player has covered some ground
    if state.distance_traveled > state.tuning.obstacle_start_distance
        && state.rng.random::<f32>() < state.difficulty.obstacle_spawn_rate
    {
        let id = state.spawn_obstacle();
        log::debug!("Spawned obstacle {} at distance {:.1}", id, state.distance_traveled);
        state.events.push(GameEvent::ObstacleSpawned { id });
    }

    let player_box = state.player.bounds();
    let mut crashed_into = None;
    let mut passed = 0u32;

    // retain_mut visits each obstacle exactly once, in order
    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.z += obstacle.speed;

        if crashed_into.is_none() && obstacle.bounds().intersects(&player_box) {
            crashed_into = Some(obstacle.id);
        }

        if obstacle.pos.z > OBSTACLE_DESPAWN_Z {
            passed += 1;
            false
        } else {
            true
        }
    });

    if let Some(obstacle_id) = crashed_into {
        state.phase = GamePhase::Over;
        log::info!(
            "Crashed into obstacle {} (score {}, coins {})",
            obstacle_id,
            state.score,
            state.coins_collected
        );
        state.events.push(GameEvent::Crashed { obstacle_id });
    }

    for _ in 0..passed {
        state.record_pass();
    }
}

fn update_coins(state: &mut GameState) {
    let player_box = state.player.bounds();
    let mut collected = 0u32;

    state.coins.retain_mut(|coin| {
        coin.spin += COIN_SPIN;
        if coin.bounds().intersects(&player_box) {
            collected += 1;
            false
        } else {
            true
        }
    });

    for _ in 0..collected {
        state.coins_collected += 1;
        state.events.push(GameEvent::CoinCollected {
            coins: state.coins_collected,
        });

        if state.rng.random::<f32>() < state.tuning.coin_spawn_rate {
            state.spawn_coin_batch();
            state.events.push(GameEvent::CoinsRespawned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Obstacle};
    use glam::Vec3;
    use proptest::prelude::*;

    /// A state with no coins so tests control every entity
    fn empty_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.coins.clear();
        state
    }

    fn obstacle(state: &mut GameState, pos: Vec3, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos,
            speed,
            variant: 0,
        });
        id
    }

    fn input_from_bits(bits: u8) -> TickInput {
        TickInput {
            forward: bits & 1 != 0,
            backward: bits & 2 != 0,
            left: bits & 4 != 0,
            right: bits & 8 != 0,
        }
    }

    #[test]
    fn test_road_distance_and_camera() {
        let mut state = empty_state(1);
        let input = TickInput {
            forward: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert!((state.road[0].z - 0.3).abs() < 1e-6);
        assert!((state.road[19].z - (-1899.7)).abs() < 1e-3);
        assert!((state.distance_traveled - 0.3).abs() < 1e-6);
        assert!((state.player.pos.z + 0.3).abs() < 1e-6);
        assert_eq!(state.camera.target, state.player.pos);
        assert!((state.camera.position - Vec3::new(0.0, 5.0, 9.7)).length() < 1e-5);
    }

    #[test]
    fn test_steering_and_banking() {
        let mut state = empty_state(1);

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        assert!((state.player.pos.x + 0.3).abs() < 1e-6);
        assert_eq!(state.player.yaw, BANK_YAW);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right);
        assert!(state.player.pos.x.abs() < 1e-6);
        assert_eq!(state.player.yaw, -BANK_YAW);

        // Both held: left wins
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &both);
        assert_eq!(state.player.yaw, BANK_YAW);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.yaw, 0.0);
    }

    #[test]
    fn test_forward_and_backward_cancel() {
        let mut state = empty_state(1);
        let input = TickInput {
            forward: true,
            backward: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.player.pos.z.abs() < 1e-6);
    }

    #[test]
    fn test_lane_clamp() {
        let mut state = empty_state(1);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &right);
        }
        assert_eq!(state.player.pos.x, LANE_MAX_X);
    }

    #[test]
    fn test_collision_ends_run_and_freezes() {
        let mut state = empty_state(3);
        let id = obstacle(&mut state, Vec3::new(0.0, 0.0, -0.1), 0.0);

        // Obstacle box spans x in [-1.25, 1.25], same lane as the player
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);
        assert!(state.events.contains(&GameEvent::Crashed { obstacle_id: id }));

        let player = state.player.pos;
        let road = state.road[0].z;
        let ticks = state.time_ticks;
        let distance = state.distance_traveled;

        let input = TickInput {
            forward: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input);
        }
        assert_eq!(state.player.pos, player);
        assert_eq!(state.road[0].z, road);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.distance_traveled, distance);
        assert_eq!(state.obstacles[0].pos.z, -0.1);
    }

    #[test]
    fn test_remaining_obstacles_processed_after_crash() {
        let mut state = empty_state(3);
        obstacle(&mut state, Vec3::ZERO, 0.0);
        obstacle(&mut state, Vec3::new(4.0, 0.0, -30.0), 0.5);

        tick(&mut state, &TickInput::default());
        assert!(state.is_over());
        assert!((state.obstacles[1].pos.z + 29.5).abs() < 1e-6);
    }

    #[test]
    fn test_pass_removes_without_skipping() {
        let mut state = empty_state(5);
        // Far lane so nothing touches the player
        obstacle(&mut state, Vec3::new(4.0, 0.0, 9.9), 0.3);
        obstacle(&mut state, Vec3::new(4.0, 0.0, 9.95), 0.3);
        let survivor = obstacle(&mut state, Vec3::new(4.0, 0.0, -50.0), 0.3);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 2);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, survivor);
        assert!((state.obstacles[0].pos.z + 49.7).abs() < 1e-4);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
                .count(),
            2
        );
        assert!(state.hud_text().starts_with("Score: 2 |"));
    }

    #[test]
    fn test_level_up_from_pass() {
        let mut state = empty_state(5);
        state.score = 9;
        let kept = obstacle(&mut state, Vec3::new(4.0, 0.0, -60.0), 0.3);
        obstacle(&mut state, Vec3::new(4.0, 0.0, 10.0), 0.3);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 10);
        assert_eq!(state.difficulty.tier, 2);
        assert!((state.difficulty.road_speed - 0.33).abs() < 1e-6);
        assert!(state.events.contains(&GameEvent::LevelUp { tier: 2 }));
        // Existing obstacles keep the speed they spawned with
        let kept = state.obstacles.iter().find(|o| o.id == kept).unwrap();
        assert_eq!(kept.speed, 0.3);
        assert_eq!(state.hud_text(), "Score: 10 | Coins: 0 | Level: 2");
    }

    #[test]
    fn test_coin_pickup() {
        let mut state = empty_state(11);
        state.player.pos = Vec3::new(2.0, 0.0, -3.0);
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            pos: Vec3::new(2.0, 1.0, -3.0),
            spin: 0.0,
        });

        tick(&mut state, &TickInput::default());

        assert!(state.coins.iter().all(|c| c.id != id));
        assert_eq!(state.coins_collected, 1);
        assert!(state.events.contains(&GameEvent::CoinCollected { coins: 1 }));
        assert_eq!(state.hud_text(), "Score: 0 | Coins: 1 | Level: 1");
    }

    #[test]
    fn test_coin_pickup_independent_of_spin() {
        for spin in [0.0, std::f32::consts::FRAC_PI_2 - COIN_SPIN] {
            let mut state = empty_state(11);
            let id = state.next_entity_id();
            state.coins.push(Coin {
                id,
                pos: Vec3::new(1.6, 1.0, 0.0),
                spin,
            });

            tick(&mut state, &TickInput::default());

            assert_eq!(state.coins_collected, 1, "coin with spin {} was missed", spin);
        }
    }

    #[test]
    fn test_coin_spins_when_not_collected() {
        let mut state = empty_state(11);
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            pos: Vec3::new(0.0, 1.0, -40.0),
            spin: 0.0,
        });
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.coins.len(), 1);
        assert!((state.coins[0].spin - 2.0 * COIN_SPIN).abs() < 1e-6);
        assert_eq!(state.coins_collected, 0);
    }

    #[test]
    fn test_coin_respawn_batch() {
        let mut state = empty_state(11);
        state.tuning.coin_spawn_rate = 1.0;
        state.player.pos = Vec3::new(0.0, 0.0, -10.0);
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            pos: Vec3::new(0.0, 1.0, -10.0),
            spin: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.coins.len(), COIN_BATCH_SIZE);
        assert!(state.events.contains(&GameEvent::CoinsRespawned));
        for coin in &state.coins {
            assert!(coin.pos.z < -10.0 - COIN_MIN_AHEAD + 1e-3);
        }
    }

    #[test]
    fn test_spawn_gating() {
        let mut state = empty_state(21);
        state.difficulty.obstacle_spawn_rate = 1.0;

        state.distance_traveled = 49.999;
        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.is_empty());

        state.distance_traveled = 50.001;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        let spawned = &state.obstacles[0];
        assert!(spawned.pos.x >= LANE_MIN_X && spawned.pos.x < LANE_MAX_X);
        // Spawned at -100 then advanced once
        assert!((spawned.pos.z - (OBSTACLE_SPAWN_Z + spawned.speed)).abs() < 1e-4);
    }

    #[test]
    fn test_no_spawn_with_zero_rate() {
        let mut state = empty_state(21);
        state.difficulty.obstacle_spawn_rate = 0.0;
        state.distance_traveled = 500.0;
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.distance_traveled = 60.0;
        state2.distance_traveled = 60.0;
        state1.difficulty.obstacle_spawn_rate = 0.2;
        state2.difficulty.obstacle_spawn_rate = 0.2;

        for i in 0..300u32 {
            let input = input_from_bits((i / 7 % 16) as u8);
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    proptest! {
        #[test]
        fn player_stays_in_lane_and_counters_grow(
            seed in any::<u64>(),
            inputs in prop::collection::vec(0u8..16, 1..400),
        ) {
            let mut state = GameState::new(seed);
            state.difficulty.obstacle_spawn_rate = 0.05;
            let mut last_score = 0;
            let mut last_coins = 0;

            for bits in inputs {
                let running = state.phase == GamePhase::Running;
                tick(&mut state, &input_from_bits(bits));
                prop_assert!(state.player.pos.x >= LANE_MIN_X);
                prop_assert!(state.player.pos.x <= LANE_MAX_X);
                if running {
                    prop_assert!(state.score >= last_score);
                    prop_assert!(state.coins_collected >= last_coins);
                }
                last_score = state.score;
                last_coins = state.coins_collected;
            }
        }

        #[test]
        fn obstacle_speed_fixed_at_spawn(seed in any::<u64>()) {
            let mut state = empty_state(seed);
            state.distance_traveled = 100.0;
            state.difficulty.obstacle_spawn_rate = 1.0;
            tick(&mut state, &TickInput::default());

            let base = state.difficulty.obstacle_speed;
            let spawned = state.obstacles[0].clone();
            prop_assert!(spawned.speed >= base);
            prop_assert!(spawned.speed < base * 1.5);

            state.difficulty.obstacle_speed *= 2.0;
            state.difficulty.obstacle_spawn_rate = 0.0;
            tick(&mut state, &TickInput::default());
            prop_assert_eq!(state.obstacles[0].speed, spawned.speed);
        }
    }
}
