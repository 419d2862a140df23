//! Scene building: everything is drawn as colored boxes
//!
//! Each entity is expanded into one or more [`Instance`]s of a unit cube.
//! Detail level follows the quality preset in [`Settings`].

use glam::{Mat4, Vec3};

use super::vertex::{Instance, Vertex, colors};
use crate::consts::{BARRIER_X, ROAD_SEGMENT_LENGTH, ROAD_WIDTH};
use crate::diagnostic::SpinningCube;
use crate::settings::Settings;
use crate::sim::{Coin, GameState, Obstacle, Player, RoadSegment};

/// Unit cube centered on the origin (24 vertices so each face has its own normal)
pub fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex::new([-p, -p,  p], [0.0, 0.0, 1.0]),
        Vertex::new([ p, -p,  p], [0.0, 0.0, 1.0]),
        Vertex::new([ p,  p,  p], [0.0, 0.0, 1.0]),
        Vertex::new([-p,  p,  p], [0.0, 0.0, 1.0]),
        // -Z face
        Vertex::new([ p, -p, -p], [0.0, 0.0, -1.0]),
        Vertex::new([-p, -p, -p], [0.0, 0.0, -1.0]),
        Vertex::new([-p,  p, -p], [0.0, 0.0, -1.0]),
        Vertex::new([ p,  p, -p], [0.0, 0.0, -1.0]),
        // +X face
        Vertex::new([ p, -p,  p], [1.0, 0.0, 0.0]),
        Vertex::new([ p, -p, -p], [1.0, 0.0, 0.0]),
        Vertex::new([ p,  p, -p], [1.0, 0.0, 0.0]),
        Vertex::new([ p,  p,  p], [1.0, 0.0, 0.0]),
        // -X face
        Vertex::new([-p, -p, -p], [-1.0, 0.0, 0.0]),
        Vertex::new([-p, -p,  p], [-1.0, 0.0, 0.0]),
        Vertex::new([-p,  p,  p], [-1.0, 0.0, 0.0]),
        Vertex::new([-p,  p, -p], [-1.0, 0.0, 0.0]),
        // +Y face
        Vertex::new([-p,  p,  p], [0.0, 1.0, 0.0]),
        Vertex::new([ p,  p,  p], [0.0, 1.0, 0.0]),
        Vertex::new([ p,  p, -p], [0.0, 1.0, 0.0]),
        Vertex::new([-p,  p, -p], [0.0, 1.0, 0.0]),
        // -Y face
        Vertex::new([-p, -p, -p], [0.0, -1.0, 0.0]),
        Vertex::new([ p, -p, -p], [0.0, -1.0, 0.0]),
        Vertex::new([ p, -p,  p], [0.0, -1.0, 0.0]),
        Vertex::new([-p, -p,  p], [0.0, -1.0, 0.0]),
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0, 1, 2, 2, 3, 0,       // +Z
        4, 5, 6, 6, 7, 4,       // -Z
        8, 9, 10, 10, 11, 8,    // +X
        12, 13, 14, 14, 15, 12, // -X
        16, 17, 18, 18, 19, 16, // +Y
        20, 21, 22, 22, 23, 20, // -Y
    ];
    (vertices, indices)
}

/// Box of `size` centered at `local` inside an entity frame at `origin` turned by `yaw`
fn part(origin: Vec3, yaw: f32, local: Vec3, size: Vec3) -> Mat4 {
    Mat4::from_translation(origin)
        * Mat4::from_rotation_y(yaw)
        * Mat4::from_translation(local)
        * Mat4::from_scale(size)
}

/// Body proportions for a car
struct CarStyle {
    body: Vec3,
    body_y: f32,
    cabin: Vec3,
    cabin_y: f32,
    wheel_z: f32,
    light_y: f32,
}

const PLAYER_STYLE: CarStyle = CarStyle {
    body: Vec3::new(2.0, 0.4, 3.5),
    body_y: 0.4,
    cabin: Vec3::new(1.7, 0.4, 1.8),
    cabin_y: 0.8,
    wheel_z: 1.2,
    light_y: 0.5,
};

const OBSTACLE_STYLE: CarStyle = CarStyle {
    body: Vec3::new(2.0, 0.5, 3.5),
    body_y: 0.5,
    cabin: Vec3::new(1.8, 0.5, 1.8),
    cabin_y: 1.0,
    wheel_z: 1.0,
    light_y: 0.6,
};

fn car(origin: Vec3, yaw: f32, style: &CarStyle, color: [f32; 4], detailed: bool, out: &mut Vec<Instance>) {
    let at = |local: Vec3, size: Vec3| part(origin, yaw, local, size);

    out.push(Instance::new(at(Vec3::new(0.0, style.body_y, 0.0), style.body), color));
    out.push(Instance::new(at(Vec3::new(0.0, style.cabin_y, 0.0), style.cabin), color));

    if !detailed {
        return;
    }

    // Front and back windows sit on the cabin faces
    let half_cabin = style.cabin.z / 2.0;
    let window = Vec3::new(style.cabin.x - 0.2, style.cabin.y * 0.8, 0.05);
    for z in [-half_cabin, half_cabin] {
        out.push(Instance::new(at(Vec3::new(0.0, style.cabin_y, z), window), colors::WINDOW));
    }

    let wheel = Vec3::new(0.3, 0.8, 0.8);
    for x in [-1.1, 1.1] {
        for z in [-style.wheel_z, style.wheel_z] {
            out.push(Instance::new(at(Vec3::new(x, 0.4, z), wheel), colors::WHEEL));
        }
    }

    let half_body = style.body.z / 2.0 + 0.01;
    for x in [-0.7, 0.7] {
        out.push(
            Instance::new(at(Vec3::new(x, style.light_y, -half_body), Vec3::new(0.4, 0.2, 0.02)), colors::HEADLIGHT)
                .emissive(0.5),
        );
        out.push(
            Instance::new(at(Vec3::new(x, style.light_y, half_body), Vec3::new(0.3, 0.15, 0.02)), colors::TAILLIGHT)
                .emissive(0.5),
        );
    }
}

/// Road surface, barriers and (optionally) lane markings for every segment
pub fn road(segments: &[RoadSegment], markings: bool, out: &mut Vec<Instance>) {
    let len = ROAD_SEGMENT_LENGTH;
    for segment in segments {
        let z = segment.z;
        out.push(Instance::new(
            part(Vec3::new(0.0, -0.15, z), 0.0, Vec3::ZERO, Vec3::new(ROAD_WIDTH, 0.1, len)),
            colors::ROAD,
        ));
        for x in [-BARRIER_X, BARRIER_X] {
            out.push(Instance::new(
                part(Vec3::new(x, 0.5, z), 0.0, Vec3::ZERO, Vec3::new(0.5, 1.0, len)),
                colors::BARRIER,
            ));
        }

        if !markings {
            continue;
        }

        // Dashed center and lane lines
        let far_edge = z - len / 2.0;
        for j in 0..10 {
            let dash_z = far_edge + j as f32 * 10.0 + 5.0;
            for x in [-2.5, 0.0, 2.5] {
                out.push(
                    Instance::new(
                        part(Vec3::new(x, -0.09, dash_z), 0.0, Vec3::ZERO, Vec3::new(0.3, 0.02, 3.0)),
                        colors::MARKING,
                    )
                    .emissive(0.2),
                );
            }
        }
        // Solid edge lines
        for x in [-4.8, 4.8] {
            out.push(
                Instance::new(
                    part(Vec3::new(x, -0.09, z), 0.0, Vec3::ZERO, Vec3::new(0.15, 0.02, len)),
                    colors::MARKING,
                )
                .emissive(0.2),
            );
        }
    }
}

pub fn player(player: &Player, settings: &Settings, out: &mut Vec<Instance>) {
    let yaw = settings.effective_yaw(player.yaw);
    car(player.pos, yaw, &PLAYER_STYLE, colors::PLAYER, settings.quality.detailed_cars(), out);
}

pub fn obstacle(obstacle: &Obstacle, settings: &Settings, out: &mut Vec<Instance>) {
    car(
        obstacle.pos,
        Obstacle::YAW,
        &OBSTACLE_STYLE,
        colors::obstacle(obstacle.variant),
        settings.quality.detailed_cars(),
        out,
    );
}

pub fn coin(coin: &Coin, settings: &Settings, out: &mut Vec<Instance>) {
    let spin = settings.effective_spin(coin.spin);
    out.push(
        Instance::new(part(coin.pos, spin, Vec3::ZERO, Vec3::new(1.0, 1.0, 0.2)), colors::COIN)
            .emissive(0.2),
    );
}

/// All instances for one frame of the game
pub fn scene(state: &GameState, settings: &Settings) -> Vec<Instance> {
    let mut out = Vec::with_capacity(1024);
    road(&state.road, settings.quality.lane_markings(), &mut out);
    player(&state.player, settings, &mut out);
    for o in &state.obstacles {
        obstacle(o, settings, &mut out);
    }
    for c in &state.coins {
        coin(c, settings, &mut out);
    }
    out
}

/// The diagnostic scene is a single unit cube
pub fn diagnostic(cube: &SpinningCube) -> Vec<Instance> {
    vec![Instance::new(cube.transform(), colors::DIAGNOSTIC_CUBE)]
}
