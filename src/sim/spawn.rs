//! Obstacle spawning
//!
//! Obstacles enter from just beyond the left or right edge so they never
//! appear on top of the ship.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{GameState, Obstacle};

/// Create one obstacle with randomized size, edge, height and heading, and append it
pub fn spawn_obstacle(state: &mut GameState) {
    let field = state.field();
    let min = state.settings.obstacle_radius_min.ceil() as u32;
    let max = state.settings.obstacle_radius_max.ceil() as u32;

    let radius = state.rng.random_range(min..max) as f32;
    let x = if state.rng.random_bool(0.5) {
        -radius
    } else {
        field.x + radius
    };
    let y = state.rng.random_range(0.0..field.y);
    let angle = state.rng.random_range(0.0..TAU);

    let id = state.next_entity_id();
    let obstacle = Obstacle {
        id,
        pos: Vec2::new(x, y),
        angle,
        radius,
        speed: state.obstacle_speed,
    };
    log::debug!(
        "Spawned obstacle {} r={} at ({:.1}, {:.1})",
        id,
        radius,
        x,
        y
    );
    state.obstacles.push(obstacle);
}
