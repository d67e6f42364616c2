//! Simulation tick
//!
//! Advances the session by exactly one frame. Sub-phases run in a fixed order:
//! fire, ship control, ship wrap, obstacles, projectiles (with projectile hits),
//! then ship collision.

use super::collision::{circles_overlap, point_in_circle};
use super::spawn::spawn_obstacle;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    /// One-shot fire request (edge-triggered)
    pub fire: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Fire uses the ship pose from before this tick's movement
    if input.fire {
        state.fire_projectile();
    }

    update_ship(state, input);

    let field = state.field();
    for obstacle in &mut state.obstacles {
        obstacle.advance();
        obstacle.wrap(field);
    }

    update_projectiles(state);
    check_ship_collision(state);
}

fn update_ship(state: &mut GameState, input: &TickInput) {
    let field = state.field();
    let drag = state.settings.ship_drag;
    let ship = &mut state.ship;

    if input.thrust {
        ship.speed += ship.thrust;
    } else {
        ship.speed *= drag;
    }

    if input.turn_left {
        ship.angle -= ship.rotation_speed;
    }
    if input.turn_right {
        ship.angle += ship.rotation_speed;
    }

    ship.advance();
    ship.wrap(field);
}

/// Move projectiles and resolve projectile/obstacle hits.
///
/// Projectiles are visited newest first and obstacles are scanned newest
/// first; the first obstacle found containing the projectile is the one
/// destroyed. Removing by index while walking backwards leaves the
/// unvisited prefix untouched.
fn update_projectiles(state: &mut GameState) {
    let field = state.field();

    let mut i = state.projectiles.len();
    while i > 0 {
        i -= 1;

        let projectile = &mut state.projectiles[i];
        projectile.advance();
        if projectile.is_spent(field) {
            state.projectiles.remove(i);
            continue;
        }

        let pos = projectile.pos;
        let Some(j) = state
            .obstacles
            .iter()
            .rposition(|o| point_in_circle(pos, o.pos, o.radius))
        else {
            continue;
        };

        let obstacle = state.obstacles.remove(j);
        state.projectiles.remove(i);
        state.score += 1;
        log::debug!(
            "Obstacle {} destroyed at ({:.1}, {:.1}), score {}",
            obstacle.id,
            obstacle.pos.x,
            obstacle.pos.y,
            state.score
        );
        state.events.push(GameEvent::ObstacleDestroyed {
            pos: obstacle.pos,
            radius: obstacle.radius,
            score: state.score,
        });
        spawn_obstacle(state);
    }
}

fn check_ship_collision(state: &mut GameState) {
    let ship = &state.ship;
    let hit = state
        .obstacles
        .iter()
        .any(|o| circles_overlap(ship.pos, ship.radius, o.pos, o.radius));

    if hit {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::ShipDestroyed { score: state.score });
        log::info!(
            "Ship destroyed after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
    }
}
