//! Drift - A wrap-around asteroid field arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, obstacles, projectiles, collisions)
//! - `renderer`: Draw surface abstraction and WebGPU pipeline
//! - `game_loop`: Frame driver tying input, simulation and rendering together
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Data-driven game tuning

pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::{GameLoop, SessionEnd};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield size (canvas pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 20.0;
    pub const SHIP_THRUST: f32 = 0.05;
    pub const SHIP_ROTATION_SPEED: f32 = 0.05; // radians per tick
    /// Speed multiplier applied every tick without thrust
    pub const SHIP_DRAG: f32 = 0.98;

    /// Obstacle defaults
    pub const INITIAL_OBSTACLES: u32 = 5;
    pub const OBSTACLE_SPEED: f32 = 1.0;
    /// Radius range, whole units in [min, max)
    pub const OBSTACLE_RADIUS_MIN: f32 = 20.0;
    pub const OBSTACLE_RADIUS_MAX: f32 = 50.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 5.0;
    pub const PROJECTILE_LIFETIME: u32 = 100; // ticks
    /// Drawn size only, projectiles collide as points
    pub const PROJECTILE_DOT_RADIUS: f32 = 2.0;

    /// Score overlay
    pub const SCORE_TEXT_X: f32 = 10.0;
    pub const SCORE_TEXT_Y: f32 = 20.0;
    pub const SCORE_TEXT_SIZE: f32 = 16.0;
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    heading(theta) * r
}

/// Rotate a ship-space point by `angle` and move it to `origin`
#[inline]
pub fn to_world(origin: Vec2, angle: f32, local: Vec2) -> Vec2 {
    origin + Vec2::from_angle(angle).rotate(local)
}
