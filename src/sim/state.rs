//! Game state and core simulation types
//!
//! Everything a session needs lives in `GameState`; the driver owns it and
//! replaces it wholesale on restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::wrap_position;
use crate::settings::Settings;
use crate::{heading, polar_to_cartesian};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ship hit an obstacle; the driver restarts the session
    GameOver,
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { pos: Vec2 },
    /// A projectile destroyed an obstacle; `score` is the new total
    ObstacleDestroyed { pos: Vec2, radius: f32, score: u64 },
    /// Ship collided with an obstacle, ending the session
    ShipDestroyed { score: u64 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading (radians, unbounded)
    pub angle: f32,
    /// Scalar speed along the heading
    pub speed: f32,
    pub thrust: f32,
    pub rotation_speed: f32,
    /// Collision radius, also the drawn half-length
    pub radius: f32,
}

impl Ship {
    /// A stationary ship at the centre of the field, facing +x
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.field_width / 2.0, settings.field_height / 2.0),
            angle: 0.0,
            speed: 0.0,
            thrust: settings.ship_thrust,
            rotation_speed: settings.ship_rotation_speed,
            radius: settings.ship_radius,
        }
    }

    /// Point of the nose, where projectiles leave
    pub fn nose(&self) -> Vec2 {
        self.pos + polar_to_cartesian(self.radius, self.angle)
    }

    /// Forward-Euler step along the heading
    pub fn advance(&mut self) {
        self.pos += heading(self.angle) * self.speed;
    }

    pub fn wrap(&mut self, field: Vec2) {
        self.pos = wrap_position(self.pos, self.radius, field);
    }
}

/// A drifting obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    pub speed: f32,
}

impl Obstacle {
    pub fn advance(&mut self) {
        self.pos += heading(self.angle) * self.speed;
    }

    pub fn wrap(&mut self, field: Vec2) {
        self.pos = wrap_position(self.pos, self.radius, field);
    }
}

/// A projectile fired from the ship's nose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    /// Ticks left before the projectile fizzles
    pub life: u32,
}

impl Projectile {
    /// Move one tick and burn one tick of lifetime
    pub fn advance(&mut self) {
        self.pos += heading(self.angle) * self.speed;
        self.life = self.life.saturating_sub(1);
    }

    /// Lifetime used up or outside the field (projectiles never wrap)
    pub fn is_spent(&self, field: Vec2) -> bool {
        self.life == 0
            || self.pos.x < 0.0
            || self.pos.x > field.x
            || self.pos.y < 0.0
            || self.pos.y > field.y
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this session was started with
    pub seed: u64,
    /// Spawner randomness
    pub rng: Pcg32,
    /// Tuning the session was started with
    pub settings: Settings,
    /// Obstacle speed assigned at spawn time
    pub obstacle_speed: f32,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ship: Ship,
    /// Unordered, spawns append
    pub obstacles: Vec<Obstacle>,
    /// Creation order, removal scans from the back
    pub projectiles: Vec<Projectile>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session: ship at the centre, full obstacle population.
    ///
    /// `settings` must already have passed [`Settings::validate`].
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ship: Ship::new(&settings),
            obstacle_speed: settings.obstacle_speed,
            settings,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        for _ in 0..state.settings.initial_obstacles {
            super::spawn::spawn_obstacle(&mut state);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Playfield size
    #[inline]
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.settings.field_width, self.settings.field_height)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Launch a projectile from the ship's nose along its heading
    pub fn fire_projectile(&mut self) {
        let id = self.next_entity_id();
        let pos = self.ship.nose();
        self.projectiles.push(Projectile {
            id,
            pos,
            angle: self.ship.angle,
            speed: self.settings.projectile_speed,
            life: self.settings.projectile_lifetime,
        });
        self.events.push(GameEvent::ProjectileFired { pos });
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
