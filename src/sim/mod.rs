//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, point_in_circle, wrap_position};
pub use spawn::spawn_obstacle;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Projectile, Ship};
pub use tick::{TickInput, tick};
