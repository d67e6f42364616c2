//! Rendering module
//!
//! `render` walks the game state and issues primitive draw calls to a
//! [`Surface`]. Surfaces either record the calls (`CommandList`) or tessellate
//! them into triangles for the WebGPU pipeline (`VertexBatch`).

pub mod commands;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use commands::{CommandList, DrawCommand};
pub use pipeline::RenderState;
pub use shapes::{TextLabel, VertexBatch};
pub use vertex::{Color, Vertex, colors};

use glam::Vec2;

use crate::consts::{PROJECTILE_DOT_RADIUS, SCORE_TEXT_SIZE, SCORE_TEXT_X, SCORE_TEXT_Y};
use crate::sim::{GameState, Ship};
use crate::to_world;

/// Outline width of the ship triangle
pub const SHIP_LINE_WIDTH: f32 = 2.0;

/// A 2D drawing target in field coordinates (origin top-left, y down)
pub trait Surface {
    /// Fill the whole frame
    fn clear(&mut self, color: Color);
    /// Stroke a closed polygon outline
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, line_width: f32);
    /// Fill a disc
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draw text with its baseline starting at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);
}

/// Ship triangle in world space: nose first, then the two tail corners
pub fn ship_outline(ship: &Ship) -> [Vec2; 3] {
    let r = ship.radius;
    [
        to_world(ship.pos, ship.angle, Vec2::new(r, 0.0)),
        to_world(ship.pos, ship.angle, Vec2::new(-r, -r / 2.0)),
        to_world(ship.pos, ship.angle, Vec2::new(-r, r / 2.0)),
    ]
}

/// Draw one frame of the current state
pub fn render<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear(colors::BACKGROUND);

    surface.stroke_polygon(&ship_outline(&state.ship), colors::SHIP, SHIP_LINE_WIDTH);

    for obstacle in &state.obstacles {
        surface.fill_circle(obstacle.pos, obstacle.radius, colors::OBSTACLE);
    }

    for projectile in &state.projectiles {
        surface.fill_circle(projectile.pos, PROJECTILE_DOT_RADIUS, colors::PROJECTILE);
    }

    surface.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(SCORE_TEXT_X, SCORE_TEXT_Y),
        SCORE_TEXT_SIZE,
        colors::TEXT,
    );
}
