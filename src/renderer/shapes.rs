//! Shape generation for 2D primitives
//!
//! `VertexBatch` turns surface draw calls into triangle lists in field
//! coordinates; `RenderState` maps them to clip space and uploads them.

use glam::Vec2;
use std::f32::consts::PI;

use super::Surface;
use super::vertex::{Color, Vertex, colors};

/// Segments used for obstacle-sized discs
pub const CIRCLE_SEGMENTS: u32 = 32;
/// Small discs (projectiles) need far fewer
pub const DOT_SEGMENTS: u32 = 8;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a thick line segment (one quad)
pub fn line(a: Vec2, b: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    // Two triangles
    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Generate vertices for a closed polygon outline
pub fn polygon_outline(points: &[Vec2], width: f32, color: Color) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        vertices.extend(line(a, b, width, color));
    }
    vertices
}

/// Text queued for an overlay; the GPU path has no glyphs
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
}

/// Triangle list for one frame
#[derive(Debug, Clone)]
pub struct VertexBatch {
    pub clear_color: Color,
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self {
            clear_color: colors::BACKGROUND,
            vertices: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for VertexBatch {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.labels.clear();
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, line_width: f32) {
        self.vertices.extend(polygon_outline(points, line_width, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let segments = if radius < 5.0 {
            DOT_SEGMENTS
        } else {
            CIRCLE_SEGMENTS
        };
        self.vertices.extend(circle(center, radius, color, segments));
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }
}
