//! Recording surface
//!
//! Keeps the draw calls of a frame as data. Used by the headless runner and
//! anywhere a frame needs inspecting without a GPU.

use glam::Vec2;

use super::Surface;
use super::vertex::Color;

/// One primitive draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    StrokePolygon {
        points: Vec<Vec2>,
        color: Color,
        line_width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    FillText {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// Draw calls of the most recent frame
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text drawn since the last clear
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for CommandList {
    fn clear(&mut self, color: Color) {
        // A clear starts a new frame
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }
}
