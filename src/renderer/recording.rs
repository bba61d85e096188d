//! Surface that records draw calls instead of rasterizing them

use super::{Surface, TextAlign};

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    Text(TextCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_px: u32,
    pub align: TextAlign,
    pub color: String,
}

/// Collects every draw call of a frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Drop the previous frame's commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Find a text command by exact content
    pub fn text(&self, needle: &str) -> Option<&TextCommand> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Text(t) if t.text == needle => Some(t),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.text(needle).is_some()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: u32, align: TextAlign, color: &str) {
        self.commands.push(DrawCommand::Text(TextCommand {
            text: text.to_string(),
            x,
            y,
            size_px,
            align,
            color: color.to_string(),
        }));
    }
}
