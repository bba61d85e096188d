//! 2D rendering module
//!
//! The renderer only reads the world and issues filled rectangles and text
//! to a [`Surface`]. The browser backs that with a canvas 2D context; tests
//! and the headless runner record the commands instead.

mod draw;
mod recording;

#[cfg(target_arch = "wasm32")]
mod canvas;

pub use draw::render;
pub use recording::{DrawCommand, RecordingSurface, TextCommand};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A drawing target sized to the 800x600 logical screen
pub trait Surface {
    /// Fill an axis-aligned rectangle with a CSS color
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);

    /// Draw text with its baseline at `y`, anchored horizontally at `x`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: u32, align: TextAlign, color: &str);
}
