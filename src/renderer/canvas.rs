//! Canvas 2D surface (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, TextAlign};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::{Error, Result};

/// Draws onto an HTML canvas through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas, sizing its backing store to the logical screen
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| Error::Platform(format!("get_context failed: {e:?}")))?
            .ok_or_else(|| Error::Platform("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::Platform("2d context has unexpected type".into()))?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Convert a client-space pointer position into logical screen coordinates.
    /// Accounts for CSS scaling of the canvas element.
    pub fn to_logical(&self, client_x: f64, client_y: f64) -> (f32, f32) {
        let rect = self.canvas.get_bounding_client_rect();
        let scale_x = if rect.width() > 0.0 {
            SCREEN_WIDTH as f64 / rect.width()
        } else {
            1.0
        };
        let scale_y = if rect.height() > 0.0 {
            SCREEN_HEIGHT as f64 / rect.height()
        } else {
            1.0
        };
        (
            ((client_x - rect.left()) * scale_x) as f32,
            ((client_y - rect.top()) * scale_y) as f32,
        )
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: u32, align: TextAlign, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(&format!("{size_px}px Arial"));
        self.ctx.set_text_align(align.as_str());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
