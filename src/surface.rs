// Drawing surface the particle field paints on. The field only needs a
// handful of immediate mode primitives, so the canvas is hidden behind a
// trait and tests can record calls instead of rasterizing.

use crate::color::Color;
use crate::error::SetupError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    /// Sets the logical size of the drawing buffer. Resizing discards
    /// whatever was drawn before.
    fn set_size(&mut self, width: u32, height: u32);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64);

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], line_width: f64, color: Color, alpha: f64);
}

/// 2d context of an on-page `<canvas>`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SetupError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| SetupError::NoContext)?
            .ok_or(SetupError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::NoContext)?;
        Ok(CanvasSurface { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        // arc only throws for a negative radius, which FieldConfig::validate rules out
        let _ = self
            .context
            .arc(center[0], center[1], radius, 0.0, std::f64::consts::PI * 2.0);
        #[allow(deprecated)]
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_rgba(alpha)));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], line_width: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        #[allow(deprecated)]
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_rgba(alpha)));
        self.context.set_line_width(line_width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}
