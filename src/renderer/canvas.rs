//! Canvas2D render surface

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::platform::RenderSurface;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas; fails if a 2D context is unavailable
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to a new CSS size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }
}

impl RenderSurface for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn draw_sprite(&mut self, image: &HtmlImageElement, x: f32, y: f32, w: f32, h: f32) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image, x as f64, y as f64, w as f64, h as f64,
        ) {
            log::warn!("drawImage failed: {:?}", e);
        }
    }
}
