use hero_sequence::{DrawRect, FrameImage, Surface, SurfaceLayout};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::{surface_error, MountError};

/// `<img>` handle for one frame.
#[derive(Debug, Clone)]
pub struct FrameHandle(HtmlImageElement);

impl FrameHandle {
    pub fn new(image: HtmlImageElement) -> Self {
        Self(image)
    }

    pub fn element(&self) -> &HtmlImageElement {
        &self.0
    }
}

impl FrameImage for FrameHandle {
    fn natural_size(&self) -> Option<(f64, f64)> {
        let (width, height) = (self.0.natural_width(), self.0.natural_height());
        (width > 0 && height > 0).then(|| (f64::from(width), f64::from(height)))
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(MountError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MountError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Image = FrameHandle;

    fn apply_layout(&mut self, layout: &SurfaceLayout) -> hero_sequence::Result<()> {
        // Resizing the backing store resets the context state, so the
        // transform goes on afterwards.
        self.canvas.set_width(layout.pixel_width);
        self.canvas.set_height(layout.pixel_height);

        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", layout.css_width))
            .map_err(|err| surface_error("set css width", err))?;
        style
            .set_property("height", &format!("{}px", layout.css_height))
            .map_err(|err| surface_error("set css height", err))?;

        self.ctx
            .set_transform(layout.scale, 0.0, 0.0, layout.scale, 0.0, 0.0)
            .map_err(|err| surface_error("set transform", err))
    }

    fn css_size(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.client_width()),
            f64::from(self.canvas.client_height()),
        )
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, width: f64, height: f64) -> hero_sequence::Result<()> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn draw_image(&mut self, image: &FrameHandle, rect: DrawRect) -> hero_sequence::Result<()> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                image.element(),
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            )
            .map_err(|err| surface_error("draw image", err))
    }
}
