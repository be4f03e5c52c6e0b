use crate::{DrawRect, Result, SurfaceLayout};

/// A decoded (or decoding) frame image.
pub trait FrameImage {
    /// Intrinsic `(width, height)` once known.
    fn natural_size(&self) -> Option<(f64, f64)>;
}

/// 2D immediate-mode drawing target the widget renders into.
///
/// Implemented by the canvas backend in `hero-sequence-wasm` and by
/// recording fakes in tests.
pub trait Surface {
    type Image: FrameImage;

    /// Resizes the backing store and CSS box and installs the layout's scale
    /// transform.
    fn apply_layout(&mut self, layout: &SurfaceLayout) -> Result<()>;

    /// Current CSS box size, as laid out by the page.
    fn css_size(&self) -> (f64, f64);

    /// Backing store size in physical pixels.
    fn pixel_size(&self) -> (u32, u32);

    fn clear(&mut self, width: f64, height: f64) -> Result<()>;

    fn draw_image(&mut self, image: &Self::Image, rect: DrawRect) -> Result<()>;
}
