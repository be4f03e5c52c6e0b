/// Document-relative extent of the page region whose scroll range drives the
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    pub top: f64,
    pub height: f64,
}

impl ScrollRegion {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Scroll offset at which the region's top reaches the viewport top.
    pub fn start(&self) -> f64 {
        self.top
    }

    /// Scroll offset at which the region's bottom reaches the viewport bottom.
    pub fn end(&self, viewport_height: f64) -> f64 {
        self.top + self.height - viewport_height
    }

    /// Normalized progress of `scroll_y` across `[start, end]`.
    ///
    /// A region no taller than the viewport has no scroll range and always
    /// maps to 0.
    pub fn fraction(&self, scroll_y: f64, viewport_height: f64) -> f64 {
        let start = self.start();
        let end = self.end(viewport_height);
        if !start.is_finite() || !end.is_finite() || !scroll_y.is_finite() || end <= start {
            return 0.0;
        }
        if scroll_y <= start {
            0.0
        } else if scroll_y >= end {
            1.0
        } else {
            (scroll_y - start) / (end - start)
        }
    }
}

/// `floor(fraction * frame_count)` clamped to `[0, frame_count - 1]`.
pub fn frame_index(fraction: f64, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    let last = frame_count - 1;
    let scaled = (fraction * frame_count as f64).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else if scaled >= last as f64 {
        last
    } else {
        scaled as usize
    }
}
