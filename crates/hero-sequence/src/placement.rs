/// Destination rectangle for a draw call, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fits an `image_width` x `image_height` image inside the surface without
/// cropping and centers it (letterboxing or pillarboxing as needed).
///
/// Returns `None` if either size is empty or non-finite.
pub fn contain(
    image_width: f64,
    image_height: f64,
    surface_width: f64,
    surface_height: f64,
) -> Option<DrawRect> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !(usable(image_width)
        && usable(image_height)
        && usable(surface_width)
        && usable(surface_height))
    {
        return None;
    }

    let image_ratio = image_width / image_height;
    let surface_ratio = surface_width / surface_height;

    let (width, height) = if image_ratio > surface_ratio {
        (surface_width, surface_width / image_ratio)
    } else {
        (surface_height * image_ratio, surface_height)
    };

    Some(DrawRect {
        x: (surface_width - width) / 2.0,
        y: (surface_height - height) / 2.0,
        width,
        height,
    })
}
