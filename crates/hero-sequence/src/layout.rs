/// Aspect ratio used when the first frame has no intrinsic size yet.
pub const FALLBACK_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Backing-store and CSS dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Uniform transform applied to the drawing context so draw calls stay in
    /// CSS pixels.
    pub scale: f64,
}

/// `devicePixelRatio` with the `|| 1` fallback applied.
pub fn normalize_device_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// Sizes the surface to `target_height` CSS pixels tall with the width
/// following `intrinsic` (the first frame's natural `(width, height)`).
pub fn compute_layout(
    intrinsic: Option<(f64, f64)>,
    target_height: f64,
    device_pixel_ratio: f64,
) -> SurfaceLayout {
    let ratio = match intrinsic {
        Some((w, h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => w / h,
        _ => {
            tracing::warn!(
                ratio = FALLBACK_ASPECT_RATIO,
                "first frame not loaded yet; using fallback aspect ratio"
            );
            FALLBACK_ASPECT_RATIO
        }
    };
    let dpr = normalize_device_pixel_ratio(device_pixel_ratio);

    let css_height = target_height;
    let css_width = target_height * ratio;

    SurfaceLayout {
        css_width,
        css_height,
        pixel_width: to_pixels(css_width * dpr),
        pixel_height: to_pixels(css_height * dpr),
        scale: dpr,
    }
}

// Canvas dimensions are `unsigned long`; assignment truncates.
fn to_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_first_frame_ratio() {
        let layout = compute_layout(Some((1920.0, 1080.0)), 800.0, 1.0);
        assert!((layout.css_width - 1422.222_222).abs() < 1e-3);
        assert_eq!(layout.css_height, 800.0);
        assert_eq!(layout.pixel_width, 1422);
        assert_eq!(layout.pixel_height, 800);
        assert_eq!(layout.scale, 1.0);
    }

    #[test]
    fn physical_size_scales_with_device_pixel_ratio() {
        let layout = compute_layout(Some((1000.0, 1000.0)), 800.0, 2.0);
        assert_eq!(layout.css_width, 800.0);
        assert_eq!(layout.pixel_width, 1600);
        assert_eq!(layout.pixel_height, 1600);
        assert_eq!(layout.scale, 2.0);

        let layout = compute_layout(Some((1000.0, 1000.0)), 800.0, 1.5);
        assert_eq!(layout.pixel_width, 1200);
    }

    #[test]
    fn missing_intrinsic_size_uses_sixteen_by_nine() {
        for intrinsic in [None, Some((0.0, 0.0)), Some((640.0, 0.0)), Some((f64::NAN, 1.0))] {
            let layout = compute_layout(intrinsic, 900.0, 1.0);
            assert_eq!(layout.css_width, 1600.0, "{intrinsic:?}");
            assert_eq!(layout.pixel_width, 1600);
        }
    }

    #[test]
    fn unusable_device_pixel_ratio_falls_back_to_one() {
        for dpr in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(normalize_device_pixel_ratio(dpr), 1.0);
            let layout = compute_layout(Some((4.0, 3.0)), 600.0, dpr);
            assert_eq!(layout.scale, 1.0);
            assert_eq!(layout.pixel_width, 800);
        }
        assert_eq!(normalize_device_pixel_ratio(3.0), 3.0);
    }
}
