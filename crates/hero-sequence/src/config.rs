use serde::Deserialize;

use crate::{Result, SequenceError};

pub const DEFAULT_FRAME_COUNT: usize = 43;
pub const DEFAULT_FRAME_FOLDER: &str = "../asset/cake_video";
pub const DEFAULT_FRAME_BASENAME: &str = "kling_20251128_Image_to_Video_rotate_a_c_5710_0_";
pub const DEFAULT_FRAME_EXTENSION: &str = ".png";
pub const DEFAULT_TARGET_HEIGHT: f64 = 800.0;
pub const DEFAULT_CANVAS_ID: &str = "hero-sequence";
pub const DEFAULT_REGION_SELECTOR: &str = ".hero";

/// Widget configuration.
///
/// Field names deserialize from camelCase so a page can pass
/// `{ frameCount: 43, frameFolder: "..." }` straight through. Every field is
/// optional.
///
/// `frame_folder` is a URL reference that the browser resolves against the
/// document base URL: relative values are page-relative, `/...` values are
/// origin-relative and absolute URLs are used as-is. An empty folder puts the
/// frames next to the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SequenceConfig {
    pub frame_count: usize,
    pub frame_folder: String,
    pub frame_basename: String,
    pub frame_extension: String,
    /// CSS height of the surface in pixels; the width follows the first
    /// frame's aspect ratio.
    pub target_height: f64,
    pub canvas_id: String,
    /// CSS selector for the ancestor of the canvas whose extent drives the
    /// animation.
    pub region_selector: String,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            frame_folder: DEFAULT_FRAME_FOLDER.to_owned(),
            frame_basename: DEFAULT_FRAME_BASENAME.to_owned(),
            frame_extension: DEFAULT_FRAME_EXTENSION.to_owned(),
            target_height: DEFAULT_TARGET_HEIGHT,
            canvas_id: DEFAULT_CANVAS_ID.to_owned(),
            region_selector: DEFAULT_REGION_SELECTOR.to_owned(),
        }
    }
}

impl SequenceConfig {
    /// Every key a configuration object may carry.
    pub const KEYS: [&'static str; 7] = [
        "frameCount",
        "frameFolder",
        "frameBasename",
        "frameExtension",
        "targetHeight",
        "canvasId",
        "regionSelector",
    ];

    /// Rejects the first key outside [`SequenceConfig::KEYS`]. Hosts whose
    /// deserializer only visits the declared fields call this first.
    pub fn check_keys<K: AsRef<str>>(keys: impl IntoIterator<Item = K>) -> Result<()> {
        for key in keys {
            let key = key.as_ref();
            if !Self::KEYS.iter().any(|known| *known == key) {
                return Err(SequenceError::UnknownKey(key.to_owned()));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_count == 0 {
            return Err(SequenceError::EmptySequence);
        }
        if !self.target_height.is_finite() || self.target_height <= 0.0 {
            return Err(SequenceError::InvalidTargetHeight(self.target_height));
        }
        if self.canvas_id.trim().is_empty() {
            return Err(SequenceError::EmptyField("canvasId"));
        }
        if self.region_selector.trim().is_empty() {
            return Err(SequenceError::EmptyField("regionSelector"));
        }
        Ok(())
    }
}
