//! Scroll-scrubbed frame sequence ("hero sequence") widget core.
//!
//! A fixed set of pre-rendered frames is preloaded and, as the page scrolls
//! through a designated region, the matching frame is drawn to a 2D surface
//! sized from the first frame's aspect ratio. This crate holds the
//! host-agnostic pieces:
//! - frame identity and the preload barrier ([`FrameSource`], [`FrameStore`])
//! - surface sizing ([`compute_layout`])
//! - scroll-to-frame mapping ([`ScrollRegion`], [`frame_index`])
//! - contain placement ([`contain`])
//! - redraw coalescing ([`RedrawScheduler`])
//! - the [`HeroSequence`] state machine over a [`Surface`]
//!
//! The browser bindings live in `hero-sequence-wasm`.

mod config;
mod error;
mod frames;
mod layout;
mod placement;
mod schedule;
mod scroll;
mod surface;
mod widget;

pub use config::{
    SequenceConfig, DEFAULT_CANVAS_ID, DEFAULT_FRAME_BASENAME, DEFAULT_FRAME_COUNT,
    DEFAULT_FRAME_EXTENSION, DEFAULT_FRAME_FOLDER, DEFAULT_REGION_SELECTOR, DEFAULT_TARGET_HEIGHT,
};
pub use error::{Result, SequenceError};
pub use frames::{FrameSource, FrameStore, LoadState, PreloadProgress};
pub use layout::{
    compute_layout, normalize_device_pixel_ratio, SurfaceLayout, FALLBACK_ASPECT_RATIO,
};
pub use placement::{contain, DrawRect};
pub use schedule::RedrawScheduler;
pub use scroll::{frame_index, ScrollRegion};
pub use surface::{FrameImage, Surface};
pub use widget::{HeroSequence, Phase};
