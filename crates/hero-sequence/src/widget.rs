use crate::frames::{FrameSource, FrameStore, PreloadProgress};
use crate::layout::{compute_layout, SurfaceLayout};
use crate::placement::contain;
use crate::schedule::RedrawScheduler;
use crate::scroll::{frame_index, ScrollRegion};
use crate::surface::{FrameImage, Surface};
use crate::{Result, SequenceConfig, SequenceError};

/// Lifecycle of a mounted sequence. Scrolling and resizing happen inside
/// `Ready` and do not change the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Preloading,
    Ready,
}

/// One scroll-scrubbed frame sequence bound to a drawing surface.
///
/// The type owns every piece of mutable widget state (frames, current index,
/// layout, pending redraw). Hosts feed it load notifications, scroll
/// positions and animation-frame ticks; it never calls back into the host.
pub struct HeroSequence<S: Surface> {
    config: SequenceConfig,
    source: FrameSource,
    store: FrameStore<S::Image>,
    surface: S,
    phase: Phase,
    current_frame: usize,
    layout: Option<SurfaceLayout>,
    scheduler: RedrawScheduler,
}

impl<S: Surface> HeroSequence<S> {
    pub fn new(config: SequenceConfig, surface: S) -> Result<Self> {
        config.validate()?;
        let source = FrameSource::from_config(&config);
        let store = FrameStore::new(&source, config.frame_count);
        Ok(Self {
            config,
            source,
            store,
            surface,
            phase: Phase::Uninitialized,
            current_frame: 0,
            layout: None,
            scheduler: RedrawScheduler::new(),
        })
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn frame_count(&self) -> usize {
        self.store.len()
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn layout(&self) -> Option<&SurfaceLayout> {
        self.layout.as_ref()
    }

    pub fn store(&self) -> &FrameStore<S::Image> {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn frame_src(&self, index: usize) -> String {
        self.source.src(index)
    }

    pub fn begin_preload(&mut self) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(SequenceError::InvalidPhase {
                op: "begin preload",
                phase: self.phase,
            });
        }
        self.phase = Phase::Preloading;
        tracing::debug!(frames = self.frame_count(), "preloading frame sequence");
        Ok(())
    }

    /// Hands the image handle for `index` to the store. Returns the source the
    /// host should assign to it.
    pub fn attach_frame(&mut self, index: usize, image: S::Image) -> Result<&str> {
        if self.phase != Phase::Preloading {
            return Err(SequenceError::InvalidPhase {
                op: "attach a frame",
                phase: self.phase,
            });
        }
        self.store.attach(index, image)
    }

    /// Load observer for frame `index`. The notification that completes the
    /// sequence sizes the surface and draws frame 0.
    pub fn frame_loaded(
        &mut self,
        index: usize,
        device_pixel_ratio: f64,
    ) -> Result<PreloadProgress> {
        self.expect_started("record a frame load")?;
        let progress = self.store.mark_loaded(index)?;
        if progress == PreloadProgress::Complete {
            self.phase = Phase::Ready;
            self.current_frame = 0;
            self.resize(device_pixel_ratio);
            tracing::info!(frames = self.frame_count(), "frame sequence preloaded");
        }
        Ok(progress)
    }

    pub fn frame_failed(&mut self, index: usize) -> Result<()> {
        self.expect_started("record a frame failure")?;
        self.store.mark_failed(index)
    }

    fn expect_started(&self, op: &'static str) -> Result<()> {
        match self.phase {
            Phase::Preloading | Phase::Ready => Ok(()),
            phase @ Phase::Uninitialized => Err(SequenceError::InvalidPhase { op, phase }),
        }
    }

    /// Sizes the surface from the first frame and redraws the current frame.
    pub fn resize(&mut self, device_pixel_ratio: f64) -> SurfaceLayout {
        let intrinsic = self
            .store
            .loaded_image(0)
            .and_then(FrameImage::natural_size);
        let layout = compute_layout(intrinsic, self.config.target_height, device_pixel_ratio);
        if let Err(err) = self.surface.apply_layout(&layout) {
            tracing::warn!(%err, "failed to apply surface layout");
        }
        self.layout = Some(layout);
        self.render(self.current_frame);
        layout
    }

    /// Draws frame `index` (clamped) with contain placement. Returns `false`
    /// without touching the surface if that frame has not loaded.
    pub fn render(&mut self, index: usize) -> bool {
        let index = index.min(self.frame_count().saturating_sub(1));
        let Some(image) = self.store.loaded_image(index) else {
            return false;
        };
        self.current_frame = index;

        let (pixel_width, pixel_height) = self.surface.pixel_size();
        if let Err(err) = self
            .surface
            .clear(f64::from(pixel_width), f64::from(pixel_height))
        {
            tracing::warn!(%err, "failed to clear surface");
        }

        let (surface_width, surface_height) = self.surface.css_size();
        let Some((image_width, image_height)) = image.natural_size() else {
            return false;
        };
        let Some(rect) = contain(image_width, image_height, surface_width, surface_height) else {
            tracing::debug!(
                surface_width,
                surface_height,
                "surface has no drawable area; skipping frame"
            );
            return false;
        };
        if let Err(err) = self.surface.draw_image(image, rect) {
            tracing::warn!(index, %err, "failed to draw frame");
            return false;
        }
        true
    }

    /// Frame index for `scroll_y` within `region`.
    pub fn frame_for_scroll(
        &self,
        scroll_y: f64,
        viewport_height: f64,
        region: ScrollRegion,
    ) -> usize {
        frame_index(region.fraction(scroll_y, viewport_height), self.frame_count())
    }

    /// Scroll observer. Records the mapped frame for the next animation frame
    /// and returns `true` if the host must request one. Without a region, or
    /// before preload completes, nothing is scheduled.
    pub fn on_scroll(
        &mut self,
        scroll_y: f64,
        viewport_height: f64,
        region: Option<ScrollRegion>,
    ) -> bool {
        let Some(region) = region else {
            return false;
        };
        if !self.is_ready() {
            return false;
        }
        let index = self.frame_for_scroll(scroll_y, viewport_height, region);
        self.scheduler.request(index)
    }

    /// Animation-frame callback: draws the latest scheduled frame, if any.
    pub fn on_animation_frame(&mut self) -> Option<usize> {
        let index = self.scheduler.take()?;
        self.render(index).then_some(self.current_frame)
    }

    pub fn redraw_pending(&self) -> bool {
        self.scheduler.is_in_flight()
    }

    pub fn cancel_scheduled_redraw(&mut self) {
        self.scheduler.cancel();
    }
}
