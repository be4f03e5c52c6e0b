use std::cell::RefCell;
use std::rc::Rc;

use hero_sequence::{HeroSequence, ScrollRegion, SequenceConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, HtmlCanvasElement, HtmlImageElement, PageTransitionEvent, Window,
};

use crate::error::{MountError, Result};
use crate::surface::{CanvasSurface, FrameHandle};

/// Load/error observers attached to one frame's `<img>`.
struct ImageObserver {
    image: HtmlImageElement,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

#[derive(Default)]
struct Hooks {
    scroll: Option<Closure<dyn FnMut()>>,
    resize: Option<Closure<dyn FnMut()>>,
    page_hide: Option<Closure<dyn FnMut(PageTransitionEvent)>>,
    animation_frame: Option<Closure<dyn FnMut()>>,
    animation_frame_id: Option<i32>,
    images: Vec<ImageObserver>,
}

/// A sequence mounted on a live canvas.
///
/// Every browser callback holds a `Weak` back-reference, so dropping the last
/// `Rc` (after [`Mounted::teardown`]) frees the widget.
pub(crate) struct Mounted {
    window: Window,
    region_selector: String,
    sequence: RefCell<HeroSequence<CanvasSurface>>,
    hooks: RefCell<Hooks>,
}

impl Mounted {
    pub(crate) fn mount(config: SequenceConfig) -> Result<Rc<Self>> {
        let window = web_sys::window().ok_or(MountError::MissingWindow)?;
        let document = window.document().ok_or(MountError::MissingDocument)?;
        let element = document
            .get_element_by_id(&config.canvas_id)
            .ok_or_else(|| MountError::CanvasNotFound(config.canvas_id.clone()))?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MountError::NotACanvas(config.canvas_id.clone()))?;

        let region_selector = config.region_selector.clone();
        let sequence = HeroSequence::new(config, CanvasSurface::new(canvas)?)?;

        let mounted = Rc::new(Self {
            window,
            region_selector,
            sequence: RefCell::new(sequence),
            hooks: RefCell::new(Hooks::default()),
        });
        mounted.install_animation_frame();
        if let Err(err) = mounted
            .start_preload()
            .and_then(|()| mounted.install_listeners())
        {
            mounted.teardown();
            return Err(err);
        }
        Ok(mounted)
    }

    pub(crate) fn with_sequence<R>(&self, f: impl FnOnce(&HeroSequence<CanvasSurface>) -> R) -> R {
        f(&self.sequence.borrow())
    }

    pub(crate) fn with_sequence_mut<R>(
        &self,
        f: impl FnOnce(&mut HeroSequence<CanvasSurface>) -> R,
    ) -> R {
        f(&mut self.sequence.borrow_mut())
    }

    pub(crate) fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn start_preload(self: &Rc<Self>) -> Result<()> {
        let mut sequence = self.sequence.borrow_mut();
        let mut hooks = self.hooks.borrow_mut();
        sequence.begin_preload()?;

        for index in 0..sequence.frame_count() {
            let image = match sequence.store().image(index) {
                Some(handle) => handle.element().clone(),
                None => HtmlImageElement::new()?,
            };

            let weak = Rc::downgrade(self);
            let on_load = Closure::<dyn FnMut()>::new(move || {
                if let Some(mounted) = weak.upgrade() {
                    mounted.on_frame_loaded(index);
                }
            });
            let weak = Rc::downgrade(self);
            let on_error = Closure::<dyn FnMut()>::new(move || {
                if let Some(mounted) = weak.upgrade() {
                    mounted.on_frame_failed(index);
                }
            });
            image.set_onload(Some(on_load.as_ref().unchecked_ref()));
            image.set_onerror(Some(on_error.as_ref().unchecked_ref()));

            let src = sequence.attach_frame(index, FrameHandle::new(image.clone()))?;
            image.set_src(src);

            hooks.images.push(ImageObserver {
                image,
                _on_load: on_load,
                _on_error: on_error,
            });
        }
        Ok(())
    }

    fn install_animation_frame(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(mounted) = weak.upgrade() {
                mounted.on_animation_frame();
            }
        });
        self.hooks.borrow_mut().animation_frame = Some(callback);
    }

    fn install_listeners(self: &Rc<Self>) -> Result<()> {
        let passive = AddEventListenerOptions::new();
        passive.set_passive(true);

        let weak = Rc::downgrade(self);
        let scroll = Closure::<dyn FnMut()>::new(move || {
            if let Some(mounted) = weak.upgrade() {
                mounted.on_scroll();
            }
        });
        self.window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                scroll.as_ref().unchecked_ref(),
                &passive,
            )?;
        self.hooks.borrow_mut().scroll = Some(scroll);

        let weak = Rc::downgrade(self);
        let resize = Closure::<dyn FnMut()>::new(move || {
            if let Some(mounted) = weak.upgrade() {
                mounted.on_resize();
            }
        });
        self.window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        self.hooks.borrow_mut().resize = Some(resize);
        Ok(())
    }

    /// Tears the widget down when the page is hidden for unload. A page kept
    /// in the back/forward cache stays mounted so it works again on return.
    pub(crate) fn teardown_on_page_hide(self: &Rc<Self>) -> Result<()> {
        let weak = Rc::downgrade(self);
        let page_hide = Closure::<dyn FnMut(PageTransitionEvent)>::new(
            move |event: PageTransitionEvent| {
                if event.persisted() {
                    tracing::debug!("page cached; keeping hero sequence mounted");
                    return;
                }
                if let Some(mounted) = weak.upgrade() {
                    mounted.teardown();
                }
            },
        );
        self.window
            .add_event_listener_with_callback("pagehide", page_hide.as_ref().unchecked_ref())?;
        self.hooks.borrow_mut().page_hide = Some(page_hide);
        Ok(())
    }

    fn on_frame_loaded(&self, index: usize) {
        let dpr = self.device_pixel_ratio();
        let result = self.sequence.borrow_mut().frame_loaded(index, dpr);
        if let Err(err) = result {
            tracing::warn!(index, %err, "ignoring load notification");
        }
    }

    fn on_frame_failed(&self, index: usize) {
        if let Err(err) = self.sequence.borrow_mut().frame_failed(index) {
            tracing::warn!(index, %err, "ignoring error notification");
        }
    }

    fn scroll_region(&self) -> Option<ScrollRegion> {
        let region = {
            let sequence = self.sequence.borrow();
            sequence
                .surface()
                .canvas()
                .closest(&self.region_selector)
                .ok()
                .flatten()?
        };
        let rect = region.get_bounding_client_rect();
        let scroll_y = self.window.scroll_y().ok()?;
        Some(ScrollRegion::new(rect.top() + scroll_y, rect.height()))
    }

    fn on_scroll(&self) {
        let region = self.scroll_region();
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);

        let needs_frame = self
            .sequence
            .borrow_mut()
            .on_scroll(scroll_y, viewport_height, region);
        if needs_frame {
            self.request_animation_frame();
        }
    }

    fn on_resize(&self) {
        let ready = self.sequence.borrow().is_ready();
        if !ready {
            return;
        }
        let dpr = self.device_pixel_ratio();
        self.sequence.borrow_mut().resize(dpr);
        self.on_scroll();
    }

    fn request_animation_frame(&self) {
        let mut hooks = self.hooks.borrow_mut();
        let Some(callback) = hooks.animation_frame.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => hooks.animation_frame_id = Some(id),
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed; dropping redraw");
                drop(hooks);
                self.sequence.borrow_mut().cancel_scheduled_redraw();
            }
        }
    }

    fn on_animation_frame(&self) {
        self.hooks.borrow_mut().animation_frame_id = None;
        self.sequence.borrow_mut().on_animation_frame();
    }

    /// Removes every listener and observer. Safe to call more than once.
    pub(crate) fn teardown(&self) {
        let hooks = std::mem::take(&mut *self.hooks.borrow_mut());
        let Hooks {
            scroll,
            resize,
            page_hide,
            animation_frame,
            animation_frame_id,
            images,
        } = hooks;

        for (event, callback) in [("scroll", &scroll), ("resize", &resize)] {
            if let Some(callback) = callback {
                self.remove_listener(event, callback.as_ref());
            }
        }
        if let Some(callback) = &page_hide {
            self.remove_listener("pagehide", callback.as_ref());
        }
        if let Some(id) = animation_frame_id {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                tracing::debug!(id, ?err, "cancelAnimationFrame failed");
            }
        }
        for observer in &images {
            observer.image.set_onload(None);
            observer.image.set_onerror(None);
        }
        self.sequence.borrow_mut().cancel_scheduled_redraw();

        drop((scroll, resize, page_hide, animation_frame, images));
        tracing::debug!("hero sequence unmounted");
    }

    fn remove_listener(&self, event: &str, callback: &JsValue) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback(event, callback.unchecked_ref())
        {
            tracing::debug!(event, ?err, "removeEventListener failed");
        }
    }
}
