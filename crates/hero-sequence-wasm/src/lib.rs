#![forbid(unsafe_code)]
//! Browser bindings for `hero-sequence`.
//!
//! Pages either call `install(config)` once (mounts on `DOMContentLoaded`,
//! never throws, tears down on `pagehide`) or manage the widget themselves
//! with `HeroSequence.mount(config)` / `unmount()`.

pub mod console;

#[cfg(target_arch = "wasm32")]
mod error;
#[cfg(target_arch = "wasm32")]
mod mount;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
pub use error::MountError;
#[cfg(target_arch = "wasm32")]
pub use surface::{CanvasSurface, FrameHandle};

// The full implementation is only meaningful on wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use hero_sequence::{FrameSource, SequenceConfig, SequenceError};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::error::MountError;
    use crate::mount::Mounted;

    thread_local! {
        static INSTALLED: RefCell<Option<Rc<Mounted>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        console_error_panic_hook::set_once();
        crate::console::init(tracing::Level::INFO);
    }

    /// `undefined`/`null` select every default.
    fn parse_config(value: JsValue) -> Result<SequenceConfig, MountError> {
        if value.is_undefined() || value.is_null() {
            return Ok(SequenceConfig::default());
        }
        // serde-wasm-bindgen only looks up declared fields.
        if let Some(object) = value.dyn_ref::<js_sys::Object>() {
            let keys = js_sys::Object::keys(object);
            SequenceConfig::check_keys(keys.iter().filter_map(|key| key.as_string()))?;
        }
        let config: SequenceConfig = serde_wasm_bindgen::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Handle to a mounted sequence. `free()` unmounts it.
    #[wasm_bindgen(js_name = HeroSequence)]
    pub struct HeroSequenceHandle {
        mounted: Rc<Mounted>,
    }

    #[wasm_bindgen(js_class = HeroSequence)]
    impl HeroSequenceHandle {
        /// Mounts on the configured canvas and starts preloading. Throws if
        /// the canvas is missing or the configuration is invalid.
        pub fn mount(config: JsValue) -> Result<HeroSequenceHandle, JsValue> {
            let config = parse_config(config)?;
            let mounted = Mounted::mount(config)?;
            Ok(Self { mounted })
        }

        pub fn unmount(&self) {
            self.mounted.teardown();
        }

        pub fn resize(&self) {
            let dpr = self.mounted.device_pixel_ratio();
            self.mounted.with_sequence_mut(|sequence| {
                sequence.resize(dpr);
            });
        }

        /// Draws `index` immediately. Returns `false` if that frame has not
        /// loaded.
        pub fn render(&self, index: u32) -> bool {
            self.mounted.with_sequence_mut(|sequence| sequence.render(index as usize))
        }

        #[wasm_bindgen(getter, js_name = currentFrame)]
        pub fn current_frame(&self) -> u32 {
            self.mounted.with_sequence(|sequence| sequence.current_frame() as u32)
        }

        #[wasm_bindgen(getter, js_name = frameCount)]
        pub fn frame_count(&self) -> u32 {
            self.mounted.with_sequence(|sequence| sequence.frame_count() as u32)
        }

        #[wasm_bindgen(getter, js_name = loadedFrames)]
        pub fn loaded_frames(&self) -> u32 {
            self.mounted.with_sequence(|sequence| sequence.store().loaded_count() as u32)
        }

        #[wasm_bindgen(getter, js_name = failedFrames)]
        pub fn failed_frames(&self) -> u32 {
            self.mounted.with_sequence(|sequence| sequence.store().failed_count() as u32)
        }

        #[wasm_bindgen(getter, js_name = isReady)]
        pub fn is_ready(&self) -> bool {
            self.mounted.with_sequence(|sequence| sequence.is_ready())
        }
    }

    impl Drop for HeroSequenceHandle {
        fn drop(&mut self) {
            self.mounted.teardown();
        }
    }

    /// Mounts the page's sequence once the DOM is parsed. Failures are logged
    /// and leave the page untouched.
    #[wasm_bindgen]
    pub fn install(config: JsValue) {
        let config = match parse_config(config) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(%err, "hero sequence disabled");
                return;
            }
        };
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            tracing::error!(err = %MountError::MissingDocument, "hero sequence disabled");
            return;
        };

        if document.ready_state() != "loading" {
            mount_installed(config);
            return;
        }
        let on_ready = Closure::once_into_js(move || mount_installed(config));
        if let Err(err) =
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            tracing::error!(?err, "failed to wait for DOMContentLoaded");
        }
    }

    fn mount_installed(config: SequenceConfig) {
        let mounted = match Mounted::mount(config) {
            Ok(mounted) => mounted,
            Err(err) => {
                tracing::error!(%err, "hero sequence disabled");
                return;
            }
        };
        if let Err(err) = mounted.teardown_on_page_hide() {
            tracing::warn!(%err, "pagehide teardown not installed");
        }
        if let Some(previous) = INSTALLED.with(|slot| slot.replace(Some(mounted))) {
            previous.teardown();
        }
    }

    /// Asset path the widget loads for frame `index` under `config`.
    #[wasm_bindgen(js_name = frameSrc)]
    pub fn frame_src(config: JsValue, index: u32) -> Result<String, JsValue> {
        let config = parse_config(config)?;
        let index = index as usize;
        if index >= config.frame_count {
            return Err(MountError::from(SequenceError::FrameOutOfRange {
                index,
                count: config.frame_count,
            })
            .into());
        }
        Ok(FrameSource::from_config(&config).src(index))
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
