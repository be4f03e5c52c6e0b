use hero_sequence::SequenceError;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, MountError>;

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no global `window` in this context")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("canvas element with id `{0}` not found")]
    CanvasNotFound(String),
    #[error("element with id `{0}` is not a <canvas>")]
    NotACanvas(String),
    #[error("2d drawing context unavailable")]
    ContextUnavailable,
    #[error("invalid configuration object: {0}")]
    Config(String),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error("browser call failed: {0:?}")]
    Js(JsValue),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Js(value)
    }
}

impl From<serde_wasm_bindgen::Error> for MountError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        MountError::Config(err.to_string())
    }
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        match err {
            MountError::Js(value) => value,
            other => js_sys::Error::new(&other.to_string()).into(),
        }
    }
}

/// Flattens a JS exception into the core crate's surface error.
pub(crate) fn surface_error(op: &str, value: JsValue) -> SequenceError {
    let detail = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"));
    SequenceError::Surface(format!("{op}: {detail}"))
}
