//! `tracing` output routed to the browser console.

use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl ConsoleMethod {
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => ConsoleMethod::Error,
            Level::WARN => ConsoleMethod::Warn,
            Level::INFO => ConsoleMethod::Info,
            _ => ConsoleMethod::Debug,
        }
    }
}

/// One formatted event as a console line, without the trailing newline the
/// fmt layer appends. Empty writes produce nothing.
pub fn console_line(buf: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buf);
    let line = text.trim_end_matches(['\n', '\r']);
    if line.is_empty() {
        None
    } else {
        Some(line.to_owned())
    }
}

#[cfg(target_arch = "wasm32")]
mod sink {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    use super::{console_line, ConsoleMethod};

    #[derive(Debug, Clone, Copy, Default)]
    pub struct ConsoleMakeWriter;

    /// Buffers one event and emits it on drop, so multi-write events land as a
    /// single console entry.
    pub struct ConsoleWriter {
        method: ConsoleMethod,
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let Some(line) = console_line(&self.buf) else {
                return;
            };
            let line = JsValue::from_str(&line);
            match self.method {
                ConsoleMethod::Error => web_sys::console::error_1(&line),
                ConsoleMethod::Warn => web_sys::console::warn_1(&line),
                ConsoleMethod::Info => web_sys::console::info_1(&line),
                ConsoleMethod::Debug => web_sys::console::debug_1(&line),
            }
        }
    }

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                method: ConsoleMethod::Info,
                buf: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                method: ConsoleMethod::for_level(*meta.level()),
                buf: Vec::new(),
            }
        }
    }

    /// Installs the global console subscriber. Later calls (or a subscriber
    /// installed by the host) are left alone.
    pub fn init(max_level: Level) {
        let _ = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_max_level(max_level)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

#[cfg(target_arch = "wasm32")]
pub use sink::{init, ConsoleMakeWriter};
