//! Browser developer console as a log sink.

use page_enhancer_core::logging::{init_logging, ConsoleEntry, LogSink};
use page_enhancer_core::EnhancerResult;
use tracing::Level;
use wasm_bindgen::JsValue;

/// Routes entries to `console.error/warn/info/debug` by level.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConsole;

impl LogSink for BrowserConsole {
    fn write(&self, level: &Level, entry: &ConsoleEntry) {
        let line = JsValue::from_str(&entry.render());
        match *level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Install the console subscriber. A second call reports an error and
/// keeps the first subscriber.
pub fn init(filter: &str) -> EnhancerResult<()> {
    init_logging(BrowserConsole, filter)
}
