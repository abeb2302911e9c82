//! Browser console logging and top-level error capture.

use tracing::Level;
use tracing_subscriber::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ErrorEvent, PromiseRejectionEvent, Window};

use super::dom;
use crate::logging::{ConsoleLayer, LogSink};

struct BrowserConsole;

impl LogSink for BrowserConsole {
    fn write(&self, level: Level, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Install the console subscriber and panic hook. Safe to call twice; the
/// second call keeps the first subscriber.
pub fn install(max_level: Level) {
    let layer = ConsoleLayer::new(BrowserConsole).with_max_level(max_level);
    let subscriber = tracing_subscriber::registry().with(layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return;
    }
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

/// Log uncaught script errors and unhandled promise rejections.
pub fn capture_uncaught(window: &Window) {
    dom::listen(window, "error", |event| {
        let detail = event
            .dyn_ref::<ErrorEvent>()
            .map(|e| format!("{:?}", e.error()))
            .unwrap_or_default();
        tracing::error!(error = %detail, "JavaScript error");
    });
    dom::listen(window, "unhandledrejection", |event| {
        let reason = event
            .dyn_ref::<PromiseRejectionEvent>()
            .map(|e| format!("{:?}", e.reason()))
            .unwrap_or_default();
        tracing::error!(reason = %reason, "Unhandled promise rejection");
    });
}
