//! Browser bindings, compiled for `wasm32` only.
//!
//! Each submodule wires one component of the pure layer to the DOM. Components
//! start independently from [`start`]: one whose anchors are missing logs a
//! warning and stays off while the rest of the page keeps working.

mod announcer;
mod console;
mod dom;
mod header;
mod links;
mod modal;
mod motion;
mod nav;
mod services;
mod theme;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::Level;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::{UiConfig, load_config};
use announcer::DomAnnouncer;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("required element not found: {0}")]
    MissingElement(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Handles the exported functions reach into. Empty slots belong to
/// components that did not start.
#[derive(Default)]
struct App {
    theme: Option<Rc<theme::ThemeBinding>>,
    services: Option<Rc<services::ServiceBinding>>,
    links: Option<Rc<links::LinkActivator>>,
    modal: Option<Rc<modal::ModalBinding>>,
}

thread_local! {
    static APP: RefCell<App> = RefCell::new(App::default());
}

/// Log a component that failed to start and keep going.
fn started<T>(component: &str, result: Result<T, WebError>) -> Option<T> {
    match result {
        Ok(value) => {
            tracing::debug!(component, "initialized");
            Some(value)
        }
        Err(err) => {
            tracing::warn!(component, "disabled: {err}");
            None
        }
    }
}

/// Page-supplied overrides from `<script type="application/toml" id="folio-config">`.
fn page_config(document: &Document) -> UiConfig {
    let overlay = dom::query(document, "script#folio-config").and_then(|s| s.text_content());
    match load_config(overlay.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("ignoring page config: {err}");
            UiConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    console::install(level);

    let (Ok(window), Ok(document)) = (dom::window(), dom::document()) else {
        tracing::error!("no window or document, nothing to enhance");
        return;
    };
    console::capture_uncaught(&window);
    tracing::info!(version = %crate::version(), "starting");

    let config = page_config(&document);
    let announcer = DomAnnouncer::new(document.clone(), config.timing.announce_ms);

    let app = App {
        theme: started("theme", theme::init(&document, &config.theme, announcer.clone())),
        services: started("services", services::init(&document, &config, announcer.clone())),
        links: started(
            "links",
            links::init(&document, config.partner_registry(), announcer.clone()),
        ),
        modal: started("modal", modal::init(&document, &config, announcer)),
    };
    started("header", header::init(&document, &config.header));
    started("reveal", motion::init_reveal(&document, &config));
    started("counters", motion::init_counters(&document, &config));
    started("menu", nav::init_menu(&document));
    started("anchors", nav::init_anchors(&document, &config.layout));
    started("progress", nav::init_progress(&document, &config.layout));
    started("scroller", nav::init_scroller(&document));

    APP.with(|slot| *slot.borrow_mut() = app);
}

fn with_app<T>(f: impl FnOnce(&App) -> Option<T>) -> Option<T> {
    APP.with(|slot| f(&slot.borrow()))
}

/// Flip between light and dark, as the toggle button does.
#[wasm_bindgen]
pub fn toggle_theme() {
    if let Some(binding) = with_app(|app| app.theme.clone()) {
        binding.toggle();
    }
}

#[wasm_bindgen]
pub fn close_current_service_card() {
    if let Some(binding) = with_app(|app| app.services.clone()) {
        binding.close_current();
    }
}

/// Activate partner logos and experience cards added since the last scan.
#[wasm_bindgen]
pub fn rescan_links() {
    if let Some(activator) = with_app(|app| app.links.clone()) {
        activator.rescan();
    }
}

/// Open the certificate gallery with the configured certificates.
#[wasm_bindgen]
pub fn open_certificate_gallery() {
    if let Some(binding) = with_app(|app| app.modal.clone()) {
        binding.open_gallery_fallback();
    }
}
