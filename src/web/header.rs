use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Document, Element, MutationObserver, MutationObserverInit, MutationRecord, Window};

use super::{WebError, dom};
use crate::config::HeaderConfig;
use crate::header::header_style;
use crate::theme::{THEME_ATTR, Theme};

struct ScrollHeader {
    header: Element,
    root: Element,
    window: Window,
    config: HeaderConfig,
}

impl ScrollHeader {
    fn update(&self) {
        let theme = self
            .root
            .get_attribute(THEME_ATTR)
            .and_then(|t| t.parse().ok())
            .unwrap_or(Theme::Light);
        let style = header_style(dom::scroll_y(&self.window), theme, &self.config);
        dom::set_style(&self.header, "background-color", style.background_color);
        dom::set_style(&self.header, "backdrop-filter", style.backdrop_filter);
    }
}

/// Restyle `.main-header` on scroll and whenever `data-theme` changes.
pub fn init(document: &Document, config: &HeaderConfig) -> Result<(), WebError> {
    let header = dom::required(document, ".main-header")?;
    let root = document
        .document_element()
        .ok_or(WebError::MissingElement("html"))?;
    let window = dom::window()?;
    let state = Rc::new(ScrollHeader {
        header,
        root: root.clone(),
        window: window.clone(),
        config: config.clone(),
    });
    state.update();

    let on_scroll = state.clone();
    dom::listen(&window, "scroll", move |_| on_scroll.update());

    let on_theme = state;
    let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
        move |records: Array, _observer: MutationObserver| {
            let theme_changed = records.iter().any(|r| {
                r.dyn_into::<MutationRecord>()
                    .ok()
                    .and_then(|r| r.attribute_name())
                    .is_some_and(|name| name == THEME_ATTR)
            });
            if theme_changed {
                on_theme.update();
            }
        },
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_attributes(true);
    options.set_attribute_filter(&Array::of1(&THEME_ATTR.into()));
    observer.observe_with_options(&root, &options)?;
    callback.forget();
    Ok(())
}
