//! Thin conveniences over `web-sys` used by every component binding.

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, NodeList, ScrollBehavior,
    ScrollToOptions, SvgElement, Window,
};

use super::WebError;

pub fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::MissingElement("window"))
}

pub fn document() -> Result<Document, WebError> {
    window()?
        .document()
        .ok_or(WebError::MissingElement("document"))
}

/// Something with `querySelector` / `querySelectorAll`.
pub trait Queryable {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue>;
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue>;
}

impl Queryable for Document {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl Queryable for Element {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

/// First match, treating an invalid selector like no match.
pub fn query(root: &impl Queryable, selector: &str) -> Option<Element> {
    root.select(selector).ok().flatten()
}

/// First match, or a [`WebError::MissingElement`] naming the selector.
pub fn required(root: &impl Queryable, selector: &'static str) -> Result<Element, WebError> {
    query(root, selector).ok_or(WebError::MissingElement(selector))
}

/// Every match, in document order.
pub fn query_all(root: &impl Queryable, selector: &str) -> Vec<Element> {
    match root.select_all(selector) {
        Ok(list) => elements(&list),
        Err(_) => Vec::new(),
    }
}

pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Text content of the first match, trimmed.
pub fn text_of(root: &impl Queryable, selector: &str) -> Option<String> {
    query(root, selector)
        .and_then(|el| el.text_content())
        .map(|t| t.trim().to_string())
}

/// Set (or with `None`, remove) one inline style property.
pub fn set_style(element: &Element, property: &str, value: Option<&str>) {
    let style = if let Some(el) = element.dyn_ref::<HtmlElement>() {
        el.style()
    } else if let Some(el) = element.dyn_ref::<SvgElement>() {
        el.style()
    } else {
        return;
    };
    let _ = match value {
        Some(v) => style.set_property(property, v),
        None => style.remove_property(property).map(|_| ()),
    };
}

pub fn focus(element: &Element) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.focus();
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = if on {
        element.class_list().add_1(class)
    } else {
        element.class_list().remove_1(class)
    };
}

pub fn body_overflow(document: &Document) -> String {
    document
        .body()
        .map(|b| b.style().get_property_value("overflow").unwrap_or_default())
        .unwrap_or_default()
}

pub fn set_body_overflow(document: &Document, value: &str) {
    if let Some(body) = document.body() {
        let style = body.style();
        let _ = if value.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", value)
        };
    }
}

/// Attach a listener for the lifetime of the page. Listeners are not
/// passive, so handlers may call `prevent_default`.
pub fn listen<F>(target: &EventTarget, event_type: &'static str, callback: F)
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions::enable_prevent_default(),
        callback,
    )
    .forget();
}

/// Run `f` once after `millis`. Pending callbacks are never cancelled.
pub fn after<F: FnOnce() + 'static>(millis: u32, f: F) {
    Timeout::new(millis, f).forget();
}

/// `(key, shift)` of a keyboard event.
pub fn key_of(event: &Event) -> Option<(String, bool)> {
    event
        .dyn_ref::<KeyboardEvent>()
        .map(|k| (k.key(), k.shift_key()))
}

/// Element the event was dispatched to.
pub fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
