use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use super::{WebError, dom};
use crate::config::UiConfig;
use crate::motion::{CounterAnimation, REVEAL_CLASS, parse_target};

/// Observe `elements` and call `on_visible` once per element the first time
/// it intersects; the element is unobserved before the callback runs.
fn observe_once<F>(
    elements: &[Element],
    options: &IntersectionObserverInit,
    mut on_visible: F,
) -> Result<(), WebError>
where
    F: FnMut(Element) + 'static,
{
    if elements.is_empty() {
        return Ok(());
    }
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_visible(target);
                }
            }
        },
    );
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options)?;
    for element in elements {
        observer.observe(element);
    }
    callback.forget();
    Ok(())
}

/// Reveal `.wow` elements as they scroll into view.
pub fn init_reveal(document: &Document, config: &UiConfig) -> Result<(), WebError> {
    let elements = dom::query_all(document, ".wow");
    let options = IntersectionObserverInit::new();
    options.set_threshold(&config.observers.reveal_threshold.into());
    options.set_root_margin(&config.observers.reveal_root_margin);
    observe_once(&elements, &options, |element| {
        dom::set_style(&element, "visibility", Some("visible"));
        dom::set_class(&element, REVEAL_CLASS, true);
    })
}

/// Count `[data-target]` elements up from zero once they are mostly visible.
pub fn init_counters(document: &Document, config: &UiConfig) -> Result<(), WebError> {
    let window = dom::window()?;
    let elements = dom::query_all(document, "[data-target]");
    let options = IntersectionObserverInit::new();
    options.set_threshold(&config.observers.counter_threshold.into());
    let duration = config.timing.counter_ms;
    observe_once(&elements, &options, move |element| {
        let raw = element.get_attribute("data-target").unwrap_or_default();
        let Some(target) = parse_target(&raw) else {
            tracing::warn!(value = %raw, "counter has a non-numeric data-target");
            return;
        };
        let animation = CounterAnimation::new(target, duration, dom::now_ms(&window));
        run_counter(window.clone(), element, animation);
    })
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drive one count-up with `requestAnimationFrame` until it reports done.
fn run_counter(window: Window, element: Element, animation: CounterAnimation) {
    let slot: FrameCallback = Rc::new(RefCell::new(None));
    let this = slot.clone();
    let frame_window = window.clone();
    *slot.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        let frame = animation.frame(dom::now_ms(&frame_window));
        element.set_text_content(Some(&frame.value.to_string()));
        if frame.done {
            // Drops this closure; nothing references it afterwards.
            let _ = this.borrow_mut().take();
            return;
        }
        if let Some(cb) = this.borrow().as_ref() {
            let _ = frame_window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }));
    if let Some(cb) = slot.borrow().as_ref() {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
