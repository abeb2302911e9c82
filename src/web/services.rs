use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use web_sys::{Document, Element, Window};

use super::announcer::DomAnnouncer;
use super::{WebError, dom};
use crate::config::UiConfig;
use crate::links::is_activation_key;
use crate::services::{
    CardChange, EXPANDED_CLASS, INDICATOR_COLLAPSED, INDICATOR_EXPANDED, ServiceCards,
    expanded_grid_column, stagger_delay,
};

const CARD_SELECTOR: &str = ".service-card";
const CLOSE_SELECTOR: &str = "[data-service-close]";

pub struct ServiceBinding {
    cards: Vec<Element>,
    state: RefCell<ServiceCards>,
    window: Window,
    config: UiConfig,
    announcer: DomAnnouncer,
    resize_pending: RefCell<Option<Timeout>>,
}

impl ServiceBinding {
    fn toggle(&self, index: usize) {
        let changes = self.state.borrow_mut().toggle(index, &self.announcer);
        self.apply(&changes);
    }

    fn escape(&self, index: usize) {
        let change = self.state.borrow_mut().escape(index, &self.announcer);
        self.apply(change.as_slice());
    }

    /// Collapse whichever card is expanded, if any.
    pub fn close_current(&self) {
        let change = self.state.borrow_mut().collapse_current(&self.announcer);
        self.apply(change.as_slice());
    }

    fn apply(&self, changes: &[CardChange]) {
        for change in changes {
            match *change {
                CardChange::Expanded(i) => self.show(i, true),
                CardChange::Collapsed(i) => self.show(i, false),
            }
        }
    }

    fn show(&self, index: usize, expanded: bool) {
        let Some(card) = self.cards.get(index) else {
            return;
        };
        tracing::debug!(index, expanded, "service card changed");
        dom::set_class(card, EXPANDED_CLASS, expanded);
        let _ = card.set_attribute("aria-expanded", bool_attr(expanded));
        if let Some(indicator) = dom::query(card, ".service-expand-indicator i") {
            let rotation = if expanded {
                INDICATOR_EXPANDED
            } else {
                INDICATOR_COLLAPSED
            };
            dom::set_style(&indicator, "transform", Some(rotation));
        }
        if let Some(details) = dom::query(card, ".service-details") {
            let _ = details.set_attribute("aria-hidden", bool_attr(!expanded));
        }
        if expanded {
            self.place(card);
            let (card, window) = (card.clone(), self.window.clone());
            let offset = self.config.layout.header_offset;
            dom::after(self.config.timing.scroll_settle_ms, move || {
                let top = card.get_bounding_client_rect().top() + dom::scroll_y(&window);
                dom::smooth_scroll_to(&window, top - f64::from(offset));
            });
        } else {
            dom::set_style(card, "grid-column", None);
        }
    }

    fn place(&self, card: &Element) {
        let column = expanded_grid_column(
            dom::inner_width(&self.window),
            self.config.layout.mobile_breakpoint,
        );
        dom::set_style(card, "grid-column", Some(column));
    }

    /// Restart the debounce; only the last resize in a burst re-places the
    /// expanded card.
    fn schedule_relayout(self: &Rc<Self>) {
        let this = self.clone();
        let timeout = Timeout::new(self.config.timing.resize_debounce_ms, move || {
            let expanded = this.state.borrow().expanded();
            if let Some(card) = expanded.and_then(|i| this.cards.get(i)) {
                this.place(card);
            }
        });
        // Replacing the previous Timeout drops it, which cancels it.
        *self.resize_pending.borrow_mut() = Some(timeout);
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Wire every `.service-card` as an accordion with at most one card open.
pub fn init(
    document: &Document,
    config: &UiConfig,
    announcer: DomAnnouncer,
) -> Result<Rc<ServiceBinding>, WebError> {
    let cards = dom::query_all(document, CARD_SELECTOR);
    if cards.is_empty() {
        return Err(WebError::MissingElement(CARD_SELECTOR));
    }
    let titles = cards
        .iter()
        .map(|c| dom::text_of(c, ".service-title").unwrap_or_default())
        .collect();
    let binding = Rc::new(ServiceBinding {
        cards,
        state: RefCell::new(ServiceCards::new(titles)),
        window: dom::window()?,
        config: config.clone(),
        announcer,
        resize_pending: RefCell::new(None),
    });

    for (index, card) in binding.cards.iter().enumerate() {
        let _ = card.set_attribute("aria-expanded", "false");
        dom::set_style(card, "animation-delay", Some(&stagger_delay(index)));
        dom::set_class(card, "service-card-animate-in", true);

        let on_click = binding.clone();
        dom::listen(card, "click", move |_| on_click.toggle(index));

        let on_key = binding.clone();
        dom::listen(card, "keydown", move |event| {
            let Some((key, _)) = dom::key_of(event) else {
                return;
            };
            if is_activation_key(&key) {
                event.prevent_default();
                on_key.toggle(index);
            } else if key == "Escape" {
                on_key.escape(index);
            }
        });

        let on_focus = binding.clone();
        let focused = card.clone();
        dom::listen(card, "focus", move |_| {
            let expanded = on_focus.state.borrow().is_expanded(index);
            let _ = focused.set_attribute("aria-expanded", bool_attr(expanded));
        });

        for close in dom::query_all(card, CLOSE_SELECTOR) {
            let on_close = binding.clone();
            dom::listen(&close, "click", move |event| {
                event.stop_propagation();
                on_close.close_current();
            });
        }
    }

    let on_outside = binding.clone();
    dom::listen(document, "click", move |event| {
        let inside = dom::event_element(event)
            .and_then(|el| el.closest(CARD_SELECTOR).ok().flatten())
            .is_some();
        if !inside {
            on_outside.close_current();
        }
    });

    let on_resize = binding.clone();
    dom::listen(&binding.window, "resize", move |_| {
        on_resize.schedule_relayout();
    });

    Ok(binding)
}
