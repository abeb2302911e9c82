use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{
    Document, Element, HtmlImageElement, MutationObserver, MutationObserverInit, MutationRecord,
};

use super::announcer::DomAnnouncer;
use super::{WebError, dom};
use crate::announce::Announce;
use crate::links::{
    Activation, NEW_TAB_FEATURES, PartnerRegistry, experience_destination, is_activation_key,
    logo_key,
};

const LOGO_CONTAINERS: &str = ".scroller__inner, .org-logos";
const LOGO_SELECTOR: &str = ".scroller__inner img, .org-logos img";
const EXPERIENCE_SELECTOR: &str = ".clickable-experience";
/// `"bound"` once handlers are attached, `"inert"` once resolution failed.
/// Either way a rescan skips the element.
const BOUND_ATTR: &str = "data-folio-link";

pub struct LinkActivator {
    document: Document,
    registry: PartnerRegistry,
    announcer: DomAnnouncer,
}

impl LinkActivator {
    /// Activate every logo and experience card not yet bound.
    pub fn rescan(&self) {
        for img in dom::query_all(&self.document, LOGO_SELECTOR) {
            self.activate_logo(&img);
        }
        for card in dom::query_all(&self.document, EXPERIENCE_SELECTOR) {
            self.activate_card(&card);
        }
    }

    fn activate_logo(&self, img: &Element) {
        if img.has_attribute(BOUND_ATTR) {
            return;
        }
        let src = img
            .dyn_ref::<HtmlImageElement>()
            .map(|i| i.src())
            .unwrap_or_default();
        // Lazy images without a src yet are picked up by a later rescan.
        if src.is_empty() {
            return;
        }
        let Some(dest) = self.registry.resolve_logo(&src) else {
            tracing::warn!(logo = logo_key(&src), "no URL mapping found for logo");
            mark_inert(img);
            return;
        };
        dom::set_class(img, "partner-logo-clickable", true);
        self.bind(img, Activation::new(dest));
    }

    fn activate_card(&self, card: &Element) {
        if card.has_attribute(BOUND_ATTR) {
            return;
        }
        let url = card.get_attribute("data-company-url");
        let heading = dom::text_of(card, ".experience-company h4");
        let Some(dest) = experience_destination(url.as_deref(), heading.as_deref()) else {
            tracing::warn!("Experience card missing data-company-url attribute");
            mark_inert(card);
            return;
        };
        dom::set_class(card, "experience-card-clickable", true);
        self.bind(card, Activation::new(&dest));
    }

    fn bind(&self, element: &Element, activation: Activation) {
        let _ = element.set_attribute("role", "button");
        let _ = element.set_attribute("tabindex", "0");
        let _ = element.set_attribute("aria-label", &activation.label);
        dom::set_style(element, "cursor", Some("pointer"));
        let _ = element.set_attribute(BOUND_ATTR, "bound");
        let activation = Rc::new(activation);
        let announcer = self.announcer.clone();

        let open = move |activation: &Activation| {
            if let Ok(window) = dom::window() {
                let opened = window.open_with_url_and_target_and_features(
                    &activation.url,
                    "_blank",
                    NEW_TAB_FEATURES,
                );
                if opened.is_err() {
                    tracing::warn!(url = %activation.url, "window.open was refused");
                }
            }
            announcer.announce(&activation.announcement);
        };
        let open = Rc::new(open);

        let (on_click, click_target) = (open.clone(), activation.clone());
        dom::listen(element, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            on_click(&*click_target);
        });
        dom::listen(element, "keydown", move |event| {
            if let Some((key, _)) = dom::key_of(event)
                && is_activation_key(&key)
            {
                event.prevent_default();
                event.stop_propagation();
                open(&*activation);
            }
        });
    }
}

fn mark_inert(element: &Element) {
    let _ = element.set_attribute(BOUND_ATTR, "inert");
}

/// Activate logos and experience cards now, and again whenever nodes are
/// added under a logo container.
pub fn init(
    document: &Document,
    registry: PartnerRegistry,
    announcer: DomAnnouncer,
) -> Result<Rc<LinkActivator>, WebError> {
    let activator = Rc::new(LinkActivator {
        document: document.clone(),
        registry,
        announcer,
    });
    activator.rescan();

    let containers = dom::query_all(document, LOGO_CONTAINERS);
    if containers.is_empty() {
        return Ok(activator);
    }
    let on_mutation = activator.clone();
    let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
        move |records: Array, _observer: MutationObserver| {
            let added = records
                .iter()
                .filter_map(|r| r.dyn_into::<MutationRecord>().ok())
                .any(|r| r.added_nodes().length() > 0);
            if added {
                on_mutation.rescan();
            }
        },
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    for container in &containers {
        observer.observe_with_options(container, &options)?;
    }
    callback.forget();
    Ok(activator)
}
