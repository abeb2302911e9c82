use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, Window};

use super::announcer::DomAnnouncer;
use super::{WebError, dom};
use crate::announce::Announce;
use crate::config::UiConfig;
use crate::links::is_activation_key;
use crate::modal::gallery::{
    HOVER_OFF, HOVER_ON, ITEM_CLASS, ITEM_REST, ItemStyle, SLOT_ID, arrow_target, emphasis,
    emphasis_message, render_gallery, render_single_slot,
};
use crate::modal::{
    ACTIVE_CLASS, FOCUSABLE_SELECTOR, IMAGE_LOAD_FAILED, IMAGE_LOADED, KeyAction, ModalKey,
    ModalMode, ModalSession, OpenRequest, PageLock, Trigger, classify, gallery_images,
};

const TRIGGER_SELECTOR: &str = ".clickable-image";

pub struct ModalBinding {
    document: Document,
    window: Window,
    modal: Element,
    close_control: Element,
    container: Element,
    session: RefCell<ModalSession<Element>>,
    config: UiConfig,
    announcer: DomAnnouncer,
    emphasis_reset: RefCell<Option<Timeout>>,
    /// Pending move of focus onto the close control; dropped on close.
    focus_close: RefCell<Option<Timeout>>,
}

impl ModalBinding {
    /// Open whatever `trigger` asks for. Elements that classify to nothing
    /// are ignored.
    fn activate(self: &Rc<Self>, trigger: &Element) {
        let cert_images = trigger.get_attribute("data-cert-images");
        let cert_image = trigger.get_attribute("data-cert-image");
        let alt = trigger.get_attribute("alt");
        let child_alt = dom::query(trigger, "img").and_then(|img| img.get_attribute("alt"));
        let image_src = trigger.dyn_ref::<HtmlImageElement>().map(|img| img.src());
        let snapshot = Trigger {
            cert_images: cert_images.as_deref(),
            cert_image: cert_image.as_deref(),
            alt: alt.as_deref(),
            child_alt: child_alt.as_deref(),
            image_src: image_src.as_deref(),
        };
        match classify(&snapshot, &self.config.gallery) {
            Some(request) => self.open(request),
            None => tracing::debug!("clickable image has nothing to show"),
        }
    }

    /// Open the gallery with the configured fallback certificates.
    pub fn open_gallery_fallback(self: &Rc<Self>) {
        let images = gallery_images(None, &self.config.gallery);
        self.open(OpenRequest::Gallery(images));
    }

    fn open(self: &Rc<Self>, request: OpenRequest) {
        let previously_focused = self.document.active_element();
        let page = PageLock {
            body_overflow: dom::body_overflow(&self.document),
            overlay_aria_hidden: self.modal.get_attribute("aria-hidden"),
        };
        let opened = self.session.borrow_mut().open(
            request,
            previously_focused,
            page,
            &self.announcer,
        );
        let mode = match opened {
            Ok(mode) => mode,
            Err(err) => {
                tracing::warn!("{err}");
                return;
            }
        };

        let images = self.session.borrow().images().to_vec();
        match mode {
            ModalMode::Single => {
                if let (Some(slot), Some(image)) = (self.slot(), images.first()) {
                    let _ = slot.set_attribute("src", &image.src);
                    let _ = slot.set_attribute("alt", &image.alt);
                }
            }
            ModalMode::Gallery => {
                self.container
                    .set_inner_html(&render_gallery(&images).into_string());
                self.bind_gallery();
            }
        }

        dom::set_class(&self.modal, ACTIVE_CLASS, true);
        let _ = self.modal.set_attribute("aria-hidden", "false");
        dom::set_body_overflow(&self.document, "hidden");
        self.refresh_focusables();

        let close_control = self.close_control.clone();
        let timeout = Timeout::new(self.config.timing.focus_delay_ms, move || {
            dom::focus(&close_control);
        });
        *self.focus_close.borrow_mut() = Some(timeout);
    }

    fn close(&self) {
        let Some(closed) = self.session.borrow_mut().close(&self.announcer) else {
            return;
        };
        self.focus_close.borrow_mut().take();
        dom::set_class(&self.modal, ACTIVE_CLASS, false);
        let _ = match &closed.page.overlay_aria_hidden {
            Some(value) => self.modal.set_attribute("aria-hidden", value),
            None => self.modal.remove_attribute("aria-hidden"),
        };
        dom::set_body_overflow(&self.document, &closed.page.body_overflow);

        if closed.mode == ModalMode::Gallery {
            self.emphasis_reset.borrow_mut().take();
            self.container
                .set_inner_html(&render_single_slot().into_string());
            self.bind_slot();
        }

        // A trigger removed while the modal was open keeps no focus target.
        if let Some(element) = closed.restore_focus
            && element.is_connected()
        {
            dom::focus(&element);
        }
    }

    fn slot(&self) -> Option<Element> {
        self.container.query_selector(&format!("#{SLOT_ID}")).ok().flatten()
    }

    /// Visible focusable descendants of the overlay, in document order.
    fn refresh_focusables(&self) {
        let visible = dom::query_all(&self.modal, FOCUSABLE_SELECTOR)
            .into_iter()
            .filter(|el| el.get_client_rects().length() > 0)
            .collect();
        self.session.borrow_mut().set_focusables(visible);
    }

    fn on_key(&self, event: &web_sys::Event) {
        if !self.session.borrow().is_open() {
            return;
        }
        let Some((key, shift)) = dom::key_of(event) else {
            return;
        };
        let active = self.document.active_element();
        let modal_key = ModalKey::from_event(&key, shift);
        let action = self
            .session
            .borrow()
            .on_key(modal_key, active.as_ref(), &self.close_control);
        match action {
            KeyAction::Close => {
                event.prevent_default();
                self.close();
            }
            KeyAction::Focus(target) => {
                event.prevent_default();
                dom::focus(&target);
            }
            KeyAction::Ignore => {
                if let ModalKey::Other(arrow) = modal_key {
                    self.step_gallery(event, arrow, active.as_ref());
                }
            }
        }
    }

    /// Arrow keys move between certificates while the gallery is showing.
    fn step_gallery(&self, event: &web_sys::Event, key: &str, active: Option<&Element>) {
        if self.session.borrow().mode() != Some(ModalMode::Gallery) {
            return;
        }
        let images = dom::query_all(&self.container, &format!(".{ITEM_CLASS} img"));
        let current = active.and_then(|a| images.iter().position(|img| img == a));
        if let Some(next) = arrow_target(images.len(), current, key) {
            event.prevent_default();
            dom::focus(&images[next]);
        }
    }

    fn bind_gallery(self: &Rc<Self>) {
        let items = Rc::new(dom::query_all(&self.container, &format!(".{ITEM_CLASS}")));
        for (index, item) in items.iter().enumerate() {
            let Some(image) = dom::query(item, "img") else {
                continue;
            };
            let (hover_item, hover_image) = (item.clone(), image.clone());
            dom::listen(item, "mouseenter", move |_| {
                dom::set_style(&hover_item, "transform", Some(HOVER_ON.0));
                dom::set_style(&hover_image, "transform", Some(HOVER_ON.1));
            });
            let (leave_item, leave_image) = (item.clone(), image.clone());
            dom::listen(item, "mouseleave", move |_| {
                dom::set_style(&leave_item, "transform", Some(HOVER_OFF.0));
                dom::set_style(&leave_image, "transform", Some(HOVER_OFF.1));
            });

            let (this, all) = (self.clone(), items.clone());
            dom::listen(&image, "click", move |event| {
                event.stop_propagation();
                this.emphasize(&all, index);
            });
            let (this, all) = (self.clone(), items.clone());
            dom::listen(&image, "keydown", move |event| {
                if let Some((key, _)) = dom::key_of(event)
                    && is_activation_key(&key)
                {
                    event.prevent_default();
                    this.emphasize(&all, index);
                }
            });
        }
    }

    fn emphasize(&self, items: &Rc<Vec<Element>>, selected: usize) {
        let styles = emphasis(items.len(), selected);
        for (item, style) in items.iter().zip(&styles) {
            apply_item_style(item, *style);
        }
        let message = self
            .session
            .borrow()
            .images()
            .get(selected)
            .map(emphasis_message);
        if let Some(message) = message {
            self.announcer.announce(&message);
        }

        let reset = items.clone();
        let timeout = Timeout::new(self.config.timing.emphasis_ms, move || {
            for item in reset.iter() {
                apply_item_style(item, ITEM_REST);
            }
        });
        // A newer emphasis restarts the reset delay.
        *self.emphasis_reset.borrow_mut() = Some(timeout);
    }

    /// Announce load results of the single-image slot.
    fn bind_slot(&self) {
        let Some(slot) = self.slot() else {
            tracing::warn!(slot = SLOT_ID, "modal image slot missing");
            return;
        };
        let loaded = self.announcer.clone();
        dom::listen(&slot, "load", move |_| loaded.announce(IMAGE_LOADED));
        let failed = self.announcer.clone();
        let source = slot.clone();
        dom::listen(&slot, "error", move |_| {
            let src = source.get_attribute("src").unwrap_or_default();
            tracing::error!(%src, "modal image failed to load");
            failed.announce(IMAGE_LOAD_FAILED);
        });
    }
}

fn apply_item_style(item: &Element, style: ItemStyle) {
    dom::set_style(item, "transform", Some(style.transform));
    dom::set_style(item, "filter", Some(style.filter));
}

/// Wire `.clickable-image` triggers to the `#photoModal` overlay.
pub fn init(
    document: &Document,
    config: &UiConfig,
    announcer: DomAnnouncer,
) -> Result<Rc<ModalBinding>, WebError> {
    let modal = dom::required(document, "#photoModal")?;
    let close_control = dom::required(document, "#modalClose")?;
    let overlay = dom::required(document, "#modalOverlay")?;
    let container = dom::required(&modal, ".photo-modal-image-container")?;
    dom::required(&container, "#modalImage")?;

    let binding = Rc::new(ModalBinding {
        document: document.clone(),
        window: dom::window()?,
        modal,
        close_control,
        container,
        session: RefCell::new(ModalSession::default()),
        config: config.clone(),
        announcer,
        emphasis_reset: RefCell::new(None),
        focus_close: RefCell::new(None),
    });
    binding.bind_slot();

    for trigger in dom::query_all(document, TRIGGER_SELECTOR) {
        let (this, target) = (binding.clone(), trigger.clone());
        dom::listen(&trigger, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            this.activate(&target);
        });
        let (this, target) = (binding.clone(), trigger.clone());
        dom::listen(&trigger, "keydown", move |event| {
            if let Some((key, _)) = dom::key_of(event)
                && is_activation_key(&key)
            {
                event.prevent_default();
                event.stop_propagation();
                this.activate(&target);
            }
        });
    }

    let this = binding.clone();
    dom::listen(&binding.close_control, "click", move |_| this.close());
    let this = binding.clone();
    dom::listen(&overlay, "click", move |_| this.close());
    let this = binding.clone();
    dom::listen(&binding.modal, "click", move |event| {
        let on_backdrop = dom::event_element(event).is_some_and(|el| el == this.modal);
        if on_backdrop {
            this.close();
        }
    });
    if let Some(content) = dom::query(&binding.modal, ".photo-modal-content") {
        dom::listen(&content, "click", |event| event.stop_propagation());
    }

    let this = binding.clone();
    dom::listen(document, "keydown", move |event| this.on_key(event));
    let this = binding.clone();
    dom::listen(&binding.window, "resize", move |_| {
        if this.session.borrow().is_open() {
            this.refresh_focusables();
        }
    });

    Ok(binding)
}
