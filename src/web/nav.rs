use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, SvgGeometryElement};

use super::{WebError, dom};
use crate::config::LayoutConfig;
use crate::nav::{MobileMenu, anchor_scroll_top, progress_dash_offset, progress_visible};

const MENU_ACTIVE: &str = "active";

struct MenuBinding {
    state: Cell<MobileMenu>,
    sidebar: Element,
    overlay: Option<Element>,
    document: Document,
}

impl MenuBinding {
    fn open(&self) {
        let mut menu = self.state.get();
        if menu.open() {
            self.show(true);
        }
        self.state.set(menu);
    }

    fn close(&self) {
        let mut menu = self.state.get();
        if menu.close() {
            self.show(false);
        }
        self.state.set(menu);
    }

    fn show(&self, open: bool) {
        dom::set_class(&self.sidebar, MENU_ACTIVE, open);
        if let Some(overlay) = &self.overlay {
            dom::set_class(overlay, MENU_ACTIVE, open);
        }
        dom::set_body_overflow(&self.document, if open { "hidden" } else { "" });
    }
}

/// Mobile sidebar: `.sidebar-toggle-btn` opens it; the close button, the body
/// overlay, any `.mean-nav a` link and Escape close it.
pub fn init_menu(document: &Document) -> Result<(), WebError> {
    let toggle = dom::required(document, ".sidebar-toggle-btn")?;
    let sidebar = dom::required(document, ".sidebar__area")?;
    let menu = Rc::new(MenuBinding {
        state: Cell::new(MobileMenu::default()),
        sidebar,
        overlay: dom::query(document, ".body-overlay"),
        document: document.clone(),
    });

    let on_open = menu.clone();
    dom::listen(&toggle, "click", move |event| {
        event.prevent_default();
        on_open.open();
    });

    let mut closers: Vec<Element> = dom::query_all(document, ".mean-nav a");
    closers.extend(dom::query(document, ".sidebar__close-btn"));
    closers.extend(menu.overlay.clone());
    for closer in closers {
        let on_close = menu.clone();
        dom::listen(&closer, "click", move |_| on_close.close());
    }

    let on_escape = menu;
    dom::listen(document, "keydown", move |event| {
        if dom::key_of(event).is_some_and(|(key, _)| key == "Escape") {
            let mut state = on_escape.state.get();
            if state.on_escape() {
                on_escape.show(false);
            }
            on_escape.state.set(state);
        }
    });
    Ok(())
}

/// In-page `#anchor` links scroll smoothly to just below the fixed header.
pub fn init_anchors(document: &Document, layout: &LayoutConfig) -> Result<(), WebError> {
    let window = dom::window()?;
    let offset = layout.header_offset;
    for link in dom::query_all(document, "a[href^=\"#\"]") {
        let (window, document, anchor) = (window.clone(), document.clone(), link.clone());
        dom::listen(&link, "click", move |event| {
            event.prevent_default();
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            // A bare "#" is not a valid selector; query treats it as no match.
            let Some(target) = dom::query(&document, &href) else {
                return;
            };
            let top = target
                .dyn_ref::<HtmlElement>()
                .map(|el| f64::from(el.offset_top()))
                .unwrap_or_default();
            dom::smooth_scroll_to(&window, anchor_scroll_top(top, offset));
        });
    }
    Ok(())
}

/// Back-to-top button whose ring fills as the page scrolls.
pub fn init_progress(document: &Document, layout: &LayoutConfig) -> Result<(), WebError> {
    let wrap = dom::required(document, ".progress-wrap")?;
    let path = dom::required(document, ".progress-wrap path")?
        .dyn_into::<SvgGeometryElement>()
        .map_err(|_| WebError::MissingElement(".progress-wrap path"))?;
    let window = dom::window()?;
    let root = document
        .document_element()
        .ok_or(WebError::MissingElement("html"))?;

    let length = f64::from(path.get_total_length());
    let path: Element = path.into();
    dom::set_style(&path, "stroke-dasharray", Some(&format!("{length} {length}")));
    dom::set_style(&path, "stroke-dashoffset", Some(&length.to_string()));

    let threshold = layout.progress_threshold;
    let (on_scroll, scroll_wrap) = (window.clone(), wrap.clone());
    dom::listen(&window, "scroll", move |_| {
        let scroll = dom::scroll_y(&on_scroll);
        let offset = progress_dash_offset(
            length,
            scroll,
            f64::from(root.scroll_height()),
            dom::inner_height(&on_scroll),
        );
        dom::set_style(&path, "stroke-dashoffset", Some(&offset.to_string()));
        dom::set_class(&scroll_wrap, "active", progress_visible(scroll, threshold));
    });

    dom::listen(&wrap, "click", move |_| dom::smooth_scroll_to(&window, 0.0));
    Ok(())
}

/// Pause the logo marquee while hovered or while one of its logos has focus.
pub fn init_scroller(document: &Document) -> Result<(), WebError> {
    let scroller = dom::required(document, ".scroller__inner")?;
    let pause = |target: &Element, event_type: &'static str, state: &'static str| {
        let scroller = scroller.clone();
        dom::listen(target, event_type, move |_| {
            dom::set_style(&scroller, "animation-play-state", Some(state));
        });
    };
    pause(&scroller, "mouseenter", "paused");
    pause(&scroller, "mouseleave", "running");
    for img in dom::query_all(&scroller, "img") {
        pause(&img, "focus", "paused");
        pause(&img, "blur", "running");
    }
    Ok(())
}
