use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MediaQueryListEvent, Storage};

use super::announcer::DomAnnouncer;
use super::{WebError, dom};
use crate::config::ThemeConfig;
use crate::links::is_activation_key;
use crate::theme::{
    MemoryStore, PREFERS_DARK_QUERY, PreferenceStore, THEME_ATTR, Theme, ThemeController,
};

/// Local storage, or memory when the browser refuses storage access.
enum BrowserStore {
    Local { storage: Storage, key: String },
    Memory(MemoryStore),
}

impl BrowserStore {
    fn open(key: &str) -> Self {
        match dom::window().ok().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => BrowserStore::Local {
                storage,
                key: key.to_string(),
            },
            None => {
                tracing::warn!("local storage unavailable, theme choice will not persist");
                BrowserStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl PreferenceStore for BrowserStore {
    fn load(&self) -> Option<String> {
        match self {
            BrowserStore::Local { storage, key } => storage.get_item(key).ok().flatten(),
            BrowserStore::Memory(m) => m.load(),
        }
    }

    fn save(&mut self, theme: Theme) {
        match self {
            BrowserStore::Local { storage, key } => {
                if storage.set_item(key, theme.as_str()).is_err() {
                    tracing::warn!("failed to persist theme choice");
                }
            }
            BrowserStore::Memory(m) => m.save(theme),
        }
    }
}

pub struct ThemeBinding {
    controller: RefCell<ThemeController<BrowserStore>>,
    root: Element,
    document: Document,
    config: ThemeConfig,
    announcer: DomAnnouncer,
}

impl ThemeBinding {
    fn apply(&self, theme: Theme) {
        let _ = self.root.set_attribute(THEME_ATTR, theme.as_str());
    }

    pub fn toggle(&self) {
        let theme = self.controller.borrow_mut().toggle(&self.announcer);
        self.apply(theme);
        if let Some(meta) = dom::query(&self.document, "meta[name=\"theme-color\"]") {
            let _ = meta.set_attribute("content", theme.meta_color(&self.config));
        }
    }
}

/// Resolve and apply the initial theme, then wire `.theme-toggle` buttons and
/// the OS color-scheme signal.
pub fn init(
    document: &Document,
    config: &ThemeConfig,
    announcer: DomAnnouncer,
) -> Result<Rc<ThemeBinding>, WebError> {
    let window = dom::window()?;
    let root = document
        .document_element()
        .ok_or(WebError::MissingElement("html"))?;
    let media = window.match_media(PREFERS_DARK_QUERY).ok().flatten();
    let prefers_dark = media.as_ref().is_some_and(|m| m.matches());

    let controller = ThemeController::init(BrowserStore::open(&config.storage_key), prefers_dark);
    let binding = Rc::new(ThemeBinding {
        controller: RefCell::new(controller),
        root,
        document: document.clone(),
        config: config.clone(),
        announcer,
    });
    binding.apply(binding.controller.borrow().current());

    for button in dom::query_all(document, ".theme-toggle") {
        let on_click = binding.clone();
        dom::listen(&button, "click", move |_| on_click.toggle());
        let on_key = binding.clone();
        dom::listen(&button, "keydown", move |event| {
            if let Some((key, _)) = dom::key_of(event)
                && is_activation_key(&key)
            {
                event.prevent_default();
                on_key.toggle();
            }
        });
    }

    if let Some(media) = media {
        let on_change = binding.clone();
        dom::listen(&media, "change", move |event| {
            let Some(change) = event.dyn_ref::<MediaQueryListEvent>() else {
                return;
            };
            let next = on_change
                .controller
                .borrow_mut()
                .on_system_change(change.matches());
            if let Some(theme) = next {
                on_change.apply(theme);
            }
        });
    }

    Ok(binding)
}
