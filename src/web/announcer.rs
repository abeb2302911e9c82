use web_sys::Document;

use super::dom;
use crate::announce::{Announce, LIVE_REGION_ATTRS};

/// Appends a live-region node per message and removes it after a delay.
#[derive(Clone)]
pub struct DomAnnouncer {
    document: Document,
    lifetime_ms: u32,
}

impl DomAnnouncer {
    pub fn new(document: Document, lifetime_ms: u32) -> Self {
        Self {
            document,
            lifetime_ms,
        }
    }
}

impl Announce for DomAnnouncer {
    fn announce(&self, message: &str) {
        let (Ok(node), Some(body)) = (self.document.create_element("div"), self.document.body())
        else {
            return;
        };
        for (name, value) in LIVE_REGION_ATTRS {
            let _ = node.set_attribute(name, value);
        }
        node.set_text_content(Some(message));
        if body.append_child(&node).is_err() {
            return;
        }
        dom::after(self.lifetime_ms, move || {
            // The node may already be gone if the page replaced <body>.
            if let Some(parent) = node.parent_node() {
                let _ = parent.remove_child(&node);
            }
        });
    }
}
