//! Certificate gallery markup and per-item emphasis.
//!
//! The gallery replaces the single-image slot inside
//! `.photo-modal-image-container` while open, and the slot is rendered back
//! when the modal closes. Both are generated with Maud so paths and alt texts
//! are escaped.

use maud::{Markup, html};

use super::dispatch::CertificateImage;

pub const GRID_CLASS: &str = "certificate-grid";
pub const ITEM_CLASS: &str = "certificate-item";

/// Id of the single-image `<img>` slot.
pub const SLOT_ID: &str = "modalImage";

const GRID_STYLE: &str = "display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); \
gap: 2rem; max-width: 90vw; max-height: 90vh; overflow-y: auto; padding: 1rem;";
const ITEM_STYLE: &str = "text-align: center; transition: transform 0.3s ease;";
const IMAGE_STYLE: &str = "max-width: 100%; max-height: 400px; object-fit: contain; \
border-radius: 12px; border: 2px solid var(--primary-color); \
box-shadow: 0 8px 25px rgba(0, 0, 0, 0.2); margin-bottom: 1rem; transition: transform 0.3s ease;";

/// Responsive grid with one focusable item per certificate.
pub fn render_gallery(images: &[CertificateImage]) -> Markup {
    html! {
        div class=(GRID_CLASS) style=(GRID_STYLE) role="list" {
            @for (index, cert) in images.iter().enumerate() {
                div class=(ITEM_CLASS) style=(ITEM_STYLE) role="listitem" data-cert-index=(index) {
                    img src=(cert.src) alt=(cert.alt) style=(IMAGE_STYLE) tabindex="0";
                }
            }
        }
    }
}

/// The empty single-image slot restored after a gallery session.
pub fn render_single_slot() -> Markup {
    html! {
        img class="photo-modal-image" id=(SLOT_ID) alt="Enlarged image";
    }
}

/// Inline transform/filter applied to a gallery item container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStyle {
    pub transform: &'static str,
    pub filter: &'static str,
}

pub const ITEM_REST: ItemStyle = ItemStyle {
    transform: "scale(1)",
    filter: "brightness(1)",
};
const ITEM_SELECTED: ItemStyle = ItemStyle {
    transform: "scale(1.02)",
    filter: "brightness(1.1)",
};
const ITEM_DIMMED: ItemStyle = ItemStyle {
    transform: "scale(0.95)",
    filter: "brightness(0.8)",
};

/// Hover lift: (container transform, image transform).
pub const HOVER_ON: (&str, &str) = ("translateY(-5px)", "scale(1.05)");
pub const HOVER_OFF: (&str, &str) = ("translateY(0)", "scale(1)");

/// Styles for every item while `selected` is emphasized.
pub fn emphasis(count: usize, selected: usize) -> Vec<ItemStyle> {
    (0..count)
        .map(|i| if i == selected { ITEM_SELECTED } else { ITEM_DIMMED })
        .collect()
}

pub fn emphasis_message(cert: &CertificateImage) -> String {
    format!("Focused on {}", cert.alt)
}

/// Item to focus for an arrow key, wrapping at both ends.
pub fn arrow_target(count: usize, current: Option<usize>, key: &str) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let forward = match key {
        "ArrowRight" | "ArrowDown" => true,
        "ArrowLeft" | "ArrowUp" => false,
        _ => return None,
    };
    Some(match (current, forward) {
        (Some(i), true) => (i + 1) % count,
        (Some(i), false) => (i + count - 1) % count,
        (None, true) => 0,
        (None, false) => count - 1,
    })
}
