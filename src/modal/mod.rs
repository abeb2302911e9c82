//! Photo and certificate modal.
//!
//! A single overlay per page shows either one image or a gallery of
//! certificates. The [`ModalSession`] state machine owns everything that must
//! be undone on close:
//!
//! ```text
//!           open(Single)            close()
//! Closed ─────────────────▶ Open ─────────────▶ Closed
//!        ─────────────────▶ (Single | Gallery)
//!           open(Gallery)
//! ```
//!
//! There is no Single ↔ Gallery transition; every open starts from Closed.
//! The session is generic over the element handle `E` so the web layer can
//! store real DOM nodes while tests use plain values.
//!
//! The module is split into:
//! - **Dispatch**: trigger attributes → [`OpenRequest`] (pure)
//! - **Focus**: the Tab/Shift+Tab [`FocusTrap`]
//! - **Gallery**: Maud markup, emphasis styles, arrow-key targets

pub mod dispatch;
pub mod focus;
pub mod gallery;

pub use dispatch::{CertificateImage, OpenRequest, Trigger, classify, gallery_images};
pub use focus::{Direction, FOCUSABLE_SELECTOR, FocusTrap};

use thiserror::Error;

use crate::announce::Announce;

pub const OPENED_SINGLE: &str = "Image modal opened. Press Escape to close.";
pub const OPENED_GALLERY: &str = "Certificate gallery opened. Use arrow keys to navigate between certificates. Press Escape to close.";
pub const CLOSED: &str = "Image modal closed.";
pub const IMAGE_LOADED: &str = "Image loaded successfully";
pub const IMAGE_LOAD_FAILED: &str = "Error: Image could not be loaded";

/// Class marking the overlay as shown.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModalError {
    #[error("modal is already open")]
    AlreadyOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Single,
    Gallery,
}

/// Page state the modal overrides while open, captured just before opening.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLock {
    /// Inline `overflow` of `<body>`.
    pub body_overflow: String,
    /// `aria-hidden` of the overlay, if it had one.
    pub overlay_aria_hidden: Option<String>,
}

#[derive(Debug)]
struct OpenState<E> {
    mode: ModalMode,
    images: Vec<CertificateImage>,
    previously_focused: Option<E>,
    page: PageLock,
    trap: FocusTrap<E>,
}

/// Everything needed to undo an open, returned by [`ModalSession::close`].
#[derive(Debug)]
pub struct ClosedSession<E> {
    pub mode: ModalMode,
    /// Element to refocus. The caller skips it if it has left the document.
    pub restore_focus: Option<E>,
    pub page: PageLock,
}

/// Key presses the modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey<'a> {
    Escape,
    Tab { shift: bool },
    Enter,
    Other(&'a str),
}

impl<'a> ModalKey<'a> {
    pub fn from_event(key: &'a str, shift: bool) -> Self {
        match key {
            "Escape" => ModalKey::Escape,
            "Tab" => ModalKey::Tab { shift },
            "Enter" => ModalKey::Enter,
            other => ModalKey::Other(other),
        }
    }
}

/// What the web layer should do with a key press. `Close` and `Focus` also
/// mean the browser default must be prevented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction<E> {
    Close,
    Focus(E),
    Ignore,
}

#[derive(Debug)]
pub struct ModalSession<E> {
    open: Option<OpenState<E>>,
}

impl<E> Default for ModalSession<E> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<E: Clone + PartialEq> ModalSession<E> {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<ModalMode> {
        self.open.as_ref().map(|s| s.mode)
    }

    /// Images currently shown; empty while closed.
    pub fn images(&self) -> &[CertificateImage] {
        self.open.as_ref().map(|s| s.images.as_slice()).unwrap_or(&[])
    }

    pub fn focus_trap(&self) -> Option<&FocusTrap<E>> {
        self.open.as_ref().map(|s| &s.trap)
    }

    /// Enter the open state. The focus trap starts empty; the caller fills it
    /// with [`Self::set_focusables`] once the overlay content is in place.
    pub fn open(
        &mut self,
        request: OpenRequest,
        previously_focused: Option<E>,
        page: PageLock,
        announcer: &impl Announce,
    ) -> Result<ModalMode, ModalError> {
        if self.open.is_some() {
            return Err(ModalError::AlreadyOpen);
        }
        let (mode, images, message) = match request {
            OpenRequest::Single(image) => (ModalMode::Single, vec![image], OPENED_SINGLE),
            OpenRequest::Gallery(images) => (ModalMode::Gallery, images, OPENED_GALLERY),
        };
        tracing::debug!(?mode, count = images.len(), "modal opened");
        self.open = Some(OpenState {
            mode,
            images,
            previously_focused,
            page,
            trap: FocusTrap::default(),
        });
        announcer.announce(message);
        Ok(mode)
    }

    /// Replace the focus-trap list. Ignored while closed.
    pub fn set_focusables(&mut self, elements: Vec<E>) {
        if let Some(state) = self.open.as_mut() {
            state.trap = FocusTrap::new(elements);
        }
    }

    /// Keyboard handling while open. `close_control` is the explicit close
    /// button; Enter on it closes.
    pub fn on_key(&self, key: ModalKey<'_>, active: Option<&E>, close_control: &E) -> KeyAction<E> {
        let Some(state) = self.open.as_ref() else {
            return KeyAction::Ignore;
        };
        match key {
            ModalKey::Escape => KeyAction::Close,
            ModalKey::Enter if active == Some(close_control) => KeyAction::Close,
            ModalKey::Tab { shift } => {
                let direction = if shift {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                match state.trap.step(active, direction) {
                    Some(target) => KeyAction::Focus(target.clone()),
                    None => KeyAction::Ignore,
                }
            }
            _ => KeyAction::Ignore,
        }
    }

    /// Leave the open state. `None` if already closed.
    pub fn close(&mut self, announcer: &impl Announce) -> Option<ClosedSession<E>> {
        let state = self.open.take()?;
        tracing::debug!(mode = ?state.mode, "modal closed");
        announcer.announce(CLOSED);
        Some(ClosedSession {
            mode: state.mode,
            restore_focus: state.previously_focused,
            page: state.page,
        })
    }
}
