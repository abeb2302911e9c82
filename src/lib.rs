//! # Folio UI
//!
//! The interactivity layer of a static personal portfolio site, compiled to
//! WebAssembly. The page is plain HTML and CSS that works without script;
//! this crate adds theme switching, scroll effects, clickable partner logos,
//! an expanding service-card accordion and an accessible photo/certificate
//! modal on top of it.
//!
//! # Architecture: Pure Core, Thin Bindings
//!
//! Every component is split in two:
//!
//! ```text
//! pure layer   state machines + style/markup functions   (any target, unit-tested)
//!      ▲
//!      │  events in, changes out
//!      ▼
//! web layer    web-sys listeners, DOM writes, timers       (wasm32 only)
//! ```
//!
//! The pure layer never touches the DOM. It takes plain values (a scroll
//! offset, a key name, an attribute string) and returns what should change
//! (a style, a list of card changes, a [`modal::KeyAction`]). The web layer in
//! `src/web/` reads the browser, calls the pure layer, and writes the result
//! back. This keeps every rule testable with `cargo test` on the host, and
//! keeps the browser glue short enough to check by eye.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Light/dark resolution, persistence and toggling |
//! | [`header`] | Scroll- and theme-dependent header style |
//! | [`motion`] | Reveal-on-scroll and ease-out count-ups |
//! | [`links`] | Partner registry, logo and experience-card destinations |
//! | [`services`] | Single-expanded service-card accordion |
//! | [`modal`] | Photo/certificate modal session, focus trap, gallery markup |
//! | [`nav`] | Mobile menu, anchor offsets, back-to-top progress ring |
//! | [`announce`] | Screen-reader live-region announcements |
//! | [`config`] | Stock defaults, page TOML overlay, validation |
//! | [`logging`] | `tracing` layer that forwards lines to a sink |
//!
//! # Design Decisions
//!
//! ## Owned State Per Component
//!
//! The current theme, the expanded service card and the modal session are
//! each owned by one binding object and shared with its event handlers
//! through `Rc`. There is no page-wide mutable state beyond the handles the
//! exported JS functions need to reach those bindings.
//!
//! ## Classify Once, Open Once
//!
//! A modal trigger is read exactly once, at activation, into an
//! [`modal::OpenRequest`]. [`modal::ModalSession::open`] is the only way in,
//! and it refuses to open twice, so the overlay is always either fully open
//! or fully closed.
//!
//! ## Failures Stay Local
//!
//! A component whose anchor elements are missing logs a warning and does not
//! start; the others are unaffected. Unknown logos stay inert, image load
//! failures are announced and logged, and uncaught script errors are logged
//! at the top level. Nothing retries.
//!
//! ## Maud For Generated Markup
//!
//! The certificate gallery is rendered with [Maud](https://maud.lambda.xyz/)
//! rather than by building nodes one call at a time. Paths and alt texts are
//! escaped by construction, and the markup is testable as a string.

pub mod announce;
pub mod config;
pub mod header;
pub mod links;
pub mod logging;
pub mod modal;
pub mod motion;
pub mod nav;
pub mod services;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Release version on a tagged build, `dev@<hash>` otherwise.
pub fn version() -> String {
    if env!("FOLIO_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION").to_string();
    }
    match env!("FOLIO_GIT_HASH") {
        "" => "dev@unknown".to_string(),
        hash => format!("dev@{hash}"),
    }
}
