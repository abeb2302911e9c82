//! Screen-reader announcements.
//!
//! An announcement is a short-lived, visually hidden `<div>` appended to
//! `<body>` with a polite live region, so assistive technology reads it
//! without interrupting the current utterance. Every call creates its own
//! node and removes it after `timing.announce_ms`; calls never share state.

/// Attributes set on every announcement node.
pub const LIVE_REGION_ATTRS: &[(&str, &str)] = &[
    ("aria-live", "polite"),
    ("aria-atomic", "true"),
    ("class", "sr-only"),
    ("style", SR_ONLY_STYLE),
];

/// Inline visually-hidden style, so announcements stay hidden even on pages
/// whose stylesheet lacks an `.sr-only` rule.
pub const SR_ONLY_STYLE: &str = "position:absolute;width:1px;height:1px;padding:0;\
margin:-1px;overflow:hidden;clip:rect(0, 0, 0, 0);white-space:nowrap;border:0";

/// Anything that can speak a message to assistive technology.
pub trait Announce {
    fn announce(&self, message: &str);
}

/// Announcer that keeps every message, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingAnnouncer {
    pub messages: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl Announce for RecordingAnnouncer {
    fn announce(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
