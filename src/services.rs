//! Service card accordion.
//!
//! Cards start collapsed and at most one is expanded at any time. Every
//! operation returns the ordered list of [`CardChange`]s the web layer must
//! apply; a collapse of the previously expanded card always comes before the
//! expansion of the new one, so the DOM never shows two expanded cards.
//!
//! ```text
//!            toggle / Enter / Space
//! Collapsed ───────────────────────────▶ Expanded
//!     ▲                                      │
//!     └──── toggle / Escape / outside click ─┘
//!           / close button / other card expands
//! ```

use crate::announce::Announce;

/// Class marking an expanded card.
pub const EXPANDED_CLASS: &str = "expanded";

/// Indicator rotation while expanded / collapsed.
pub const INDICATOR_EXPANDED: &str = "rotate(45deg)";
pub const INDICATOR_COLLAPSED: &str = "rotate(0deg)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardChange {
    Expanded(usize),
    Collapsed(usize),
}

/// Accordion state over a fixed list of cards.
#[derive(Debug, Clone)]
pub struct ServiceCards {
    titles: Vec<String>,
    expanded: Option<usize>,
}

impl ServiceCards {
    /// `titles` are the cards' `.service-title` texts, in document order.
    pub fn new(titles: Vec<String>) -> Self {
        Self {
            titles,
            expanded: None,
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    /// Click, Enter or Space on a card.
    pub fn toggle(&mut self, index: usize, announcer: &impl Announce) -> Vec<CardChange> {
        if index >= self.titles.len() {
            return Vec::new();
        }
        if self.is_expanded(index) {
            return self.collapse(index, announcer).into_iter().collect();
        }
        let mut changes = Vec::with_capacity(2);
        if let Some(previous) = self.expanded {
            changes.extend(self.collapse(previous, announcer));
        }
        self.expanded = Some(index);
        announcer.announce(&format!(
            "{} service details expanded",
            self.titles[index]
        ));
        changes.push(CardChange::Expanded(index));
        changes
    }

    /// Escape while `index` has focus.
    pub fn escape(&mut self, index: usize, announcer: &impl Announce) -> Option<CardChange> {
        if self.is_expanded(index) {
            self.collapse(index, announcer)
        } else {
            None
        }
    }

    /// Click outside every card, or the close button inside the expanded one.
    pub fn collapse_current(&mut self, announcer: &impl Announce) -> Option<CardChange> {
        let current = self.expanded?;
        self.collapse(current, announcer)
    }

    fn collapse(&mut self, index: usize, announcer: &impl Announce) -> Option<CardChange> {
        if !self.is_expanded(index) {
            return None;
        }
        self.expanded = None;
        announcer.announce(&format!(
            "{} service details collapsed",
            self.titles[index]
        ));
        Some(CardChange::Collapsed(index))
    }
}

/// `grid-column` for an expanded card at the given viewport width.
pub fn expanded_grid_column(viewport_width: f64, mobile_breakpoint: u32) -> &'static str {
    if viewport_width <= f64::from(mobile_breakpoint) {
        "auto"
    } else {
        "1 / -1"
    }
}

/// Entrance stagger for the card at `index`.
pub fn stagger_delay(index: usize) -> String {
    format!("{}s", index as f64 / 10.0)
}
