//! Page navigation helpers: mobile sidebar, in-page anchors, and the
//! back-to-top progress ring.

/// Open/closed state of the mobile sidebar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Returns true if the state changed.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    /// Returns true if the state changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Escape only matters while the menu is showing.
    pub fn on_escape(&mut self) -> bool {
        self.close()
    }
}

/// Scroll position that puts an element just below the fixed header.
pub fn anchor_scroll_top(element_top: f64, header_offset: u32) -> f64 {
    element_top - f64::from(header_offset)
}

/// `stroke-dashoffset` for the progress ring at a scroll position.
///
/// The ring is fully hidden (`offset == length`) at the top and fully drawn
/// at the bottom. A page that cannot scroll keeps the ring hidden.
pub fn progress_dash_offset(
    path_length: f64,
    scroll_y: f64,
    scroll_height: f64,
    viewport_height: f64,
) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return path_length;
    }
    let fraction = (scroll_y / scrollable).clamp(0.0, 1.0);
    path_length - fraction * path_length
}

/// Whether the back-to-top button should be shown.
pub fn progress_visible(scroll_y: f64, threshold: u32) -> bool {
    scroll_y > f64::from(threshold)
}
