//! Scroll-dependent header styling.
//!
//! Recomputed on every scroll event and every `data-theme` change. The style
//! is a pure function of the scroll offset and the active theme; nothing is
//! remembered between calls.

use crate::config::HeaderConfig;
use crate::theme::Theme;

/// Inline style to apply to `.main-header`. `None` clears the property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderStyle<'a> {
    pub background_color: Option<&'a str>,
    pub backdrop_filter: Option<&'a str>,
}

impl HeaderStyle<'_> {
    pub const CLEAR: HeaderStyle<'static> = HeaderStyle {
        background_color: None,
        backdrop_filter: None,
    };
}

pub fn header_style(scroll_y: f64, theme: Theme, config: &HeaderConfig) -> HeaderStyle<'_> {
    if scroll_y <= f64::from(config.scroll_threshold) {
        return HeaderStyle::CLEAR;
    }
    let background = match theme {
        Theme::Light => config.light_background.as_str(),
        Theme::Dark => config.dark_background.as_str(),
    };
    HeaderStyle {
        background_color: Some(background),
        backdrop_filter: Some(config.backdrop_filter.as_str()),
    }
}
