//! Light/dark theme preference.
//!
//! The active theme is mirrored onto `<html data-theme="...">`, which every
//! theme-aware style reads. Resolution at load time is:
//!
//! ```text
//! stored choice  →  OS "prefers dark" signal  →  light
//! ```
//!
//! Only an explicit toggle writes the stored choice. Once one exists, OS
//! color-scheme changes are ignored on this device for good: the stored value
//! has no expiry.

use std::fmt;
use std::str::FromStr;

use crate::announce::Announce;
use crate::config::ThemeConfig;

/// Name of the root attribute carrying the active theme.
pub const THEME_ATTR: &str = "data-theme";

/// Media query for the operating system's dark preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }

    /// `<meta name="theme-color">` content for this theme.
    pub fn meta_color(self, config: &ThemeConfig) -> &str {
        match self {
            Theme::Light => &config.meta_color_light,
            Theme::Dark => &config.meta_color_dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Durable storage for the explicit theme choice.
pub trait PreferenceStore {
    /// The raw stored value, if any.
    fn load(&self) -> Option<String>;
    fn save(&mut self, theme: Theme);
}

/// Initial theme from a stored choice and the OS signal.
///
/// A stored value that is neither `"light"` nor `"dark"` counts as absent.
pub fn resolve_initial(stored: Option<&str>, system_prefers_dark: bool) -> Theme {
    stored
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| Theme::from_prefers_dark(system_prefers_dark))
}

/// Owns the current theme and its persistence.
pub struct ThemeController<S> {
    current: Theme,
    store: S,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolve the initial theme. The caller applies [`Self::current`] to the
    /// document.
    pub fn init(store: S, system_prefers_dark: bool) -> Self {
        let stored = store.load();
        if let Some(raw) = stored.as_deref()
            && raw.parse::<Theme>().is_err()
        {
            tracing::warn!(value = raw, "ignoring unrecognized stored theme");
        }
        let current = resolve_initial(stored.as_deref(), system_prefers_dark);
        Self { current, store }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme, persist it, and announce the change.
    pub fn toggle(&mut self, announcer: &impl Announce) -> Theme {
        self.current = self.current.toggled();
        self.store.save(self.current);
        announcer.announce(&format!("Switched to {} mode", self.current));
        self.current
    }

    /// React to an OS color-scheme change.
    ///
    /// Returns the theme to apply, or `None` when an explicit choice exists.
    /// An unrecognized stored value is not a choice.
    pub fn on_system_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        let explicit = self.store.load().and_then(|s| s.parse::<Theme>().ok());
        if explicit.is_some() {
            return None;
        }
        self.current = Theme::from_prefers_dark(prefers_dark);
        Some(self.current)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// In-memory store, for tests and pages without local storage.
#[derive(Debug, Default)]
pub struct MemoryStore(pub Option<String>);

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.0.clone()
    }

    fn save(&mut self, theme: Theme) {
        self.0 = Some(theme.as_str().to_string());
    }
}
