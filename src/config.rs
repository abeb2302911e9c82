//! Page behavior configuration.
//!
//! Every timing, threshold, color and lookup table the components use lives in
//! [`UiConfig`]. The stock values reproduce the portfolio site as shipped; a
//! page can override any subset of them by embedding a sparse TOML document:
//!
//! ```html
//! <script type="application/toml" id="folio-config">
//! [timing]
//! announce_ms = 1500
//!
//! [partners.Acme]
//! url = "https://acme.example/"
//! name = "Acme Corporation"
//! </script>
//! ```
//!
//! The overlay is merged on top of the stock defaults table-by-table, so an
//! override only needs the keys it changes. Unknown keys are rejected to catch
//! typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! [timing]
//! announce_ms = 1000          # Lifetime of a screen-reader announcement
//! focus_delay_ms = 100        # Delay before focusing the modal close control
//! scroll_settle_ms = 300      # Delay before scrolling to an expanded card
//! resize_debounce_ms = 250    # Debounce for service-grid relayout
//! emphasis_ms = 2000          # Gallery item emphasis duration
//! counter_ms = 2000           # Count-up animation duration
//!
//! [layout]
//! header_offset = 100         # Fixed header height used when scrolling to targets
//! mobile_breakpoint = 991     # Viewport width at or below which cards use one column
//! progress_threshold = 300    # Scroll offset that shows the back-to-top button
//!
//! [header]
//! scroll_threshold = 100
//! light_background = "rgba(255, 255, 255, 0.95)"
//! dark_background = "rgba(26, 26, 26, 0.95)"
//! backdrop_filter = "blur(10px)"
//!
//! [theme]
//! storage_key = "theme"
//! meta_color_light = "#000000"
//! meta_color_dark = "#ffffff"
//!
//! [observers]
//! reveal_threshold = 0.1
//! reveal_root_margin = "0px 0px -50px 0px"
//! counter_threshold = 0.7
//!
//! [gallery]
//! alts = ["...", "...", "..."]
//! fallback = ["assets/certs/...", "...", "..."]
//!
//! [partners.RACQ]
//! url = "https://www.racq.com.au/"
//! name = "RACQ"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::links::{Destination, PartnerRegistry};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full behavior configuration for the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Delays and durations, in milliseconds.
    pub timing: TimingConfig,
    /// Layout offsets and breakpoints, in CSS pixels.
    pub layout: LayoutConfig,
    /// Scroll-dependent header styling.
    pub header: HeaderConfig,
    /// Theme persistence and the mobile browser color hint.
    pub theme: ThemeConfig,
    /// Intersection thresholds for the reveal and counter observers.
    pub observers: ObserverConfig,
    /// Certificate gallery labels and the hardcoded path fallback.
    pub gallery: GalleryConfig,
    /// Partner logo registry keyed by logo filename stem.
    pub partners: BTreeMap<String, Destination>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            layout: LayoutConfig::default(),
            header: HeaderConfig::default(),
            theme: ThemeConfig::default(),
            observers: ObserverConfig::default(),
            gallery: GalleryConfig::default(),
            partners: PartnerRegistry::stock().into_entries(),
        }
    }
}

impl UiConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        for (name, value) in [
            ("timing.announce_ms", t.announce_ms),
            ("timing.focus_delay_ms", t.focus_delay_ms),
            ("timing.scroll_settle_ms", t.scroll_settle_ms),
            ("timing.resize_debounce_ms", t.resize_debounce_ms),
            ("timing.emphasis_ms", t.emphasis_ms),
            ("timing.counter_ms", t.counter_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{name} must be non-zero")));
            }
        }
        for (name, value) in [
            ("observers.reveal_threshold", self.observers.reveal_threshold),
            ("observers.counter_threshold", self.observers.counter_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be in (0, 1]"
                )));
            }
        }
        if self.layout.mobile_breakpoint == 0 {
            return Err(ConfigError::Validation(
                "layout.mobile_breakpoint must be non-zero".into(),
            ));
        }
        if self.gallery.alts.is_empty() {
            return Err(ConfigError::Validation(
                "gallery.alts must not be empty".into(),
            ));
        }
        for (key, dest) in &self.partners {
            if !dest.url.starts_with("https://") && !dest.url.starts_with("http://") {
                return Err(ConfigError::Validation(format!(
                    "partners.{key}.url must be an http(s) URL"
                )));
            }
        }
        Ok(())
    }

    /// Partner registry built from the `[partners]` tables.
    pub fn partner_registry(&self) -> PartnerRegistry {
        PartnerRegistry::new(self.partners.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub announce_ms: u32,
    pub focus_delay_ms: u32,
    pub scroll_settle_ms: u32,
    pub resize_debounce_ms: u32,
    pub emphasis_ms: u32,
    pub counter_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            announce_ms: 1000,
            focus_delay_ms: 100,
            scroll_settle_ms: 300,
            resize_debounce_ms: 250,
            emphasis_ms: 2000,
            counter_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Height reserved for the fixed header when scrolling to an element.
    pub header_offset: u32,
    /// Widths at or below this use the single-column service grid.
    pub mobile_breakpoint: u32,
    /// Scroll offset past which the back-to-top button is shown.
    pub progress_threshold: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_offset: 100,
            mobile_breakpoint: 991,
            progress_threshold: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Scroll offset (exclusive) past which the header turns translucent.
    pub scroll_threshold: u32,
    pub light_background: String,
    pub dark_background: String,
    pub backdrop_filter: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 100,
            light_background: "rgba(255, 255, 255, 0.95)".to_string(),
            dark_background: "rgba(26, 26, 26, 0.95)".to_string(),
            backdrop_filter: "blur(10px)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Local storage key holding `"light"` or `"dark"`.
    pub storage_key: String,
    /// `<meta name="theme-color">` content while the light theme is active.
    pub meta_color_light: String,
    /// `<meta name="theme-color">` content while the dark theme is active.
    pub meta_color_dark: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            meta_color_light: "#000000".to_string(),
            meta_color_dark: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObserverConfig {
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub counter_threshold: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            counter_threshold: 0.7,
        }
    }
}

/// Certificate gallery settings.
///
/// `alts` labels the images of a `data-cert-images` list in order. `fallback`
/// is used when a gallery is requested without a usable list.
// FIXME: the fallback paths duplicate what the page markup already carries in
// `data-cert-images`; drop them once every gallery trigger has the attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub alts: Vec<String>,
    pub fallback: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            alts: vec![
                "Harvard Strategic Management Certificate".to_string(),
                "Harvard Project Management Certificate".to_string(),
                "Harvard Real Estate Investment Certificate".to_string(),
            ],
            fallback: vec![
                "assets/certs/Harvard Strategic Management.jpg".to_string(),
                "assets/certs/Harvard Project Management.jpg".to_string(),
                "assets/certs/Harvard Real Estate Investment.jpg".to_string(),
            ],
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(UiConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Resolve the effective config from an optional page-supplied TOML overlay.
///
/// A blank overlay counts as absent.
pub fn load_config(overlay: Option<&str>) -> Result<UiConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => merge_toml(base, toml::from_str::<toml::Value>(text)?),
        None => base,
    };
    let config: UiConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config document with every key.
pub fn stock_config_toml() -> &'static str {
    include_str!("stock_config.toml")
}
