//! Click-to-open behavior for partner logos and experience cards.
//!
//! Both kinds of element follow the same rule: derive a lookup key, resolve it
//! to a [`Destination`], and if that succeeds turn the element into a button
//! that opens the destination in a new tab. The difference is only where the
//! key and destination come from:
//!
//! | Element | Key | Destination |
//! |---------|-----|-------------|
//! | Partner logo (`.scroller__inner img`, `.org-logos img`) | filename stem of `src` | [`PartnerRegistry`] lookup |
//! | Experience card (`.clickable-experience`) | `data-company-url` | the attribute itself, named by the card heading |
//!
//! Unresolved elements stay inert; the caller logs a warning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an activated element sends the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Destination {
    pub url: String,
    /// Human name used in the accessible label and the announcement.
    pub name: String,
}

/// `window.open` features for every outbound link.
pub const NEW_TAB_FEATURES: &str = "noopener,noreferrer";

/// Everything the web layer needs to make an element open a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub url: String,
    /// Value for `aria-label`.
    pub label: String,
    /// Text passed to the announcer when the link is followed.
    pub announcement: String,
}

impl Activation {
    /// Logos and cards are activated alike: a labelled button that opens
    /// the destination.
    pub fn new(dest: &Destination) -> Self {
        Self {
            url: dest.url.clone(),
            label: format!("Visit {} website (opens in new tab)", dest.name),
            announcement: opening_message(&dest.name),
        }
    }
}

fn opening_message(name: &str) -> String {
    format!("Opening {name} website in new tab")
}

/// Read-only mapping from logo filename stem to destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartnerRegistry {
    entries: BTreeMap<String, Destination>,
}

const STOCK_PARTNERS: &[(&str, &str, &str)] = &[
    ("FourSeasons", "https://www.fourseasons.com/", "Four Seasons"),
    ("Nous", "https://nousgroup.com/", "Nous Group"),
    ("EquityTrustees", "https://www.eqt.com.au/", "Equity Trustees"),
    ("NSWPorts", "https://www.nswports.com.au/", "NSW Ports"),
    ("RACQ", "https://www.racq.com.au/", "RACQ"),
    ("VisionAustralia", "https://www.visionaustralia.org/", "Vision Australia"),
    ("DairyAustralia", "https://www.dairyaustralia.com.au/en", "Dairy Australia"),
    ("MIT", "https://www.mit.edu.au/", "MIT"),
    ("Harvard", "https://www.harvard.edu/", "Harvard University"),
    ("RMIT", "https://www.rmit.edu.au/", "RMIT University"),
    ("SwinburneUniversity", "https://www.swinburne.edu.au/", "Swinburne University"),
    ("MassGeneralHospital", "https://www.massgeneral.org/", "Massachusetts General Hospital"),
    ("BostonMedicalCenter", "https://www.bmc.org/", "Boston Medical Center"),
    ("BrighamandWomansHospital", "https://www.brighamandwomens.org/", "Brigham and Women's Hospital"),
    ("GippslandHealthAlliance", "https://gha.net.au/", "Gippsland Health Alliance"),
    ("BetterHealthNetwork", "https://www.bhn.org.au/", "Better Health Network"),
    ("Healthscope", "https://healthscope.com.au/", "Healthscope"),
    ("AEMO", "https://aemo.com.au/", "AEMO"),
    ("VGCCC", "https://www.vgccc.vic.gov.au/", "Victorian Casino Control Commission"),
    ("BarwonWater", "https://www.barwonwater.vic.gov.au/", "Barwon Water"),
    ("CentralCoastCouncil", "https://www.centralcoast.nsw.gov.au/", "Central Coast Council"),
    ("CardiniaShireCouncil", "https://www.cardinia.vic.gov.au/", "Cardinia Shire Council"),
];

impl PartnerRegistry {
    pub fn new(entries: BTreeMap<String, Destination>) -> Self {
        Self { entries }
    }

    /// The organizations the portfolio ships with.
    pub fn stock() -> Self {
        let entries = STOCK_PARTNERS
            .iter()
            .map(|(key, url, name)| {
                (
                    key.to_string(),
                    Destination {
                        url: url.to_string(),
                        name: name.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, key: &str) -> Option<&Destination> {
        self.entries.get(key)
    }

    /// Resolve a logo image by its `src`.
    pub fn resolve_logo(&self, src: &str) -> Option<&Destination> {
        self.lookup(logo_key(src))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> BTreeMap<String, Destination> {
        self.entries
    }
}

/// Lookup key for a logo: the last path segment of `src` up to its first dot.
///
/// - `"https://site/assets/logos/RACQ.png"` → `"RACQ"`
/// - `"img/Nous.logo.webp"` → `"Nous"`
/// - `"RMIT"` → `"RMIT"`
pub fn logo_key(src: &str) -> &str {
    let filename = src.rsplit('/').next().unwrap_or(src);
    filename.split('.').next().unwrap_or(filename)
}

/// Destination for an experience card.
///
/// The URL is the card's `data-company-url`; a missing or blank attribute
/// leaves the card unresolved. The name is the card heading, or `"company"`.
pub fn experience_destination(
    company_url: Option<&str>,
    heading: Option<&str>,
) -> Option<Destination> {
    let url = company_url.map(str::trim).filter(|u| !u.is_empty())?;
    let name = heading
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or("company");
    Some(Destination {
        url: url.to_string(),
        name: name.to_string(),
    })
}

/// Keys that activate an element in the same way a click does.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}
