//! Color schemes and user preferences.
//!
//! A *scheme* is a concrete visual mode applied to the document root. Only
//! [`ColorMode::Dark`] and [`ColorMode::Light`] are recognized by system
//! detection, but the resolver applies arbitrary scheme strings (stored
//! values, forced overrides) verbatim, so most of the crate passes schemes
//! around as `&str`.
//!
//! A *preference* is what drives resolution: either a scheme name or the
//! `"system"` sentinel, which defers to the OS/browser-reported scheme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel preference that defers to system detection.
pub const SYSTEM_PREFERENCE: &str = "system";

/// A color scheme recognized by system detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Dark,
    Light,
}

impl ColorMode {
    /// Detection order. Dark is probed before light, so if both queries
    /// match, dark wins.
    pub const KNOWN: [ColorMode; 2] = [ColorMode::Dark, ColorMode::Light];

    /// The scheme name as it appears in classes, attributes and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Dark => "dark",
            ColorMode::Light => "light",
        }
    }

    /// The media query that matches when the system prefers this scheme.
    pub fn media_query(self) -> String {
        format!("(prefers-color-scheme: {})", self.as_str())
    }

    /// The opposite scheme.
    pub fn toggled(self) -> ColorMode {
        match self {
            ColorMode::Dark => ColorMode::Light,
            ColorMode::Light => ColorMode::Dark,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color scheme '{0}' (expected 'dark' or 'light')")]
pub struct UnknownScheme(pub String);

impl FromStr for ColorMode {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(ColorMode::Dark),
            "light" => Ok(ColorMode::Light),
            other => Err(UnknownScheme(other.to_string())),
        }
    }
}

/// A raw preference: the `"system"` sentinel or a scheme name.
///
/// Scheme names are kept as strings since the resolver does not restrict
/// which schemes a user may store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Preference {
    System,
    Scheme(String),
}

impl Preference {
    pub fn parse(raw: &str) -> Self {
        if raw == SYSTEM_PREFERENCE {
            Preference::System
        } else {
            Preference::Scheme(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Preference::System => SYSTEM_PREFERENCE,
            Preference::Scheme(s) => s,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Preference::System)
    }
}

impl From<ColorMode> for Preference {
    fn from(mode: ColorMode) -> Self {
        Preference::Scheme(mode.as_str().to_string())
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
