//! Media-query matchers.
//!
//! [`MockMedia`] scripts a browser's `matchMedia` for tests. [`OsMedia`]
//! answers `prefers-color-scheme` queries from the operating system's
//! appearance setting, for native hosts. OS detection can be overridden with
//! [`set_os_detector`]:
//!
//! ```rust
//! use colormode::env::set_os_detector;
//! use colormode::ColorMode;
//!
//! set_os_detector(|| Some(ColorMode::Dark));
//! ```

use std::collections::HashSet;
use std::sync::Mutex;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;

use super::MediaMatcher;
use crate::scheme::ColorMode;
use crate::script::SCHEME_FEATURE_QUERY;

/// The `media` string a browser reports for a query it does not understand.
pub const NOT_ALL: &str = "not all";

const SCHEME_FEATURE_PREFIX: &str = "(prefers-color-scheme";

/// The evaluated form of a media query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQueryResult {
    /// The serialized query, or [`NOT_ALL`] if the host did not understand it.
    pub media: String,
    pub matches: bool,
}

impl MediaQueryResult {
    pub fn new(media: impl Into<String>, matches: bool) -> Self {
        Self {
            media: media.into(),
            matches,
        }
    }

    pub fn not_all() -> Self {
        Self::new(NOT_ALL, false)
    }

    pub fn is_not_all(&self) -> bool {
        self.media == NOT_ALL
    }
}

/// Scripted media-query matcher for testing.
#[derive(Debug, Clone)]
pub struct MockMedia {
    supported: bool,
    scheme_feature: bool,
    feature_query: bool,
    matching: HashSet<String>,
}

impl Default for MockMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMedia {
    /// Media queries supported, no scheme preference signaled.
    pub fn new() -> Self {
        Self {
            supported: true,
            scheme_feature: true,
            feature_query: true,
            matching: HashSet::new(),
        }
    }

    /// No media-query capability at all.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// Media queries work but `prefers-color-scheme` is unknown, so every
    /// query on that feature reports `not all`.
    pub fn scheme_feature_unsupported() -> Self {
        Self {
            scheme_feature: false,
            ..Self::new()
        }
    }

    /// The system prefers `mode`.
    pub fn prefers(mode: ColorMode) -> Self {
        Self::new().with_match(mode.media_query())
    }

    /// Reports `not all` for the bare `(prefers-color-scheme)` query only,
    /// while per-scheme queries keep answering as scripted.
    pub fn without_feature_query(mut self) -> Self {
        self.feature_query = false;
        self
    }

    /// Makes `query` match.
    pub fn with_match(mut self, query: impl Into<String>) -> Self {
        self.matching.insert(query.into());
        self
    }
}

impl MediaMatcher for MockMedia {
    fn match_media(&self, query: &str) -> Option<MediaQueryResult> {
        if !self.supported {
            return None;
        }
        if !self.scheme_feature && query.starts_with(SCHEME_FEATURE_PREFIX) {
            return Some(MediaQueryResult::not_all());
        }
        if !self.feature_query && query == SCHEME_FEATURE_QUERY {
            return Some(MediaQueryResult::not_all());
        }
        Some(MediaQueryResult::new(query, self.matching.contains(query)))
    }
}

type OsDetector = fn() -> Option<ColorMode>;

static OS_DETECTOR: Lazy<Mutex<OsDetector>> = Lazy::new(|| Mutex::new(dark_light_detector));

/// Overrides the detector [`OsMedia`] uses to read the OS appearance.
///
/// Returning `None` means the OS signals no preference.
pub fn set_os_detector(detector: OsDetector) {
    let mut guard = OS_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    *guard = detector;
}

/// Reads the OS appearance through the configured detector.
pub fn detect_os_color_mode() -> Option<ColorMode> {
    let detector = OS_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    (*detector)()
}

fn dark_light_detector() -> Option<ColorMode> {
    match detect_os_theme() {
        Ok(OsThemeMode::Dark) => Some(ColorMode::Dark),
        Ok(OsThemeMode::Light) => Some(ColorMode::Light),
        Ok(OsThemeMode::Unspecified) => None,
        Err(err) => {
            tracing::debug!(error = ?err, "OS appearance detection failed");
            None
        }
    }
}

/// Media matcher backed by the OS appearance setting.
///
/// The appearance is read once at construction. Queries other than
/// `prefers-color-scheme` never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsMedia {
    detected: Option<ColorMode>,
}

impl OsMedia {
    /// Reads the current OS appearance.
    pub fn detect() -> Self {
        let detected = detect_os_color_mode();
        tracing::debug!(?detected, "read OS appearance");
        Self { detected }
    }

    /// A matcher reporting a fixed appearance.
    pub fn fixed(detected: Option<ColorMode>) -> Self {
        Self { detected }
    }

    pub fn detected(&self) -> Option<ColorMode> {
        self.detected
    }
}

impl MediaMatcher for OsMedia {
    fn match_media(&self, query: &str) -> Option<MediaQueryResult> {
        let matches = if query == SCHEME_FEATURE_QUERY {
            self.detected.is_some()
        } else {
            ColorMode::KNOWN
                .iter()
                .any(|mode| self.detected == Some(*mode) && query == mode.media_query())
        };
        Some(MediaQueryResult::new(query, matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_mock_unsupported_returns_none() {
        assert_eq!(MockMedia::unsupported().match_media("(min-width: 1px)"), None);
    }

    #[test]
    fn test_mock_without_feature_query_keeps_scheme_answers() {
        let media = MockMedia::prefers(ColorMode::Dark).without_feature_query();
        assert!(media
            .match_media("(prefers-color-scheme)")
            .unwrap()
            .is_not_all());
        let dark = media.match_media("(prefers-color-scheme: dark)").unwrap();
        assert!(!dark.is_not_all());
        assert!(dark.matches);
    }

    #[test]
    fn test_mock_scheme_feature_unsupported_reports_not_all() {
        let media = MockMedia::scheme_feature_unsupported();
        assert!(media
            .match_media("(prefers-color-scheme)")
            .unwrap()
            .is_not_all());
        assert!(media
            .match_media("(prefers-color-scheme: dark)")
            .unwrap()
            .is_not_all());
        assert!(!media
            .match_media("(min-width: 1px)")
            .unwrap()
            .is_not_all());
    }

    #[test]
    fn test_mock_prefers() {
        let media = MockMedia::prefers(ColorMode::Dark);
        assert!(media.match_media("(prefers-color-scheme: dark)").unwrap().matches);
        assert!(!media.match_media("(prefers-color-scheme: light)").unwrap().matches);
        assert_eq!(
            media.match_media("(prefers-color-scheme)").unwrap().media,
            "(prefers-color-scheme)"
        );
    }

    #[test]
    fn test_os_media_fixed() {
        let media = OsMedia::fixed(Some(ColorMode::Light));
        assert!(media.match_media("(prefers-color-scheme: light)").unwrap().matches);
        assert!(!media.match_media("(prefers-color-scheme: dark)").unwrap().matches);
        assert!(media.match_media("(prefers-color-scheme)").unwrap().matches);

        let none = OsMedia::fixed(None);
        assert!(!none.match_media("(prefers-color-scheme: light)").unwrap().matches);
        assert!(!none.match_media("(prefers-color-scheme: light)").unwrap().is_not_all());
    }

    #[test]
    #[serial]
    fn test_set_os_detector_override() {
        set_os_detector(|| Some(ColorMode::Dark));
        assert_eq!(detect_os_color_mode(), Some(ColorMode::Dark));
        assert_eq!(OsMedia::detect().detected(), Some(ColorMode::Dark));

        set_os_detector(|| None);
        assert_eq!(OsMedia::detect().detected(), None);

        set_os_detector(dark_light_detector);
    }
}
