//! Color mode configuration.
//!
//! Options are fixed at setup time and passed to
//! [`ColorModeScript`](crate::ColorModeScript) as plain data. They can be
//! built programmatically or loaded from YAML/JSON using the same camelCase
//! keys the browser global exposes:
//!
//! ```rust
//! use colormode::ColorModeOptions;
//!
//! let options = ColorModeOptions::from_yaml(r#"
//! preference: system
//! fallback: light
//! dataValue: theme
//! "#).unwrap();
//!
//! assert_eq!(options.class_name("dark"), "dark-mode");
//! assert_eq!(options.data_attribute().as_deref(), Some("data-theme"));
//! ```
//!
//! Missing keys take the defaults below.
//!
//! | key           | default                 |
//! |---------------|-------------------------|
//! | `preference`  | `system`                |
//! | `fallback`    | `light`                 |
//! | `globalName`  | `__NUXT_COLOR_MODE__`   |
//! | `classPrefix` | (empty)                 |
//! | `classSuffix` | `-mode`                 |
//! | `dataValue`   | (empty, no attribute)   |
//! | `storageKey`  | `nuxt-color-mode`       |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scheme::{Preference, SYSTEM_PREFERENCE};

pub const DEFAULT_PREFERENCE: &str = SYSTEM_PREFERENCE;
pub const DEFAULT_FALLBACK: &str = "light";
pub const DEFAULT_GLOBAL_NAME: &str = "__NUXT_COLOR_MODE__";
pub const DEFAULT_CLASS_SUFFIX: &str = "-mode";
pub const DEFAULT_STORAGE_KEY: &str = "nuxt-color-mode";

/// File extensions accepted by [`ColorModeOptions::from_file`].
pub const OPTIONS_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorModeOptions {
    /// Initial preference when nothing is stored: a scheme or `"system"`.
    pub preference: String,
    /// Scheme used when system detection is unavailable or inconclusive.
    pub fallback: String,
    /// Name the runtime handle is published under.
    pub global_name: String,
    pub class_prefix: String,
    pub class_suffix: String,
    /// Data attribute key. Setting `theme` yields `data-theme="<scheme>"`.
    /// Empty disables attribute mode.
    pub data_value: String,
    /// Storage key holding the user's explicit choice.
    pub storage_key: String,
}

impl Default for ColorModeOptions {
    fn default() -> Self {
        Self {
            preference: DEFAULT_PREFERENCE.to_string(),
            fallback: DEFAULT_FALLBACK.to_string(),
            global_name: DEFAULT_GLOBAL_NAME.to_string(),
            class_prefix: String::new(),
            class_suffix: DEFAULT_CLASS_SUFFIX.to_string(),
            data_value: String::new(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl ColorModeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preference(mut self, preference: impl Into<String>) -> Self {
        self.preference = preference.into();
        self
    }

    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn global_name(mut self, name: impl Into<String>) -> Self {
        self.global_name = name.into();
        self
    }

    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn class_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.class_suffix = suffix.into();
        self
    }

    pub fn data_value(mut self, key: impl Into<String>) -> Self {
        self.data_value = key.into();
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// The configured default preference.
    pub fn default_preference(&self) -> Preference {
        Preference::parse(&self.preference)
    }

    /// The class applied to the root for `scheme`.
    pub fn class_name(&self, scheme: &str) -> String {
        let mut name =
            String::with_capacity(self.class_prefix.len() + scheme.len() + self.class_suffix.len());
        name.push_str(&self.class_prefix);
        name.push_str(scheme);
        name.push_str(&self.class_suffix);
        name
    }

    /// The full data attribute name, or `None` when attribute mode is off.
    pub fn data_attribute(&self) -> Option<String> {
        if self.data_value.is_empty() {
            None
        } else {
            Some(format!("data-{}", self.data_value))
        }
    }

    /// Parses options from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses options from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads and validates options from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !OPTIONS_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ConfigError::UnsupportedFormat(extension));
        }

        let content = std::fs::read_to_string(path)?;
        let options = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content)?,
            "json" => Self::from_json(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(extension)),
        };
        tracing::debug!(path = %path.display(), "loaded color mode options");
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options describe a workable resolver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preference.is_empty() {
            return Err(ConfigError::invalid("preference", "must not be empty"));
        }
        if self.fallback.is_empty() {
            return Err(ConfigError::invalid("fallback", "must not be empty"));
        }
        if self.fallback == SYSTEM_PREFERENCE {
            return Err(ConfigError::invalid(
                "fallback",
                "must be a concrete scheme, not 'system'",
            ));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::invalid("storageKey", "must not be empty"));
        }
        if !is_identifier(&self.global_name) {
            return Err(ConfigError::invalid(
                "globalName",
                format!("'{}' is not a valid identifier", self.global_name),
            ));
        }
        if self.data_value.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "dataValue",
                "must not contain whitespace",
            ));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = ColorModeOptions::default();
        assert_eq!(options.preference, "system");
        assert_eq!(options.fallback, "light");
        assert_eq!(options.global_name, "__NUXT_COLOR_MODE__");
        assert_eq!(options.class_prefix, "");
        assert_eq!(options.class_suffix, "-mode");
        assert_eq!(options.data_value, "");
        assert_eq!(options.storage_key, "nuxt-color-mode");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_class_name_wraps_scheme() {
        let options = ColorModeOptions::new()
            .class_prefix("theme-")
            .class_suffix("");
        assert_eq!(options.class_name("dark"), "theme-dark");
        assert_eq!(ColorModeOptions::new().class_name("light"), "light-mode");
    }

    #[test]
    fn test_data_attribute() {
        assert_eq!(ColorModeOptions::new().data_attribute(), None);
        assert_eq!(
            ColorModeOptions::new().data_value("theme").data_attribute(),
            Some("data-theme".to_string())
        );
    }

    #[test]
    fn test_from_yaml_partial_keeps_defaults() {
        let options = ColorModeOptions::from_yaml("fallback: dark\nclassPrefix: cm-\n").unwrap();
        assert_eq!(options.fallback, "dark");
        assert_eq!(options.class_prefix, "cm-");
        assert_eq!(options.storage_key, "nuxt-color-mode");
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(
            ColorModeOptions::from_yaml("  \n").unwrap(),
            ColorModeOptions::default()
        );
    }

    #[test]
    fn test_from_json_camel_case() {
        let options =
            ColorModeOptions::from_json(r#"{"storageKey": "my-key", "dataValue": "mode"}"#)
                .unwrap();
        assert_eq!(options.storage_key, "my-key");
        assert_eq!(options.data_value, "mode");
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ColorModeOptions::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "JSON", .. }));
    }

    #[test]
    fn test_validate_rejects_system_fallback() {
        let err = ColorModeOptions::new()
            .fallback("system")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "fallback",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_bad_global_name() {
        for name in ["", "1abc", "my-name", "a b"] {
            let result = ColorModeOptions::new().global_name(name).validate();
            assert!(result.is_err(), "expected '{}' to be rejected", name);
        }
        for name in ["colorMode", "_x", "$mode", "__NUXT_COLOR_MODE__"] {
            assert!(ColorModeOptions::new().global_name(name).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_empty_storage_key() {
        let err = ColorModeOptions::new()
            .storage_key("")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("storageKey"));
    }

    #[test]
    fn test_validate_rejects_whitespace_data_value() {
        assert!(ColorModeOptions::new()
            .data_value("my theme")
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "preference: dark").unwrap();
        let options = ColorModeOptions::from_file(file.path()).unwrap();
        assert_eq!(options.preference, "dark");

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"fallback": "dark"}}"#).unwrap();
        let options = ColorModeOptions::from_file(file.path()).unwrap();
        assert_eq!(options.fallback, "dark");
    }

    #[test]
    fn test_from_file_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = ColorModeOptions::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "toml"));
    }

    #[test]
    fn test_from_file_validates() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "fallback: system").unwrap();
        assert!(matches!(
            ColorModeOptions::from_file(file.path()),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
