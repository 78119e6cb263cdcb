//! The runtime handle published after initial resolution.
//!
//! A [`ColorModeHandle`] lives for the lifetime of a page. It records the raw
//! preference (possibly `"system"`) and the scheme last applied to the root,
//! and exposes the resolver's operations so the application can read and
//! change the mode after it has taken over from the load-time routine.
//!
//! Switching schemes always removes the old class before adding the new
//! one, so exactly one scheme class stays on the root.

use std::rc::Rc;

use serde::Serialize;

use crate::options::ColorModeOptions;
use crate::scheme::ColorMode;
use crate::script::ColorModeScript;

/// Page-scoped color mode state and controls.
#[derive(Debug, Clone)]
pub struct ColorModeHandle {
    preference: String,
    value: String,
    script: Rc<ColorModeScript>,
}

/// Serializable view of a handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorModeSnapshot {
    pub preference: String,
    pub value: String,
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_attribute: Option<String>,
    pub forced: bool,
}

impl ColorModeHandle {
    pub(crate) fn new(script: Rc<ColorModeScript>, preference: String, value: String) -> Self {
        Self {
            preference,
            value,
            script,
        }
    }

    /// The raw preference: a scheme name or `"system"`.
    pub fn preference(&self) -> &str {
        &self.preference
    }

    /// The scheme currently applied to the root.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn options(&self) -> &ColorModeOptions {
        self.script.options()
    }

    pub fn script(&self) -> &ColorModeScript {
        &self.script
    }

    /// See [`ColorModeScript::get_color_scheme`].
    pub fn get_color_scheme(&self) -> String {
        self.script.get_color_scheme()
    }

    /// Adds a scheme class without touching [`value`](Self::value).
    pub fn add_color_scheme(&self, value: &str) {
        self.script.add_color_scheme(value)
    }

    /// Removes a scheme class without touching [`value`](Self::value).
    pub fn remove_color_scheme(&self, value: &str) {
        self.script.remove_color_scheme(value)
    }

    /// Switches the applied scheme: removes the current one, adds `value`,
    /// and records it.
    pub fn set_value(&mut self, value: &str) {
        if value == self.value {
            return;
        }
        self.script.remove_color_scheme(&self.value);
        self.script.add_color_scheme(value);
        tracing::debug!(from = %self.value, to = %value, "switched color mode");
        self.value = value.to_string();
    }

    /// Records `value` as applied without touching the root, for callers that
    /// already swapped the scheme with `remove_color_scheme` and
    /// `add_color_scheme`.
    pub fn record_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// Stores a new preference and applies the scheme it resolves to.
    ///
    /// A forced root attribute still wins over the new preference. An empty
    /// preference is never stored and acts as [`reset_preference`](Self::reset_preference).
    pub fn set_preference(&mut self, preference: &str) {
        if preference.is_empty() {
            self.reset_preference();
            return;
        }
        let options = self.script.options();
        self.script
            .host()
            .storage()
            .set(&options.storage_key, preference);
        let resolved = self.script.resolve_preference(preference);
        self.preference = preference.to_string();
        self.set_value(&resolved);
    }

    /// Clears the stored preference and falls back to the configured default.
    pub fn reset_preference(&mut self) {
        let options = self.script.options();
        self.script.host().storage().remove(&options.storage_key);
        let preference = options.preference.clone();
        let resolved = self.script.resolve_preference(&preference);
        self.preference = preference;
        self.set_value(&resolved);
    }

    /// Stores the opposite of the current known scheme as the preference.
    ///
    /// Returns `None`, changing nothing, when the current value is not a
    /// known scheme.
    pub fn toggle(&mut self) -> Option<ColorMode> {
        let next = self.value.parse::<ColorMode>().ok()?.toggled();
        self.set_preference(next.as_str());
        Some(next)
    }

    /// Whether the root's forced attribute is overriding the preference.
    pub fn is_forced(&self) -> bool {
        self.script.forced_color_mode().is_some()
    }

    pub fn snapshot(&self) -> ColorModeSnapshot {
        let options = self.script.options();
        ColorModeSnapshot {
            preference: self.preference.clone(),
            value: self.value.clone(),
            class_name: options.class_name(&self.value),
            data_attribute: options.data_attribute(),
            forced: self.is_forced(),
        }
    }
}
