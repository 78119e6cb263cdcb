//! Preference resolution and application.
//!
//! [`ColorModeScript`] is the routine that runs once per page load, before
//! the application renders, so the first paint already carries the right
//! scheme:
//!
//! 1. Read the stored choice, or the configured default preference.
//! 2. If it is `"system"`, ask the host which scheme it prefers
//!    ([`get_color_scheme`](ColorModeScript::get_color_scheme)).
//! 3. A non-empty `data-color-mode-forced` attribute on the root overrides
//!    the result unconditionally.
//! 4. Add the scheme's class (and data attribute, if configured) to the root.
//! 5. Publish a [`ColorModeHandle`] for later reads and toggles.
//!
//! ```
//! use colormode::env::{HostParts, MemoryStorage, MockMedia, VirtualRoot};
//! use colormode::{ColorMode, ColorModeOptions, ColorModeScript};
//!
//! let host = HostParts::new(
//!     MemoryStorage::new(),
//!     MockMedia::prefers(ColorMode::Dark),
//!     VirtualRoot::new(),
//! );
//! let script = ColorModeScript::new(ColorModeOptions::default(), host).unwrap();
//! let handle = script.resolve();
//!
//! assert_eq!(handle.preference(), "system");
//! assert_eq!(handle.value(), "dark");
//! ```

use std::fmt;
use std::rc::Rc;

use crate::class_list;
use crate::env::Host;
use crate::error::ConfigError;
use crate::handle::ColorModeHandle;
use crate::options::ColorModeOptions;
use crate::registry::{self, SharedHandle};
use crate::scheme::{ColorMode, SYSTEM_PREFERENCE};

/// Root attribute whose non-empty value overrides every other source.
pub const FORCED_ATTRIBUTE: &str = "data-color-mode-forced";

/// Probe for the `prefers-color-scheme` feature as a whole.
pub(crate) const SCHEME_FEATURE_QUERY: &str = "(prefers-color-scheme)";

/// The resolver, bound to its options and host.
pub struct ColorModeScript {
    options: ColorModeOptions,
    host: Box<dyn Host>,
}

impl fmt::Debug for ColorModeScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorModeScript")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ColorModeScript {
    /// Validates `options` and binds them to `host`.
    pub fn new(options: ColorModeOptions, host: impl Host + 'static) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            host: Box::new(host),
        })
    }

    pub fn options(&self) -> &ColorModeOptions {
        &self.options
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    /// The scheme the host reports as preferred.
    ///
    /// Returns the configured fallback when media queries are unavailable,
    /// when the host does not know `prefers-color-scheme`, or when neither
    /// known scheme matches. Dark is checked before light.
    pub fn get_color_scheme(&self) -> String {
        let media = self.host.media();
        let supported = media
            .match_media(SCHEME_FEATURE_QUERY)
            .is_some_and(|feature| !feature.is_not_all());

        if supported {
            for mode in ColorMode::KNOWN {
                if media
                    .match_media(&mode.media_query())
                    .is_some_and(|result| result.matches)
                {
                    return mode.as_str().to_string();
                }
            }
        }

        tracing::trace!(supported, fallback = %self.options.fallback, "no system scheme, using fallback");
        self.options.fallback.clone()
    }

    /// Adds the class for `value` to the root and sets the data attribute
    /// when one is configured.
    pub fn add_color_scheme(&self, value: &str) {
        let root = self.host.root();
        let class_name = self.options.class_name(value);
        if root.has_class_list() {
            root.class_list_add(&class_name);
        } else {
            root.set_class_name(&class_list::append_token(&root.class_name(), &class_name));
        }
        if let Some(attribute) = self.options.data_attribute() {
            root.set_attribute(&attribute, value);
        }
    }

    /// Removes the class for `value` from the root and drops the data
    /// attribute whatever its current value.
    pub fn remove_color_scheme(&self, value: &str) {
        let root = self.host.root();
        let class_name = self.options.class_name(value);
        if root.has_class_list() {
            root.class_list_remove(&class_name);
        } else {
            root.set_class_name(&class_list::remove_token(&root.class_name(), &class_name));
        }
        if let Some(attribute) = self.options.data_attribute() {
            root.remove_attribute(&attribute);
        }
    }

    /// The stored choice, or the configured default when nothing (or an
    /// empty string) is stored.
    pub fn stored_preference(&self) -> String {
        match self.host.storage().get(&self.options.storage_key) {
            Some(stored) if !stored.is_empty() => stored,
            _ => self.options.preference.clone(),
        }
    }

    /// The forced scheme from the root, if any.
    pub fn forced_color_mode(&self) -> Option<String> {
        self.host
            .root()
            .get_attribute(FORCED_ATTRIBUTE)
            .filter(|forced| !forced.is_empty())
    }

    /// Turns a preference into the scheme to apply.
    pub fn resolve_preference(&self, preference: &str) -> String {
        if let Some(forced) = self.forced_color_mode() {
            tracing::debug!(%forced, "color mode forced by root attribute");
            return forced;
        }
        if preference == SYSTEM_PREFERENCE {
            self.get_color_scheme()
        } else {
            preference.to_string()
        }
    }

    /// Runs initial resolution and applies the result to the root, without
    /// publishing the handle.
    pub fn resolve(self) -> ColorModeHandle {
        let preference = self.stored_preference();
        let value = self.resolve_preference(&preference);
        self.add_color_scheme(&value);
        tracing::debug!(%preference, %value, "applied initial color mode");
        ColorModeHandle::new(Rc::new(self), preference, value)
    }

    /// Runs initial resolution and publishes the handle under the configured
    /// global name.
    pub fn run(self) -> SharedHandle {
        let name = self.options.global_name.clone();
        registry::publish(&name, self.resolve())
    }
}
