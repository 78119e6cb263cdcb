//! Host abstractions for testability.
//!
//! The resolver touches exactly three host capabilities: a persistent
//! key-value store, media-query evaluation, and the document root element.
//! Each is a trait here, with real and mock implementations, so resolution
//! runs the same way in a browser, in a native process, and under test.
//!
//! All methods take `&self`. Hosts are single-threaded and implementations
//! that need mutation use interior mutability, the way DOM handles do.
//!
//! ```
//! use colormode::env::{HostParts, MemoryStorage, MockMedia, VirtualRoot};
//! use colormode::ColorMode;
//!
//! let host = HostParts::new(
//!     MemoryStorage::new(),
//!     MockMedia::prefers(ColorMode::Dark),
//!     VirtualRoot::new(),
//! );
//! ```

use std::rc::Rc;

mod media;
mod root;
mod storage;

pub use media::{
    detect_os_color_mode, set_os_detector, MediaQueryResult, MockMedia, OsMedia, NOT_ALL,
};
pub use root::VirtualRoot;
pub use storage::{FileStorage, MemoryStorage, NoStorage};

/// Persistent client-side key-value storage.
///
/// Reads and writes never fail from the caller's point of view. An
/// implementation that cannot reach its backing store reads `None` and drops
/// writes.
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

/// Media-query evaluation.
pub trait MediaMatcher {
    /// Evaluates `query`.
    ///
    /// Returns `None` when the host has no media-query capability at all.
    fn match_media(&self, query: &str) -> Option<MediaQueryResult>;
}

/// The document root element.
pub trait RootElement {
    /// Whether the element offers a class-list API. When it does not, classes
    /// are edited through [`class_name`](Self::class_name) and
    /// [`set_class_name`](Self::set_class_name).
    fn has_class_list(&self) -> bool;

    /// Adds a class through the class-list API. Adding a present class is a
    /// no-op.
    fn class_list_add(&self, class: &str);

    /// Removes a class through the class-list API.
    fn class_list_remove(&self, class: &str);

    /// The raw class attribute.
    fn class_name(&self) -> String;

    fn set_class_name(&self, value: &str);

    fn get_attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);
}

/// A host environment bundling the three capabilities.
pub trait Host {
    fn storage(&self) -> &dyn PreferenceStorage;

    fn media(&self) -> &dyn MediaMatcher;

    fn root(&self) -> &dyn RootElement;
}

/// A [`Host`] assembled from independent parts.
#[derive(Debug, Clone, Default)]
pub struct HostParts<S, M, R> {
    pub storage: S,
    pub media: M,
    pub root: R,
}

impl<S, M, R> HostParts<S, M, R>
where
    S: PreferenceStorage,
    M: MediaMatcher,
    R: RootElement,
{
    pub fn new(storage: S, media: M, root: R) -> Self {
        Self {
            storage,
            media,
            root,
        }
    }
}

impl<S, M, R> Host for HostParts<S, M, R>
where
    S: PreferenceStorage,
    M: MediaMatcher,
    R: RootElement,
{
    fn storage(&self) -> &dyn PreferenceStorage {
        &self.storage
    }

    fn media(&self) -> &dyn MediaMatcher {
        &self.media
    }

    fn root(&self) -> &dyn RootElement {
        &self.root
    }
}

// Shared handles let callers keep inspecting a part after handing a clone to
// the resolver.

impl<T: PreferenceStorage + ?Sized> PreferenceStorage for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: MediaMatcher + ?Sized> MediaMatcher for Rc<T> {
    fn match_media(&self, query: &str) -> Option<MediaQueryResult> {
        (**self).match_media(query)
    }
}

impl<T: RootElement + ?Sized> RootElement for Rc<T> {
    fn has_class_list(&self) -> bool {
        (**self).has_class_list()
    }

    fn class_list_add(&self, class: &str) {
        (**self).class_list_add(class)
    }

    fn class_list_remove(&self, class: &str) {
        (**self).class_list_remove(class)
    }

    fn class_name(&self) -> String {
        (**self).class_name()
    }

    fn set_class_name(&self, value: &str) {
        (**self).set_class_name(value)
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        (**self).get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        (**self).set_attribute(name, value)
    }

    fn remove_attribute(&self, name: &str) {
        (**self).remove_attribute(name)
    }
}
