//! `web-sys` implementations of the colormode host traits.
//!
//! Every browser call that can throw is treated as a missing capability:
//! storage blocked by privacy settings reads as empty, a missing
//! `matchMedia` makes detection fall back, and so on.

use colormode::env::{HostParts, MediaMatcher, MediaQueryResult, PreferenceStorage, RootElement};
use wasm_bindgen::JsValue;
use web_sys::{Element, Storage, Window};

use crate::error::WebError;

/// The browser host: `localStorage`, `matchMedia` and `<html>`.
pub type WebHost = HostParts<WebStorage, WebMedia, WebRoot>;

/// Binds a host to the current window.
pub fn web_host() -> Result<WebHost, WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let root = document
        .document_element()
        .ok_or(WebError::NoRootElement)?;

    Ok(HostParts::new(
        WebStorage::from_window(&window),
        WebMedia::new(window),
        WebRoot::new(root),
    ))
}

/// `window.localStorage`, if the page may use it.
#[derive(Debug, Clone)]
pub struct WebStorage {
    storage: Option<Storage>,
}

impl WebStorage {
    pub fn from_window(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::debug!("localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStorage for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.set_item(key, value) {
                tracing::warn!(key, error = ?err, "localStorage write failed");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            storage.remove_item(key).ok();
        }
    }
}

/// `window.matchMedia`.
#[derive(Debug, Clone)]
pub struct WebMedia {
    window: Window,
    available: bool,
}

impl WebMedia {
    pub fn new(window: Window) -> Self {
        let available = has_property(&window, "matchMedia");
        Self { window, available }
    }
}

impl MediaMatcher for WebMedia {
    fn match_media(&self, query: &str) -> Option<MediaQueryResult> {
        if !self.available {
            return None;
        }
        let list = self.window.match_media(query).ok().flatten()?;
        Some(MediaQueryResult::new(list.media(), list.matches()))
    }
}

/// The document root element.
#[derive(Debug, Clone)]
pub struct WebRoot {
    element: Element,
    class_list_api: bool,
}

impl WebRoot {
    pub fn new(element: Element) -> Self {
        let class_list_api = has_property(&element, "classList");
        Self {
            element,
            class_list_api,
        }
    }
}

impl RootElement for WebRoot {
    fn has_class_list(&self) -> bool {
        self.class_list_api
    }

    fn class_list_add(&self, class: &str) {
        if let Err(err) = self.element.class_list().add_1(class) {
            tracing::warn!(class, error = ?err, "cannot add root class");
        }
    }

    fn class_list_remove(&self, class: &str) {
        if let Err(err) = self.element.class_list().remove_1(class) {
            tracing::warn!(class, error = ?err, "cannot remove root class");
        }
    }

    fn class_name(&self) -> String {
        self.element.class_name()
    }

    fn set_class_name(&self, value: &str) {
        self.element.set_class_name(value);
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.element.set_attribute(name, value) {
            tracing::warn!(name, error = ?err, "cannot set root attribute");
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(err) = self.element.remove_attribute(name) {
            tracing::warn!(name, error = ?err, "cannot remove root attribute");
        }
    }
}

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}
