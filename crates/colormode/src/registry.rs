//! Page-scoped registry of published handles.
//!
//! The load-time routine publishes its [`ColorModeHandle`] under the
//! configured global name; application code later looks it up by that name.
//! The registry is thread-local: a page runs on a single thread, and browser
//! handles cannot cross threads anyway.
//!
//! ```
//! use colormode::registry;
//! # use colormode::env::{HostParts, NoStorage, MockMedia, VirtualRoot};
//! # use colormode::{ColorModeOptions, ColorModeScript};
//! # let host = HostParts::new(NoStorage, MockMedia::new(), VirtualRoot::new());
//! # ColorModeScript::new(ColorModeOptions::default(), host).unwrap().run();
//!
//! let handle = registry::lookup("__NUXT_COLOR_MODE__").unwrap();
//! handle.borrow_mut().set_value("dark");
//!
//! // On navigation the page's handle goes away.
//! registry::discard("__NUXT_COLOR_MODE__");
//! assert!(registry::lookup("__NUXT_COLOR_MODE__").is_none());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::handle::ColorModeHandle;

/// A published handle, shared between the registry and its users.
pub type SharedHandle = Rc<RefCell<ColorModeHandle>>;

thread_local! {
    static HANDLES: RefCell<HashMap<String, SharedHandle>> = RefCell::new(HashMap::new());
}

/// Publishes `handle` under `name`, replacing any handle already there.
pub fn publish(name: &str, handle: ColorModeHandle) -> SharedHandle {
    let shared = Rc::new(RefCell::new(handle));
    let previous = HANDLES.with(|handles| {
        handles
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&shared))
    });
    if previous.is_some() {
        tracing::warn!(name, "replaced an already published color mode handle");
    } else {
        tracing::debug!(name, "published color mode handle");
    }
    shared
}

pub fn lookup(name: &str) -> Option<SharedHandle> {
    HANDLES.with(|handles| handles.borrow().get(name).cloned())
}

/// Removes the handle published under `name`, returning it.
pub fn discard(name: &str) -> Option<SharedHandle> {
    HANDLES.with(|handles| handles.borrow_mut().remove(name))
}

/// Names with a published handle, sorted.
pub fn published_names() -> Vec<String> {
    let mut names: Vec<String> = HANDLES.with(|handles| handles.borrow().keys().cloned().collect());
    names.sort();
    names
}
