//! # Colormode - flash-free dark/light mode for web document roots
//!
//! `colormode` decides which color scheme a page should show and writes it to
//! the document root before the application renders, so users never see a
//! flash of the wrong theme. Afterwards it hands the application a small
//! handle to read and change the mode.
//!
//! ## Resolution
//!
//! ```text
//! stored choice ── absent ──▶ configured preference
//!      │                              │
//!      └──────────────┬───────────────┘
//!                     ▼
//!              "system"? ── yes ──▶ prefers-color-scheme (dark, then light)
//!                     │                       │ unsupported / no match
//!                     │                       ▼
//!                     │                   fallback
//!                     ▼
//!        data-color-mode-forced on root? ── yes ──▶ forced value
//!                     ▼
//!          class  <prefix><scheme><suffix>   (+ data-<dataValue>="<scheme>")
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use colormode::env::{HostParts, MemoryStorage, MockMedia, VirtualRoot};
//! use colormode::{registry, ColorMode, ColorModeOptions, ColorModeScript};
//! use std::rc::Rc;
//!
//! let root = Rc::new(VirtualRoot::new());
//! let host = HostParts::new(
//!     MemoryStorage::new(),
//!     MockMedia::prefers(ColorMode::Dark),
//!     Rc::clone(&root),
//! );
//! let options = ColorModeOptions::new().data_value("theme");
//!
//! ColorModeScript::new(options, host).unwrap().run();
//! assert_eq!(root.to_html_attributes(), r#"class="dark-mode" data-theme="dark""#);
//!
//! let handle = registry::lookup("__NUXT_COLOR_MODE__").unwrap();
//! handle.borrow_mut().set_preference("light");
//! assert_eq!(root.to_html_attributes(), r#"class="light-mode" data-theme="light""#);
//! ```
//!
//! ## Hosts
//!
//! The resolver only sees the [`env::Host`] traits. This crate ships an
//! in-memory root and storage, JSON file storage, and an OS-backed media
//! matcher; the `colormode-web` crate binds the same traits to the browser.
//!
//! ## Modules
//!
//! - [`options`]: configuration and YAML/JSON loading
//! - [`scheme`]: known schemes and preferences
//! - [`env`]: host capability traits and implementations
//! - [`class_list`]: string editing of class attributes
//! - [`script`]: the resolver
//! - [`handle`]: the runtime handle
//! - [`registry`]: page-scoped handle lookup

pub mod class_list;
pub mod env;
mod error;
pub mod handle;
pub mod options;
pub mod registry;
pub mod scheme;
pub mod script;

pub use error::ConfigError;
pub use handle::{ColorModeHandle, ColorModeSnapshot};
pub use options::ColorModeOptions;
pub use registry::SharedHandle;
pub use scheme::{ColorMode, Preference, UnknownScheme, SYSTEM_PREFERENCE};
pub use script::{ColorModeScript, FORCED_ATTRIBUTE};
