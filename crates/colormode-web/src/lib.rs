//! Browser binding for `colormode`.
//!
//! Call [`init_color_mode`] (exported to JavaScript as `initColorMode`) from
//! a module that loads before the application renders:
//!
//! ```js
//! import init, { initColorMode } from "./colormode_web.js";
//! await init();
//! initColorMode({ dataValue: "theme" });
//! window.__NUXT_COLOR_MODE__.value; // "dark"
//! ```
//!
//! The published object has the shape
//! `{ preference, value, getColorScheme, addColorScheme, removeColorScheme }`.
//! `preference` and `value` are accessors over the same handle Rust code
//! reaches through [`colormode::registry`], so both sides see one state.
//! Assigning `value` records it without touching the root.

mod error;
mod host;

use std::rc::Rc;

use colormode::{ColorModeOptions, ColorModeScript, SharedHandle};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

pub use error::WebError;
pub use host::{web_host, WebHost, WebMedia, WebRoot, WebStorage};

/// Resolves and applies the color mode, then publishes the JavaScript global.
///
/// `options` is a plain object using the camelCase option keys. `undefined`
/// or `null` selects the defaults.
#[wasm_bindgen(js_name = initColorMode)]
pub fn init_color_mode(options: JsValue) -> Result<(), JsValue> {
    let options = if options.is_undefined() || options.is_null() {
        ColorModeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(WebError::from)?
    };
    install(options)?;
    Ok(())
}

/// Rust entry point behind [`init_color_mode`].
pub fn install(options: ColorModeOptions) -> Result<SharedHandle, WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let name = options.global_name.clone();
    let shared = ColorModeScript::new(options, web_host()?)?.run();

    let global = global_object(&shared).map_err(|_| WebError::Publish { name: name.clone() })?;
    Reflect::set(&window, &JsValue::from_str(&name), &global)
        .map_err(|_| WebError::Publish { name: name.clone() })?;
    tracing::debug!(%name, "published color mode global");

    Ok(shared)
}

fn global_object(shared: &SharedHandle) -> Result<Object, JsValue> {
    let global = Object::new();

    let handle = Rc::clone(shared);
    let get_preference = Closure::wrap(
        Box::new(move || handle.borrow().preference().to_string()) as Box<dyn Fn() -> String>
    );
    define_accessor(&global, "preference", get_preference.as_ref(), None)?;
    get_preference.forget();

    let handle = Rc::clone(shared);
    let get_value = Closure::wrap(
        Box::new(move || handle.borrow().value().to_string()) as Box<dyn Fn() -> String>
    );
    // Assigning `value` records it, the caller having already swapped the
    // classes with removeColorScheme/addColorScheme.
    let handle = Rc::clone(shared);
    let set_value = Closure::wrap(Box::new(move |value: String| {
        handle.borrow_mut().record_value(&value)
    }) as Box<dyn Fn(String)>);
    define_accessor(&global, "value", get_value.as_ref(), Some(set_value.as_ref()))?;
    get_value.forget();
    set_value.forget();

    let handle = Rc::clone(shared);
    let get_color_scheme = Closure::wrap(
        Box::new(move || handle.borrow().get_color_scheme()) as Box<dyn Fn() -> String>
    );
    Reflect::set(
        &global,
        &"getColorScheme".into(),
        get_color_scheme.as_ref().unchecked_ref(),
    )?;
    get_color_scheme.forget();

    let handle = Rc::clone(shared);
    let add_color_scheme = Closure::wrap(Box::new(move |value: String| {
        handle.borrow().add_color_scheme(&value)
    }) as Box<dyn Fn(String)>);
    Reflect::set(
        &global,
        &"addColorScheme".into(),
        add_color_scheme.as_ref().unchecked_ref(),
    )?;
    add_color_scheme.forget();

    let handle = Rc::clone(shared);
    let remove_color_scheme = Closure::wrap(Box::new(move |value: String| {
        handle.borrow().remove_color_scheme(&value)
    }) as Box<dyn Fn(String)>);
    Reflect::set(
        &global,
        &"removeColorScheme".into(),
        remove_color_scheme.as_ref().unchecked_ref(),
    )?;
    remove_color_scheme.forget();

    Ok(global)
}

/// Defines `name` on `target` as an enumerable accessor property.
fn define_accessor(
    target: &Object,
    name: &str,
    getter: &JsValue,
    setter: Option<&JsValue>,
) -> Result<(), JsValue> {
    let descriptor = Object::new();
    Reflect::set(&descriptor, &"get".into(), getter)?;
    if let Some(setter) = setter {
        Reflect::set(&descriptor, &"set".into(), setter)?;
    }
    Reflect::set(&descriptor, &"enumerable".into(), &JsValue::TRUE)?;
    Object::define_property(target, &JsValue::from_str(name), &descriptor);
    Ok(())
}
