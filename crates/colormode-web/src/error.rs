//! Error types for browser setup.

use colormode::ConfigError;
use wasm_bindgen::JsValue;

/// Errors raised while binding colormode to the page.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("No global window (not running in a browser main thread)")]
    NoWindow,

    #[error("Window has no document")]
    NoDocument,

    #[error("Document has no root element")]
    NoRootElement,

    /// The options object could not be read.
    #[error("Invalid color mode options: {0}")]
    Options(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Publishing the global object failed.
    #[error("Cannot publish '{name}' on window")]
    Publish { name: String },
}

impl From<serde_wasm_bindgen::Error> for WebError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        WebError::Options(err.to_string())
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
