//! In-memory document root.

use std::cell::RefCell;

use super::RootElement;
use crate::class_list;

const CLASS_ATTRIBUTE: &str = "class";

/// An in-memory stand-in for the document root element.
///
/// Useful in tests and for server-side rendering, where the resolved classes
/// and attributes are written into the `<html>` tag with
/// [`to_html_attributes`](Self::to_html_attributes).
#[derive(Debug)]
pub struct VirtualRoot {
    class_list_api: bool,
    // Insertion order is kept so rendered attributes are stable.
    attributes: RefCell<Vec<(String, String)>>,
}

impl Default for VirtualRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualRoot {
    /// An empty root with a class-list API.
    pub fn new() -> Self {
        Self {
            class_list_api: true,
            attributes: RefCell::new(Vec::new()),
        }
    }

    /// Drops the class-list API so classes are edited as a string.
    pub fn without_class_list(mut self) -> Self {
        self.class_list_api = false;
        self
    }

    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value): (String, String) = (name.into(), value.into());
        self.set_attribute(&name, &value);
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        let class: String = class.into();
        self.set_class_name(&class);
        self
    }

    /// The class tokens currently on the element.
    pub fn classes(&self) -> Vec<String> {
        class_list::tokens(&self.class_name())
            .map(str::to_string)
            .collect()
    }

    pub fn has_class(&self, class: &str) -> bool {
        class_list::contains_token(&self.class_name(), class)
    }

    /// Renders the attributes as they would appear inside an HTML start tag,
    /// e.g. `class="dark-mode" data-theme="dark"`.
    pub fn to_html_attributes(&self) -> String {
        self.attributes
            .borrow()
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, escape_attribute(value)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl RootElement for VirtualRoot {
    fn has_class_list(&self) -> bool {
        self.class_list_api
    }

    fn class_list_add(&self, class: &str) {
        let current = self.class_name();
        if class_list::contains_token(&current, class) {
            return;
        }
        let mut tokens: Vec<&str> = class_list::tokens(&current).collect();
        tokens.push(class);
        self.set_class_name(&tokens.join(" "));
    }

    fn class_list_remove(&self, class: &str) {
        let current = self.class_name();
        self.set_class_name(&class_list::remove_token(&current, class));
    }

    fn class_name(&self) -> String {
        self.get_attribute(CLASS_ATTRIBUTE).unwrap_or_default()
    }

    fn set_class_name(&self, value: &str) {
        self.set_attribute(CLASS_ATTRIBUTE, value);
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut attributes = self.attributes.borrow_mut();
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.attributes.borrow_mut().retain(|(n, _)| n != name);
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}
