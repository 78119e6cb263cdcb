//! Token editing for space-separated class attributes.
//!
//! Used when the root element has no class-list API and the class attribute
//! must be edited as a string. Removal works on whole tokens: removing
//! `dark-mode` leaves `very-dark-mode` alone.

/// Iterates the whitespace-separated tokens of a class attribute.
pub fn tokens(class_attr: &str) -> impl Iterator<Item = &str> {
    class_attr.split_ascii_whitespace()
}

pub fn contains_token(class_attr: &str, token: &str) -> bool {
    tokens(class_attr).any(|t| t == token)
}

/// Appends `token` after a single space.
///
/// Does not check for an existing copy of the token; the attribute may end
/// up holding duplicates, all of which [`remove_token`] removes.
pub fn append_token(class_attr: &str, token: &str) -> String {
    let mut out = String::with_capacity(class_attr.len() + token.len() + 1);
    out.push_str(class_attr);
    out.push(' ');
    out.push_str(token);
    out
}

/// Removes every token exactly equal to `token` and rejoins the rest with
/// single spaces.
pub fn remove_token(class_attr: &str, token: &str) -> String {
    tokens(class_attr)
        .filter(|t| *t != token)
        .collect::<Vec<_>>()
        .join(" ")
}
