//! Placeholder handling for MadLibs templates.
//!
//! A placeholder is a name wrapped in curly braces, e.g. `{noun}`. Templates
//! come back from the language model together with the list of placeholder
//! names they claim to use; [`check_placeholders`] verifies that claim and
//! [`fill`] substitutes user words into the template.

use crate::{Error, Result};

const OPEN: char = '{';
const CLOSE: char = '}';

/// Wrap a placeholder name in its markers.
pub fn marker(name: &str) -> String {
    format!("{}{}{}", OPEN, name, CLOSE)
}

/// Every marker-delimited token in `template`, in order of appearance.
///
/// A token is the non-empty run of characters between an opening brace and
/// the next closing brace. Empty markers (`{}`) are skipped.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len_utf8()..];
        match after_open.find(CLOSE) {
            Some(0) => rest = after_open,
            Some(close) => {
                found.push(after_open[..close].to_string());
                rest = &after_open[close + CLOSE.len_utf8()..];
            }
            None => break,
        }
    }

    found
}

/// Fails unless the placeholders embedded in `template` are exactly
/// `declared`, including order and duplicates.
pub fn check_placeholders(template: &str, declared: &[String]) -> Result<()> {
    let found = extract_placeholders(template);
    if found.as_slice() == declared {
        return Ok(());
    }

    tracing::error!(
        "Mismatch detected between words extracted ({:?}) and words needed ({:?})",
        found,
        declared
    );
    Err(Error::PlaceholderMismatch {
        declared: declared.to_vec(),
        found,
    })
}

/// Substitute `values` into `template`.
///
/// Each step replaces only the first remaining occurrence of
/// `{names[i]}` with `values[i]`, so a name repeated in the template is
/// consumed once per entry in `names`. Extra names or values are ignored
/// and leftover markers stay in the output.
pub fn fill<S: AsRef<str>>(template: &str, names: &[S], values: &[S]) -> String {
    let mut completed = template.to_string();

    for (name, value) in names.iter().zip(values) {
        let placeholder = marker(name.as_ref());
        completed = completed.replacen(&placeholder, value.as_ref(), 1);
    }

    completed
}
