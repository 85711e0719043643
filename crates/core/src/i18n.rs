//! Translation tables for interface labels.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CoreError;

/// Language used when no preference is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Key → text table for one interface language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Text for `key`, or the key itself when it has no entry.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Translate every key, preserving order.
    pub fn apply<'a>(&'a self, keys: &'a [String]) -> Vec<(&'a str, &'a str)> {
        keys.iter().map(|k| (k.as_str(), self.text(k))).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Language codes end up in a URL path, so only `[A-Za-z0-9_-]` is allowed.
pub fn validate_language_code(code: &str) -> Result<(), CoreError> {
    let valid = !code.is_empty()
        && code.len() <= 16
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(CoreError::Validation(format!("Invalid language code: {code:?}")));
    }
    Ok(())
}
