//! Symbol — opaque case-insensitive instrument identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical uppercase symbol (e.g. "RELIANCE").
///
/// Canonicalization happens at construction, so two `Symbol`s compare equal
/// exactly when they name the same instrument, whatever casing the caller or
/// the filesystem used.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Self {
        Symbol(raw.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(raw: &str) -> Self {
        Symbol::new(raw)
    }
}
