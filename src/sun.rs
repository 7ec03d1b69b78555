//! The Source Unit Name: an opaque, unstructured identifier (spec §3, §9).
//!
//! A `SourceUnitName` is deliberately a thin wrapper around `String`. It is *not* a `PathBuf`:
//! wrapping it in a distinct nominal type stops accidental normalization, case-folding, or
//! separator translation from leaking in through a generic path API, which would silently break
//! the bit-for-bit reproducibility spec §1 requires.

use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

/// Literal source unit name used for the standard-input marker (spec §3, §4.B).
pub const STDIN_SUN: &str = "<stdin>";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceUnitName(String);

impl SourceUnitName {
    /// Wraps a raw string as a source unit name, performing no normalization whatsoever.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The stdin marker SUN, `<stdin>`.
    pub fn stdin() -> Self {
        Self::new(STDIN_SUN)
    }

    /// Borrows the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self, returning the underlying `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// True if this SUN begins with a `/`.
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// True if `self` starts with `prefix`, byte for byte.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for SourceUnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SourceUnitName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SourceUnitName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for SourceUnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SourceUnitName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
