//! OS-keyed remediation text.

use std::collections::BTreeMap;

use super::os::Os;

/// Remediation suggestions keyed by operating system.
///
/// Lookups fall back to the [`Os::Generic`] entry when no OS-specific text
/// exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    entries: BTreeMap<Os, String>,
}

impl Suggestions {
    /// An empty suggestion map.
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding only a generic suggestion.
    pub fn generic(text: impl Into<String>) -> Self {
        Self::new().with(Os::Generic, text)
    }

    /// Add or replace the suggestion for `os`.
    pub fn with(mut self, os: Os, text: impl Into<String>) -> Self {
        self.entries.insert(os, text.into());
        self
    }

    /// Suggestion for `os`, falling back to the generic entry.
    pub fn for_os(&self, os: Os) -> Option<&str> {
        self.entries
            .get(&os)
            .or_else(|| self.entries.get(&Os::Generic))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
