//! The ordered placeholder substitution table.

use crate::key::Placeholder;

/// One protected fragment: the placeholder standing in for it and the text
/// it restores to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Substitution {
    /// The placeholder written into the working phrase.
    pub key: String,
    /// The text the placeholder restores to.
    pub replacement: String,
}

/// Placeholder substitutions in registration order.
///
/// Earlier entries are tried first during restoration. Entries are never
/// removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstitutionTable {
    entries: Vec<Substitution>,
}

impl SubstitutionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a substitution.
    pub fn push(&mut self, key: &Placeholder, replacement: impl Into<String>) {
        self.entries.push(Substitution {
            key: key.as_str().to_string(),
            replacement: replacement.into(),
        });
    }

    /// Returns the entries in registration order.
    pub fn entries(&self) -> &[Substitution] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been protected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies every entry once, in order, to `text`.
    pub fn apply(&self, text: &str) -> String {
        self.entries.iter().fold(text.to_string(), |acc, entry| {
            if acc.contains(&entry.key) {
                acc.replace(&entry.key, &entry.replacement)
            } else {
                acc
            }
        })
    }

    /// Returns the earliest-registered entry whose key occurs in `text`.
    pub fn first_match(&self, text: &str) -> Option<&Substitution> {
        self.entries.iter().find(|entry| text.contains(&entry.key))
    }
}
