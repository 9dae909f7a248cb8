//! Empty-tag removal policy
//!
//! The editor's normalizer strips inline elements left without
//! content. Icon glyphs and styling hooks live in exactly such
//! elements, so the policy carves out exceptions. This is an explicit
//! configuration object handed to the editor bootstrap, not a shared
//! registry scripts mutate after load.

use std::collections::BTreeMap;

/// Inline elements the editor strips when empty, by default.
const REMOVABLE_WHEN_EMPTY: &[&str] = &[
    "abbr", "acronym", "b", "bdi", "bdo", "big", "cite", "code", "del", "dfn", "em", "font", "i",
    "ins", "kbd", "label", "mark", "meter", "output", "q", "ruby", "s", "samp", "small", "span",
    "strike", "strong", "sub", "sup", "time", "tt", "u", "var",
];

#[derive(Debug, Clone)]
pub struct RemoveEmptyPolicy {
    /// tag -> removable; only default-listed tags appear
    removable: BTreeMap<String, bool>,
}

impl RemoveEmptyPolicy {
    pub fn new() -> Self {
        Self {
            removable: REMOVABLE_WHEN_EMPTY
                .iter()
                .map(|tag| (tag.to_string(), true))
                .collect(),
        }
    }

    /// Keep `tag` alive when empty. Tags outside the removal list are
    /// never removed anyway; asking for one is recorded and skipped.
    pub fn preserve(&mut self, tag: &str) {
        let tag = tag.to_ascii_lowercase();

        match self.removable.get_mut(&tag) {
            Some(removable) => {
                *removable = false;
                tracing::debug!(tag = %tag, "Tag preserved when empty");
            }
            None => {
                tracing::debug!(tag = %tag, "Tag is not empty-removable, nothing to preserve");
            }
        }
    }

    /// Whether the normalizer may strip an empty `tag`. Unknown tags
    /// are never removable.
    pub fn is_removable(&self, tag: &str) -> bool {
        self.removable
            .get(&tag.to_ascii_lowercase())
            .copied()
            .unwrap_or(false)
    }

    /// The exception list the editor bootstrap consumes, sorted.
    pub fn preserved(&self) -> Vec<String> {
        self.removable
            .iter()
            .filter(|(_, &removable)| !removable)
            .map(|(tag, _)| tag.clone())
            .collect()
    }
}

impl Default for RemoveEmptyPolicy {
    fn default() -> Self {
        Self::new()
    }
}
