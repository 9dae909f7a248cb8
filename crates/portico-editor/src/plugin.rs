//! Editor plugins
//!
//! A plugin contributes configuration while the profile is built.
//! The profile is the only thing a plugin can touch, and each
//! registered plugin runs exactly once per build.

use crate::profile::EditorProfile;

pub trait EditorPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// Called once while the profile is built.
    fn on_load(&self, profile: &mut EditorProfile);
}

/// Ordered plugin registry; registration order is application order.
#[derive(Default)]
pub struct PluginSet {
    plugins: Vec<Box<dyn EditorPlugin>>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. A name collision keeps the first
    /// registration and drops the newcomer.
    pub fn register(&mut self, plugin: Box<dyn EditorPlugin>) {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            tracing::warn!(plugin = %plugin.name(), "Duplicate plugin registration skipped");
            return;
        }

        tracing::debug!(plugin = %plugin.name(), "Editor plugin registered");
        self.plugins.push(plugin);
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub(crate) fn apply(&self, profile: &mut EditorProfile) {
        for plugin in &self.plugins {
            plugin.on_load(profile);
        }
    }
}

/// Keeps empty inline hooks alive: icon glyphs ride on `<i>` and
/// styling hooks on `<span>`; the normalizer would otherwise delete
/// both the moment an author saves.
pub struct AllowEmptyInline;

impl EditorPlugin for AllowEmptyInline {
    fn name(&self) -> &str {
        "allow_empty_inline"
    }

    fn on_load(&self, profile: &mut EditorProfile) {
        profile.remove_empty.preserve("span");
        profile.remove_empty.preserve("i");
    }
}
