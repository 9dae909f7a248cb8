//! Editor profile
//!
//! Everything the rich-text editor bootstrap needs, assembled up
//! front. The host hands the exported settings to the editor once at
//! initialization instead of letting scripts rewrite editor globals
//! after load.

use serde::{Deserialize, Serialize};

use crate::fonts::{default_font_sizes, FontSizeOption};
use crate::plugin::PluginSet;
use crate::policy::RemoveEmptyPolicy;

pub struct EditorProfile {
    /// Toolbar font size dropdown entries.
    pub font_sizes: Vec<FontSizeOption>,
    /// Which empty inline tags survive normalization.
    pub remove_empty: RemoveEmptyPolicy,
    /// Let authors keep arbitrary markup; the theme trusts its editors.
    pub allow_all_content: bool,
    /// Per-subsite class for the editing frame's body, when the host
    /// warrants one.
    pub body_class: Option<String>,
}

impl EditorProfile {
    pub fn new() -> Self {
        Self {
            font_sizes: default_font_sizes(),
            remove_empty: RemoveEmptyPolicy::new(),
            allow_all_content: true,
            body_class: None,
        }
    }

    /// Build a profile from defaults, then let every registered plugin
    /// contribute once.
    pub fn build(plugins: &PluginSet) -> Self {
        let mut profile = Self::new();
        plugins.apply(&mut profile);
        profile
    }

    /// Wire form for the editor bootstrap.
    pub fn settings(&self) -> EditorSettings {
        EditorSettings {
            font_size_options: FontSizeOption::format_list(&self.font_sizes),
            allow_all_content: self.allow_all_content,
            preserve_empty: self.remove_empty.preserved(),
            body_class: self.body_class.clone(),
        }
    }
}

impl Default for EditorProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized profile the host's editor bootstrap consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Packed `label/size;label/size` dropdown string.
    pub font_size_options: String,
    pub allow_all_content: bool,
    /// Tags excluded from empty-removal, sorted.
    pub preserve_empty: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_class: Option<String>,
}
