//! Portico Editor Profile
//!
//! Configuration the rich-text editor receives at initialization:
//! which empty inline tags survive normalization, the font size
//! toolbar entries, and the per-subsite body class. Built once as an
//! explicit object; nothing here mutates editor globals.

mod error;
mod fonts;
mod host;
mod plugin;
mod policy;
mod profile;

pub use error::EditorError;
pub use fonts::{default_font_sizes, FontSizeOption, DEFAULT_FONT_SIZES};
pub use host::body_class_for_host;
pub use plugin::{AllowEmptyInline, EditorPlugin, PluginSet};
pub use policy::RemoveEmptyPolicy;
pub use profile::{EditorProfile, EditorSettings};

pub type Result<T> = std::result::Result<T, EditorError>;
