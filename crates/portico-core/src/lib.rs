//! Portico Core
//!
//! Central coordination layer for the Portico theme runtime.
//! Rust owns all state; the host page is a stateless surface.

mod config;
mod error;
mod session;

pub use config::ThemeConfig;
pub use error::CoreError;
pub use session::PageSession;

// Re-export core components
pub use portico_editor::{
    body_class_for_host, default_font_sizes, AllowEmptyInline, EditorError, EditorPlugin,
    EditorProfile, EditorSettings, FontSizeOption, PluginSet, RemoveEmptyPolicy,
    DEFAULT_FONT_SIZES,
};
pub use portico_page::{
    content_decorations, fixed_header_offset, fullheight_header, is_mobile_user_agent,
    map_wrapper_height, masonry_column_width, scroll_animation_class, targets, Banner, ContactTab,
    FilterBar, FilterOption, FilterSelection, FlagStore, MapActivation, MapConfig, MapMount,
    MapPanel, MapPhase, MapStyleRule, MarkerIcon, MemoryFlagStore, NavState, NoopMount, PageEnv,
    PageError, PatchOp, SearchOverlay, SideNav, SurfacePatch, DISMISS_FLAG, DISMISS_TTL_DAYS,
    DISMISS_VALUE, KEY_ESCAPE,
};
pub use portico_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
