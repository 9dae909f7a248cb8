//! Portico Page Behavior
//!
//! Controllers for the theme's front-end behavior: banner dismissal,
//! tab-gated map activation, mobile navigation, the search overlay,
//! portfolio filter bars, and sizing rules. Controllers never touch a
//! document; they emit surface patches the host page applies.

mod banner;
mod error;
mod filter;
mod layout;
mod map;
mod nav;
mod patch;
mod search;

pub use banner::{Banner, FlagStore, MemoryFlagStore, DISMISS_FLAG, DISMISS_TTL_DAYS, DISMISS_VALUE};
pub use error::PageError;
pub use filter::{masonry_column_width, FilterBar, FilterOption, FilterSelection};
pub use layout::{
    content_decorations, fixed_header_offset, fullheight_header, is_mobile_user_agent,
    map_wrapper_height, scroll_animation_class, PageEnv,
};
pub use map::{
    ContactTab, MapActivation, MapConfig, MapMount, MapPanel, MapPhase, MapStyleRule, MarkerIcon,
    NoopMount,
};
pub use nav::{NavState, SideNav};
pub use patch::{targets, PatchOp, SurfacePatch};
pub use search::{SearchOverlay, KEY_ESCAPE};

pub type Result<T> = std::result::Result<T, PageError>;
