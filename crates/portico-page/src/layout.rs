//! Sizing and load-time rules
//!
//! Pure functions over a measured snapshot of the page. A missing
//! measurement produces no patch; the host applies whatever comes
//! back and moves on. On resize the host takes fresh measurements and
//! asks again, so sizes never go stale.

use serde::{Deserialize, Serialize};

use crate::patch::{targets, SurfacePatch};

/// User-agent substrings that mark a mobile device.
const MOBILE_UA_MARKERS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Measurements the host takes before asking for layout patches.
/// Everything is optional; pages without a given element simply leave
/// its field unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageEnv {
    pub viewport_height: Option<f64>,
    pub scroll_top: Option<f64>,
    pub document_height: Option<f64>,
    pub user_agent: Option<String>,
    /// Outer height of the contact details panel.
    pub contact_panel_height: Option<f64>,
    /// Outer height of the sticky header variant, when the page uses it.
    pub fixed_header_height: Option<f64>,
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let user_agent = user_agent.to_ascii_lowercase();
    MOBILE_UA_MARKERS
        .iter()
        .any(|marker| user_agent.contains(marker))
}

/// Stretch the landing header to the viewport, except on mobile where
/// browser chrome makes viewport heights lie.
pub fn fullheight_header(env: &PageEnv) -> Vec<SurfacePatch> {
    let mobile = env
        .user_agent
        .as_deref()
        .map(is_mobile_user_agent)
        .unwrap_or(false);
    if mobile {
        return Vec::new();
    }

    match env.viewport_height {
        Some(height) => vec![SurfacePatch::set_height(targets::HEADER_FULLHEIGHT, height)],
        None => Vec::new(),
    }
}

/// The map wrapper mirrors the contact panel's height so the two tab
/// panes line up.
pub fn map_wrapper_height(env: &PageEnv) -> Vec<SurfacePatch> {
    match env.contact_panel_height {
        Some(height) => vec![SurfacePatch::set_height(targets::MAP_WRAPPER, height)],
        None => Vec::new(),
    }
}

/// Pages with the sticky header push the body down by its height so
/// content starts below the bar.
pub fn fixed_header_offset(env: &PageEnv) -> Vec<SurfacePatch> {
    match env.fixed_header_height {
        Some(height) => vec![SurfacePatch::set_padding_top(targets::BODY, height)],
        None => Vec::new(),
    }
}

/// Entrance animation on the top bar: armed at the very top of the
/// page, dropped at the very bottom, untouched anywhere between.
pub fn scroll_animation_class(env: &PageEnv) -> Vec<SurfacePatch> {
    let scroll_top = match env.scroll_top {
        Some(v) => v,
        None => return Vec::new(),
    };

    if scroll_top == 0.0 {
        return vec![SurfacePatch::add_class(targets::NAVBAR_FIXED, "wow")];
    }

    if let (Some(viewport), Some(document)) = (env.viewport_height, env.document_height) {
        if viewport + scroll_top == document {
            return vec![SurfacePatch::remove_class(targets::NAVBAR_FIXED, "wow")];
        }
    }

    Vec::new()
}

/// Classes authored content never carries but the stylesheet expects.
/// Emitted once during the ready phase.
pub fn content_decorations() -> Vec<SurfacePatch> {
    vec![
        SurfacePatch::add_class(targets::CONTENT_TABLES, "table"),
        SurfacePatch::add_class(targets::CONTENT_DLS, "dl-horizontal"),
    ]
}
