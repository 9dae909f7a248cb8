//! Surface patches
//!
//! Controllers describe document mutations as data; the host page
//! applies them verbatim. Patches are write-only instructions, not a
//! document model: the narrow op set below is everything the theme
//! ever does to an element.

use serde::{Deserialize, Serialize};

/// Selectors the theme's markup must provide.
///
/// Controllers only address these elements, never create them. A
/// patch against an element the page lacks is a host-side no-op.
pub mod targets {
    /// Promotional banner block.
    pub const COUPON_BLOCK: &str = ".coupon-block";
    /// Close control inside the banner.
    pub const COUPON_CLOSE: &str = ".close-coupon";
    /// Map widget container.
    pub const MAP_WRAPPER: &str = "#mapwrapper";
    /// Tab group owning the map panel.
    pub const CONTACT_TABS: &str = "#contact-tabs";
    /// Contact details panel; its height drives the map wrapper.
    pub const CONTACT_INNER: &str = "#contact-inner";
    /// Mobile navigation trigger.
    pub const SIDE_MENU_TOGGLE: &str = "#side-menu-toggle";
    /// Glyph inside the trigger.
    pub const SIDE_MENU_ICON: &str = "#side-menu-toggle i";
    /// Off-canvas navigation panel.
    pub const SIDE_WRAPPER: &str = "#side-wrapper";
    /// Full-screen search overlay.
    pub const SEARCH_WRAPPER: &str = "#search-wrapper";
    /// Input inside the search overlay.
    pub const SEARCH_INPUT: &str = "#search-wrapper > form > input[type=\"search\"]";
    /// Fixed top navigation bar.
    pub const NAVBAR_FIXED: &str = ".navbar-fixed-top";
    /// Full-height landing header.
    pub const HEADER_FULLHEIGHT: &str = "#headerwrap.fullheight";
    /// Document body.
    pub const BODY: &str = "body";
    /// Tables inside authored content.
    pub const CONTENT_TABLES: &str = ".entry-content table, #post-content table";
    /// Definition lists inside authored content.
    pub const CONTENT_DLS: &str = ".entry-content dl, #post-content dl";
}

/// One document mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PatchOp {
    AddClass { class: String },
    RemoveClass { class: String },
    Show,
    Hide,
    SetHeight { px: f64 },
    SetPaddingTop { px: f64 },
    Focus,
}

/// A mutation aimed at a selector target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePatch {
    pub target: String,
    #[serde(flatten)]
    pub op: PatchOp,
}

impl SurfacePatch {
    pub fn add_class(target: &str, class: &str) -> Self {
        Self {
            target: target.to_string(),
            op: PatchOp::AddClass {
                class: class.to_string(),
            },
        }
    }

    pub fn remove_class(target: &str, class: &str) -> Self {
        Self {
            target: target.to_string(),
            op: PatchOp::RemoveClass {
                class: class.to_string(),
            },
        }
    }

    pub fn show(target: &str) -> Self {
        Self {
            target: target.to_string(),
            op: PatchOp::Show,
        }
    }

    pub fn hide(target: &str) -> Self {
        Self {
            target: target.to_string(),
            op: PatchOp::Hide,
        }
    }

    pub fn set_height(target: &str, px: f64) -> Self {
        Self {
            target: target.to_string(),
            op: PatchOp::SetHeight { px },
        }
    }

    pub fn set_padding_top(target: &str, px: f64) -> Self {
        Self {
            target: target.to_string(),
            op: PatchOp::SetPaddingTop { px },
        }
    }

    pub fn focus(target: &str) -> Self {
        Self {
            target: target.to_string(),
            op: PatchOp::Focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_wire_shape() {
        let patch = SurfacePatch::add_class(targets::CONTACT_TABS, "map-open");
        let json = serde_json::to_value(&patch).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "target": "#contact-tabs",
                "op": "add_class",
                "class": "map-open"
            })
        );
    }

    #[test]
    fn test_unit_op_wire_shape() {
        let patch = SurfacePatch::hide(targets::COUPON_BLOCK);
        let json = serde_json::to_value(&patch).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "target": ".coupon-block",
                "op": "hide"
            })
        );
    }

    #[test]
    fn test_patch_roundtrip() {
        let patch = SurfacePatch::set_height(targets::HEADER_FULLHEIGHT, 768.0);
        let json = serde_json::to_string(&patch).unwrap();
        let back: SurfacePatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patch);
    }
}
