//! Full-screen search overlay

use crate::patch::{targets, SurfacePatch};

/// Key code that closes the overlay.
pub const KEY_ESCAPE: u32 = 27;

/// Search overlay controller. Opening puts the caret in the search
/// input; Escape or the close control dismisses the overlay.
pub struct SearchOverlay {
    open: bool,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the overlay and focus its input. Opening an overlay that
    /// is already open re-emits the focus only.
    pub fn open(&mut self) -> Vec<SurfacePatch> {
        let mut patches = Vec::new();

        if !self.open {
            self.open = true;
            tracing::debug!("Search overlay opened");
            patches.push(SurfacePatch::add_class(targets::SEARCH_WRAPPER, "open"));
        }

        patches.push(SurfacePatch::focus(targets::SEARCH_INPUT));
        patches
    }

    pub fn close(&mut self) -> Vec<SurfacePatch> {
        if !self.open {
            return Vec::new();
        }

        self.open = false;
        tracing::debug!("Search overlay closed");
        vec![SurfacePatch::remove_class(targets::SEARCH_WRAPPER, "open")]
    }

    /// Key press while the overlay has focus; Escape closes it.
    pub fn key(&mut self, code: u32) -> Vec<SurfacePatch> {
        if code == KEY_ESCAPE {
            self.close()
        } else {
            Vec::new()
        }
    }
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self::new()
    }
}
