//! Mobile off-canvas navigation
//!
//! One trigger flips the panel between open and closed. Two toggles
//! restore the original state; rapid double firing needs no guard,
//! class and visibility flips cost nothing.

use serde::{Deserialize, Serialize};

use crate::patch::{targets, SurfacePatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavState {
    Closed,
    Open,
}

impl NavState {
    pub fn flipped(self) -> Self {
        match self {
            NavState::Closed => NavState::Open,
            NavState::Open => NavState::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavState::Closed => "closed",
            NavState::Open => "open",
        }
    }
}

impl std::fmt::Display for NavState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Off-canvas navigation controller. Opening swaps the trigger glyph
/// from bars to times and shows the panel; closing mirrors it.
pub struct SideNav {
    state: NavState,
}

impl SideNav {
    pub fn new() -> Self {
        Self {
            state: NavState::Closed,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn toggle(&mut self) -> Vec<SurfacePatch> {
        self.state = self.state.flipped();
        tracing::debug!(state = %self.state, "Side nav toggled");

        match self.state {
            NavState::Open => vec![
                SurfacePatch::add_class(targets::SIDE_MENU_TOGGLE, "open"),
                SurfacePatch::remove_class(targets::SIDE_MENU_ICON, "fa-bars"),
                SurfacePatch::add_class(targets::SIDE_MENU_ICON, "fa-times"),
                SurfacePatch::show(targets::SIDE_WRAPPER),
            ],
            NavState::Closed => vec![
                SurfacePatch::remove_class(targets::SIDE_MENU_TOGGLE, "open"),
                SurfacePatch::remove_class(targets::SIDE_MENU_ICON, "fa-times"),
                SurfacePatch::add_class(targets::SIDE_MENU_ICON, "fa-bars"),
                SurfacePatch::hide(targets::SIDE_WRAPPER),
            ],
        }
    }
}

impl Default for SideNav {
    fn default() -> Self {
        Self::new()
    }
}
