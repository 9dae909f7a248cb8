//! Tab-gated map activation
//!
//! Widget lifecycle:
//! ```text
//! Uninitialized
//!   ↓ first activation
//! Initializing
//!   ↓ mount returned
//! Ready
//! ```
//!
//! The map mounts exactly once per page lifetime; every later tab
//! switch only toggles the container's open class. Deactivation never
//! tears the widget down, so switching back is free.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::patch::{targets, SurfacePatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapPhase {
    /// No widget yet; waiting for the owning tab's first activation
    Uninitialized,
    /// Mount call in flight
    Initializing,
    /// Widget exists for the rest of the page's lifetime
    Ready,
}

impl MapPhase {
    /// Check if transition to another phase is valid
    pub fn can_transition_to(&self, target: MapPhase) -> bool {
        match (self, target) {
            // First activation starts the mount
            (MapPhase::Uninitialized, MapPhase::Initializing) => true,
            // Mount returning completes it
            (MapPhase::Initializing, MapPhase::Ready) => true,
            // Same phase is always valid (no-op)
            (a, b) if *a == b => true,
            // There is no way back; the widget never unloads
            _ => false,
        }
    }

    /// Returns true once the widget has been constructed
    pub fn is_mounted(&self) -> bool {
        matches!(self, MapPhase::Ready)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MapPhase::Uninitialized => "uninitialized",
            MapPhase::Initializing => "initializing",
            MapPhase::Ready => "ready",
        }
    }
}

impl std::fmt::Display for MapPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// When the map widget mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapActivation {
    /// On the owning tab's first activation
    OnTabShown,
    /// During the document-ready phase (the always-visible variant)
    OnReady,
}

/// The two panes of the contact tab group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactTab {
    /// Contact details pane
    Details,
    /// Map pane
    Map,
}

/// Marker image geometry, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub image: String,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
    pub info_window_anchor: (u32, u32),
}

/// One rule of the map's visual theme. `feature` is absent for rules
/// applying to the whole map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStyleRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    pub element: String,
    pub color: String,
}

/// Fixed widget configuration handed to the mount seam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub controls: bool,
    pub scrollwheel: bool,
    /// Icon attached to the location marker.
    pub marker: MarkerIcon,
    /// Default icon for everything else the widget places.
    pub icon: MarkerIcon,
    pub styles: Vec<MapStyleRule>,
}

impl MapConfig {
    /// The deployed office location with the theme's dark palette.
    /// `asset_base` is the theme path the host page exposes; the
    /// marker image lives under it.
    pub fn office(asset_base: &str) -> Self {
        let image = format!(
            "{}/assets/img/marker.png",
            asset_base.trim_end_matches('/')
        );

        Self {
            latitude: 34.4730494,
            longitude: -117.2779087,
            zoom: 14,
            controls: false,
            scrollwheel: false,
            marker: MarkerIcon {
                image: image.clone(),
                size: (44, 44),
                anchor: (12, 46),
                info_window_anchor: (12, 0),
            },
            icon: MarkerIcon {
                image,
                size: (26, 46),
                anchor: (12, 46),
                info_window_anchor: (12, 0),
            },
            styles: dark_styles(),
        }
    }
}

fn rule(feature: Option<&str>, element: &str, color: &str) -> MapStyleRule {
    MapStyleRule {
        feature: feature.map(str::to_string),
        element: element.to_string(),
        color: color.to_string(),
    }
}

/// The dark palette the theme ships.
fn dark_styles() -> Vec<MapStyleRule> {
    vec![
        rule(None, "geometry", "#242f3e"),
        rule(None, "labels.text.fill", "#746855"),
        rule(None, "labels.text.stroke", "#242f3e"),
        rule(Some("administrative.locality"), "labels.text.fill", "#d59563"),
        rule(Some("poi"), "labels.text.fill", "#d59563"),
        rule(Some("poi.park"), "geometry", "#263c3f"),
        rule(Some("poi.park"), "labels.text.fill", "#6b9a76"),
        rule(Some("road"), "geometry", "#38414e"),
        rule(Some("road"), "geometry.stroke", "#212a37"),
        rule(Some("road"), "labels.text.fill", "#9ca5b3"),
        rule(Some("road.highway"), "geometry", "#746855"),
        rule(Some("road.highway"), "geometry.stroke", "#1f2835"),
        rule(Some("road.highway"), "labels.text.fill", "#f3d19c"),
        rule(Some("transit"), "geometry", "#2f3948"),
        rule(Some("transit.station"), "labels.text.fill", "#d59563"),
        rule(Some("water"), "geometry", "#17263c"),
        rule(Some("water"), "labels.text.fill", "#515c6d"),
        rule(Some("water"), "labels.text.stroke", "#17263c"),
    ]
}

/// Seam to the external map library. Called at most once per panel
/// lifetime. Construction failure belongs to the library, so the
/// signature has nowhere to report one.
pub trait MapMount: Send + Sync {
    fn mount(&self, target: &str, config: &MapConfig);
}

/// Mount that does nothing, for pages without a map pane.
pub struct NoopMount;

impl MapMount for NoopMount {
    fn mount(&self, _target: &str, _config: &MapConfig) {}
}

/// Controller for the map pane of the contact tab group.
pub struct MapPanel {
    mount: Arc<dyn MapMount>,
    config: MapConfig,
    phase: MapPhase,
    map_open: bool,
}

impl MapPanel {
    pub fn new(mount: Arc<dyn MapMount>, config: MapConfig) -> Self {
        Self {
            mount,
            config,
            phase: MapPhase::Uninitialized,
            map_open: false,
        }
    }

    pub fn phase(&self) -> MapPhase {
        self.phase
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Construct the widget if it does not exist yet. Leaves the open
    /// mark alone, which is all the always-visible variant needs.
    pub fn ensure_mounted(&mut self) {
        if self.phase != MapPhase::Uninitialized {
            return;
        }

        self.advance(MapPhase::Initializing);
        self.mount.mount(targets::MAP_WRAPPER, &self.config);
        self.advance(MapPhase::Ready);

        tracing::info!(selector = targets::MAP_WRAPPER, "Map widget mounted");
    }

    /// The owning tab came to the front. First time through, mount the
    /// widget; afterwards only mark the container open.
    pub fn activate(&mut self) -> Vec<SurfacePatch> {
        self.ensure_mounted();

        if self.map_open {
            return Vec::new();
        }

        self.map_open = true;
        vec![SurfacePatch::add_class(targets::CONTACT_TABS, "map-open")]
    }

    /// The sibling tab came to the front. Drops the open mark; the
    /// widget stays alive underneath.
    pub fn deactivate(&mut self) -> Vec<SurfacePatch> {
        if !self.map_open {
            return Vec::new();
        }

        self.map_open = false;
        vec![SurfacePatch::remove_class(targets::CONTACT_TABS, "map-open")]
    }

    fn advance(&mut self, next: MapPhase) {
        if !self.phase.can_transition_to(next) {
            tracing::warn!(from = %self.phase, to = %next, "Ignoring invalid map phase transition");
            return;
        }

        if self.phase != next {
            tracing::debug!(from = %self.phase, to = %next, "Map phase transition");
        }
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::PatchOp;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingMount {
        calls: Mutex<Vec<String>>,
    }

    impl MapMount for RecordingMount {
        fn mount(&self, target: &str, _config: &MapConfig) {
            self.calls.lock().push(target.to_string());
        }
    }

    fn panel(mount: &Arc<RecordingMount>) -> MapPanel {
        MapPanel::new(
            Arc::clone(mount) as Arc<dyn MapMount>,
            MapConfig::office("/themes/portico"),
        )
    }

    #[test]
    fn test_valid_transitions() {
        assert!(MapPhase::Uninitialized.can_transition_to(MapPhase::Initializing));
        assert!(MapPhase::Initializing.can_transition_to(MapPhase::Ready));
        // Same phase is a no-op
        assert!(MapPhase::Ready.can_transition_to(MapPhase::Ready));
    }

    #[test]
    fn test_invalid_transitions() {
        // Can't skip the mount
        assert!(!MapPhase::Uninitialized.can_transition_to(MapPhase::Ready));
        // No way back
        assert!(!MapPhase::Ready.can_transition_to(MapPhase::Uninitialized));
        assert!(!MapPhase::Ready.can_transition_to(MapPhase::Initializing));
    }

    #[test]
    fn test_first_activation_mounts_once() {
        let mount = Arc::new(RecordingMount::default());
        let mut panel = panel(&mount);

        assert_eq!(panel.phase(), MapPhase::Uninitialized);

        let patches = panel.activate();
        assert_eq!(panel.phase(), MapPhase::Ready);
        assert_eq!(mount.calls.lock().len(), 1);
        assert_eq!(mount.calls.lock()[0], targets::MAP_WRAPPER);
        assert_eq!(
            patches,
            vec![SurfacePatch::add_class(targets::CONTACT_TABS, "map-open")]
        );
    }

    #[test]
    fn test_reactivation_never_remounts() {
        let mount = Arc::new(RecordingMount::default());
        let mut panel = panel(&mount);

        // Alternate tabs a few times
        for _ in 0..3 {
            let opened = panel.activate();
            assert_eq!(opened.len(), 1);
            assert_eq!(
                opened[0].op,
                PatchOp::AddClass {
                    class: "map-open".to_string()
                }
            );

            let closed = panel.deactivate();
            assert_eq!(closed.len(), 1);
            assert_eq!(
                closed[0].op,
                PatchOp::RemoveClass {
                    class: "map-open".to_string()
                }
            );
        }

        // One construction across the whole sequence
        assert_eq!(mount.calls.lock().len(), 1);
    }

    #[test]
    fn test_repeat_activation_skips_class() {
        let mount = Arc::new(RecordingMount::default());
        let mut panel = panel(&mount);

        panel.activate();
        // Already marked open; nothing to add
        assert!(panel.activate().is_empty());
    }

    #[test]
    fn test_deactivate_before_activation() {
        let mount = Arc::new(RecordingMount::default());
        let mut panel = panel(&mount);

        assert!(panel.deactivate().is_empty());
        assert_eq!(panel.phase(), MapPhase::Uninitialized);
        assert!(mount.calls.lock().is_empty());
    }

    #[test]
    fn test_ensure_mounted_leaves_open_mark() {
        let mount = Arc::new(RecordingMount::default());
        let mut panel = panel(&mount);

        panel.ensure_mounted();
        panel.ensure_mounted();

        assert_eq!(mount.calls.lock().len(), 1);
        assert_eq!(panel.phase(), MapPhase::Ready);

        // The pane was never marked open, so there is nothing to remove
        assert!(panel.deactivate().is_empty());
    }

    #[test]
    fn test_office_config() {
        let config = MapConfig::office("/themes/portico/");

        assert_eq!(config.latitude, 34.4730494);
        assert_eq!(config.longitude, -117.2779087);
        assert_eq!(config.zoom, 14);
        assert!(!config.controls);
        assert!(!config.scrollwheel);
        assert_eq!(config.styles.len(), 18);

        // Trailing slash on the asset base folds away
        assert_eq!(config.marker.image, "/themes/portico/assets/img/marker.png");
        assert_eq!(config.marker.size, (44, 44));
        assert_eq!(config.icon.size, (26, 46));
        assert_eq!(config.icon.anchor, (12, 46));
    }

    #[test]
    fn test_style_rule_wire_shape() {
        let config = MapConfig::office("/t");

        // Map-wide rules carry no feature key at all
        let global = serde_json::to_value(&config.styles[0]).unwrap();
        assert_eq!(
            global,
            serde_json::json!({ "element": "geometry", "color": "#242f3e" })
        );

        let scoped = serde_json::to_value(&config.styles[3]).unwrap();
        assert_eq!(scoped["feature"], "administrative.locality");
    }
}
