//! Main page session state container
//!
//! Rust owns all state; the host page is a stateless surface that
//! renders the patches handed back from here.

use chrono::Duration;
use parking_lot::RwLock;
use std::sync::Arc;

use portico_editor::{
    body_class_for_host, AllowEmptyInline, EditorPlugin, EditorProfile, FontSizeOption, PluginSet,
};
use portico_page::{
    content_decorations, fixed_header_offset, fullheight_header, map_wrapper_height,
    scroll_animation_class, Banner, ContactTab, FilterBar, FilterSelection, MapActivation,
    MapMount, MapPanel, MapPhase, NavState, PageEnv, SearchOverlay, SideNav, SurfacePatch,
};
use portico_storage::Database;

use crate::config::ThemeConfig;
use crate::error::CoreError;
use crate::Result;

/// Main page session instance
///
/// This is the central state container for one page load.
/// All state flows through here, and the host page is purely a renderer.
pub struct PageSession {
    /// Configuration
    config: ThemeConfig,
    /// Database
    db: Database,
    /// Session identifier for log correlation
    session_id: String,
    /// Banner dismissal controller
    banner: Banner,
    /// Map pane controller
    map_panel: Arc<RwLock<MapPanel>>,
    /// Off-canvas navigation controller
    side_nav: Arc<RwLock<SideNav>>,
    /// Search overlay controller
    search: Arc<RwLock<SearchOverlay>>,
    /// Filter bars, one per grid
    filters: Arc<RwLock<Vec<FilterBar>>>,
    /// Editor plugin registry
    plugins: Arc<RwLock<PluginSet>>,
    /// Validated font dropdown override from the config
    font_sizes: Option<Vec<FontSizeOption>>,
}

impl PageSession {
    /// Initialize a new page session
    pub fn new(config: ThemeConfig, mount: Arc<dyn MapMount>) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db, mount)
    }

    /// Ephemeral session; nothing survives it.
    pub fn in_memory(config: ThemeConfig, mount: Arc<dyn MapMount>) -> Result<Self> {
        let db = Database::open_in_memory()?;
        Self::with_database(config, db, mount)
    }

    /// Session over an already-open database. Several sessions over the
    /// same database model repeat visits.
    pub fn with_database(
        config: ThemeConfig,
        db: Database,
        mount: Arc<dyn MapMount>,
    ) -> Result<Self> {
        // Startup housekeeping: flags whose horizon elapsed while the
        // site sat idle
        db.purge_expired()?;

        let font_sizes = match &config.font_size_options {
            Some(packed) => Some(FontSizeOption::parse_list(packed)?),
            None => None,
        };

        let banner = Banner::with_flag(
            Arc::new(db.clone()),
            config.banner_flag.clone(),
            Duration::days(config.banner_ttl_days),
        );
        let map_panel = MapPanel::new(mount, config.map.clone());

        let mut plugins = PluginSet::new();
        plugins.register(Box::new(AllowEmptyInline));

        let session_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(session_id = %session_id, "Page session initialized");

        Ok(Self {
            config,
            db,
            session_id,
            banner,
            map_panel: Arc::new(RwLock::new(map_panel)),
            side_nav: Arc::new(RwLock::new(SideNav::new())),
            search: Arc::new(RwLock::new(SearchOverlay::new())),
            filters: Arc::new(RwLock::new(Vec::new())),
            plugins: Arc::new(RwLock::new(plugins)),
            font_sizes,
        })
    }

    // === Lifecycle operations ===

    /// Patches for the document-ready phase: banner visibility, content
    /// decorations, sizing rules, the scroll-gated animation class, and
    /// the always-visible map variant, in that order.
    pub fn ready(&self, env: &PageEnv) -> Vec<SurfacePatch> {
        let mut patches = self.banner.ready_patches();
        patches.extend(content_decorations());
        patches.extend(fullheight_header(env));
        patches.extend(map_wrapper_height(env));
        patches.extend(fixed_header_offset(env));
        patches.extend(scroll_animation_class(env));

        if self.config.map_activation == MapActivation::OnReady {
            self.map_panel.write().ensure_mounted();
        }

        patches
    }

    /// Window-load phase: grids whose filter bars have options. The
    /// host binds only these; empty bars stay unbound.
    pub fn loaded(&self) -> Vec<String> {
        self.filters
            .read()
            .iter()
            .filter(|bar| bar.should_bind())
            .map(|bar| bar.group().to_string())
            .collect()
    }

    /// The window was resized; sizes follow the fresh measurements.
    pub fn resized(&self, env: &PageEnv) -> Vec<SurfacePatch> {
        let mut patches = fullheight_header(env);
        patches.extend(map_wrapper_height(env));
        patches.extend(fixed_header_offset(env));
        patches
    }

    /// The scroll position moved; the animation class follows it.
    pub fn scrolled(&self, env: &PageEnv) -> Vec<SurfacePatch> {
        scroll_animation_class(env)
    }

    // === Banner operations ===

    pub fn dismiss_banner(&self) -> Vec<SurfacePatch> {
        self.banner.dismiss()
    }

    pub fn is_banner_dismissed(&self) -> bool {
        self.banner.is_dismissed()
    }

    // === Contact tab operations ===

    /// A contact tab came to the front. The map pane mounts its widget
    /// on first activation; the details pane only drops the open mark.
    pub fn tab_shown(&self, tab: ContactTab) -> Vec<SurfacePatch> {
        let mut panel = self.map_panel.write();
        match tab {
            ContactTab::Map => panel.activate(),
            ContactTab::Details => panel.deactivate(),
        }
    }

    pub fn map_phase(&self) -> MapPhase {
        self.map_panel.read().phase()
    }

    // === Navigation operations ===

    pub fn toggle_nav(&self) -> Vec<SurfacePatch> {
        self.side_nav.write().toggle()
    }

    pub fn nav_state(&self) -> NavState {
        self.side_nav.read().state()
    }

    // === Search operations ===

    pub fn open_search(&self) -> Vec<SurfacePatch> {
        self.search.write().open()
    }

    pub fn close_search(&self) -> Vec<SurfacePatch> {
        self.search.write().close()
    }

    /// Key press while the search overlay has focus.
    pub fn search_key(&self, code: u32) -> Vec<SurfacePatch> {
        self.search.write().key(code)
    }

    // === Filter operations ===

    /// Register the filter bar the host enumerated for one grid.
    pub fn register_filter_bar(&self, bar: FilterBar) {
        self.filters.write().push(bar);
    }

    pub fn select_filter(&self, group: &str, index: usize) -> Result<FilterSelection> {
        let filters = self.filters.read();
        let bar = filters
            .iter()
            .find(|bar| bar.group() == group)
            .ok_or_else(|| CoreError::Config(format!("Unknown filter group: {}", group)))?;

        Ok(bar.select(index)?)
    }

    // === Editor operations ===

    pub fn register_plugin(&self, plugin: Box<dyn EditorPlugin>) {
        self.plugins.write().register(plugin);
    }

    /// Build the editor profile for a page served from `host`.
    pub fn editor_profile(&self, host: &str) -> EditorProfile {
        let mut profile = EditorProfile::build(&self.plugins.read());

        if let Some(sizes) = &self.font_sizes {
            profile.font_sizes = sizes.clone();
        }
        profile.body_class = body_class_for_host(host);

        profile
    }

    // === Preference operations ===

    pub fn get_pref(&self, key: &str) -> Result<Option<String>> {
        Ok(self.db.get_pref(key)?)
    }

    pub fn set_pref(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.db.set_pref(key, value)?)
    }

    // === Config ===

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Clone for PageSession {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            session_id: self.session_id.clone(),
            banner: self.banner.clone(),
            map_panel: Arc::clone(&self.map_panel),
            side_nav: Arc::clone(&self.side_nav),
            search: Arc::clone(&self.search),
            filters: Arc::clone(&self.filters),
            plugins: Arc::clone(&self.plugins),
            font_sizes: self.font_sizes.clone(),
        }
    }
}

// Implement std::io::Error conversion for fs operations
impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;
    use portico_page::{targets, FilterOption, MapConfig, PatchOp, KEY_ESCAPE};
    use std::path::PathBuf;

    #[derive(Default)]
    struct CountingMount {
        mounts: Mutex<usize>,
    }

    impl MapMount for CountingMount {
        fn mount(&self, _target: &str, _config: &MapConfig) {
            *self.mounts.lock() += 1;
        }
    }

    fn test_config() -> ThemeConfig {
        ThemeConfig::new(PathBuf::from("/tmp/portico-test"))
    }

    fn session_over(db: &Database, mount: &Arc<CountingMount>) -> PageSession {
        PageSession::with_database(
            test_config(),
            db.clone(),
            Arc::clone(mount) as Arc<dyn MapMount>,
        )
        .unwrap()
    }

    fn web_bar() -> FilterBar {
        FilterBar::new(
            ".portfolio-items",
            vec![
                FilterOption {
                    target: "#filter-all".to_string(),
                    filter: "*".to_string(),
                },
                FilterOption {
                    target: "#filter-web".to_string(),
                    filter: ".web-design".to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_banner_lifecycle_across_visits() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());

        // First visit shows the banner
        let first = session_over(&db, &mount);
        assert!(!first.is_banner_dismissed());
        assert!(!first
            .ready(&PageEnv::default())
            .iter()
            .any(|p| p.target == targets::COUPON_BLOCK));

        first.dismiss_banner();
        assert!(first.is_banner_dismissed());

        // A later visit over the same database hides it during ready
        let second = session_over(&db, &mount);
        assert!(second
            .ready(&PageEnv::default())
            .iter()
            .any(|p| p.target == targets::COUPON_BLOCK && p.op == PatchOp::Hide));

        // Rewind the horizon past its end; the banner comes back
        db.with_connection(|conn| {
            conn.execute(
                "UPDATE flags SET expires_at = ?1",
                [(Utc::now() - Duration::days(1)).to_rfc3339()],
            )?;
            Ok(())
        })
        .unwrap();

        let third = session_over(&db, &mount);
        assert!(!third.is_banner_dismissed());
        assert!(!third
            .ready(&PageEnv::default())
            .iter()
            .any(|p| p.target == targets::COUPON_BLOCK));
    }

    #[test]
    fn test_map_mounts_once_across_tab_switches() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        assert_eq!(session.map_phase(), MapPhase::Uninitialized);

        for _ in 0..3 {
            let shown = session.tab_shown(ContactTab::Map);
            assert!(!shown.is_empty());
            session.tab_shown(ContactTab::Details);
        }

        assert_eq!(session.map_phase(), MapPhase::Ready);
        assert_eq!(*mount.mounts.lock(), 1);
    }

    #[test]
    fn test_always_visible_map_mounts_at_ready() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());

        let mut config = test_config();
        config.map_activation = MapActivation::OnReady;

        let session =
            PageSession::with_database(config, db, Arc::clone(&mount) as Arc<dyn MapMount>)
                .unwrap();

        session.ready(&PageEnv::default());
        assert_eq!(session.map_phase(), MapPhase::Ready);
        assert_eq!(*mount.mounts.lock(), 1);

        // Ready again (e.g. a soft reload) never remounts
        session.ready(&PageEnv::default());
        assert_eq!(*mount.mounts.lock(), 1);
    }

    #[test]
    fn test_ready_includes_content_decorations() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        let patches = session.ready(&PageEnv::default());
        assert!(patches.contains(&SurfacePatch::add_class(targets::CONTENT_TABLES, "table")));
        assert!(patches.contains(&SurfacePatch::add_class(targets::CONTENT_DLS, "dl-horizontal")));
    }

    #[test]
    fn test_ready_applies_measurements() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        let env = PageEnv {
            viewport_height: Some(768.0),
            scroll_top: Some(0.0),
            contact_panel_height: Some(420.0),
            fixed_header_height: Some(72.0),
            ..Default::default()
        };

        let patches = session.ready(&env);
        assert!(patches.contains(&SurfacePatch::set_height(targets::HEADER_FULLHEIGHT, 768.0)));
        assert!(patches.contains(&SurfacePatch::set_height(targets::MAP_WRAPPER, 420.0)));
        assert!(patches.contains(&SurfacePatch::set_padding_top(targets::BODY, 72.0)));
        assert!(patches.contains(&SurfacePatch::add_class(targets::NAVBAR_FIXED, "wow")));
    }

    #[test]
    fn test_resize_takes_fresh_measurements() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        let env = PageEnv {
            viewport_height: Some(900.0),
            contact_panel_height: Some(510.0),
            ..Default::default()
        };

        let patches = session.resized(&env);
        assert_eq!(
            patches,
            vec![
                SurfacePatch::set_height(targets::HEADER_FULLHEIGHT, 900.0),
                SurfacePatch::set_height(targets::MAP_WRAPPER, 510.0),
            ]
        );

        // No measurements, no patches
        assert!(session.resized(&PageEnv::default()).is_empty());
    }

    #[test]
    fn test_scroll_drops_animation_class_at_bottom() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        let env = PageEnv {
            scroll_top: Some(1232.0),
            viewport_height: Some(768.0),
            document_height: Some(2000.0),
            ..Default::default()
        };

        assert_eq!(
            session.scrolled(&env),
            vec![SurfacePatch::remove_class(targets::NAVBAR_FIXED, "wow")]
        );
    }

    #[test]
    fn test_nav_toggle_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        assert_eq!(session.nav_state(), NavState::Closed);

        session.toggle_nav();
        assert_eq!(session.nav_state(), NavState::Open);

        session.toggle_nav();
        assert_eq!(session.nav_state(), NavState::Closed);
    }

    #[test]
    fn test_search_escape_closes() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        let opened = session.open_search();
        assert!(opened.contains(&SurfacePatch::focus(targets::SEARCH_INPUT)));

        // Other keys leave the overlay alone
        assert!(session.search_key(13).is_empty());

        let closed = session.search_key(KEY_ESCAPE);
        assert_eq!(
            closed,
            vec![SurfacePatch::remove_class(targets::SEARCH_WRAPPER, "open")]
        );
        assert!(session.close_search().is_empty());
    }

    #[test]
    fn test_filter_bars_bind_and_select() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        session.register_filter_bar(web_bar());
        session.register_filter_bar(FilterBar::new(".empty-grid", Vec::new()));

        // Only the populated bar binds
        assert_eq!(session.loaded(), vec![".portfolio-items".to_string()]);

        let selection = session.select_filter(".portfolio-items", 1).unwrap();
        assert_eq!(selection.filter, ".web-design");

        let err = session.select_filter(".no-such-grid", 0).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));

        let err = session.select_filter(".portfolio-items", 9).unwrap_err();
        assert!(matches!(err, CoreError::Page(_)));
    }

    #[test]
    fn test_editor_profile_per_host() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        let profile = session.editor_profile("toro.example.com");
        assert_eq!(profile.body_class.as_deref(), Some("subsite-toro"));
        // The shipped plugin keeps the inline hooks alive
        assert!(!profile.remove_empty.is_removable("span"));
        assert!(!profile.remove_empty.is_removable("i"));
        assert_eq!(profile.font_sizes.len(), 18);

        let bare = session.editor_profile("example.com");
        assert_eq!(bare.body_class, None);
    }

    #[test]
    fn test_font_override_applies() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());

        let mut config = test_config();
        config.font_size_options = Some("10/10px;20/20px".to_string());

        let session =
            PageSession::with_database(config, db, Arc::clone(&mount) as Arc<dyn MapMount>)
                .unwrap();

        let profile = session.editor_profile("example.com");
        assert_eq!(profile.font_sizes.len(), 2);
        assert_eq!(profile.font_sizes[0].label, "10");
        assert_eq!(profile.font_sizes[1].size, "20px");
    }

    #[test]
    fn test_malformed_font_override_rejected() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());

        let mut config = test_config();
        config.font_size_options = Some("/bad".to_string());

        let result =
            PageSession::with_database(config, db, Arc::clone(&mount) as Arc<dyn MapMount>);
        assert!(matches!(result, Err(CoreError::Editor(_))));
    }

    #[test]
    fn test_pref_passthrough() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);

        assert_eq!(session.get_pref("palette").unwrap(), None);
        session.set_pref("palette", "dark").unwrap();
        assert_eq!(session.get_pref("palette").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_clones_share_state() {
        let db = Database::open_in_memory().unwrap();
        let mount = Arc::new(CountingMount::default());
        let session = session_over(&db, &mount);
        let clone = session.clone();

        assert_eq!(session.session_id(), clone.session_id());

        clone.toggle_nav();
        assert_eq!(session.nav_state(), NavState::Open);

        session.tab_shown(ContactTab::Map);
        assert_eq!(clone.map_phase(), MapPhase::Ready);
    }
}
