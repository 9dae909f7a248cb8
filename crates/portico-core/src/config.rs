//! Theme runtime configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use portico_page::{MapActivation, MapConfig, DISMISS_FLAG, DISMISS_TTL_DAYS};

use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Theme path the host page exposes; assets such as the map
    /// marker live under it
    pub asset_base: String,
    /// Name of the banner dismissal flag
    pub banner_flag: String,
    /// Days a banner dismissal holds
    pub banner_ttl_days: i64,
    /// When the map widget mounts
    pub map_activation: MapActivation,
    /// Map widget configuration
    pub map: MapConfig,
    /// Packed `label/size` override for the editor's font dropdown
    #[serde(default)]
    pub font_size_options: Option<String>,
}

impl ThemeConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        let asset_base = "/themes/portico".to_string();

        Self {
            database_path: data_dir.join("portico.db"),
            map: MapConfig::office(&asset_base),
            asset_base,
            banner_flag: DISMISS_FLAG.to_string(),
            banner_ttl_days: DISMISS_TTL_DAYS,
            map_activation: MapActivation::OnTabShown,
            font_size_options: None,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Portico"))
            .unwrap_or_else(|| PathBuf::from(".portico"))
    }

    /// Read a config file written by `save` (or by hand).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for the platform data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ThemeConfig::default();

        assert!(config.database_path.ends_with("portico.db"));
        assert_eq!(config.banner_flag, "promo_closed");
        assert_eq!(config.banner_ttl_days, 14);
        assert_eq!(config.map_activation, MapActivation::OnTabShown);
        assert!(config.map.marker.image.starts_with("/themes/portico"));
        assert!(config.font_size_options.is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ThemeConfig::new(PathBuf::from("/tmp/portico"));
        let json = serde_json::to_string(&config).unwrap();
        let back: ThemeConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.database_path, config.database_path);
        assert_eq!(back.map, config.map);
        assert_eq!(back.map_activation, config.map_activation);
    }

    #[test]
    fn test_save_and_load() {
        let path =
            std::env::temp_dir().join(format!("portico-config-{}.json", std::process::id()));

        let mut config = ThemeConfig::new(PathBuf::from("/tmp/portico"));
        config.font_size_options = Some("10/10px;12/12px".to_string());
        config.save(&path).unwrap();

        let loaded = ThemeConfig::load(&path).unwrap();
        assert_eq!(loaded.font_size_options.as_deref(), Some("10/10px;12/12px"));
        assert_eq!(loaded.banner_flag, config.banner_flag);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ThemeConfig::load("/nonexistent/portico.json").is_err());
    }
}
