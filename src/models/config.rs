use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::path::{get_database_path, get_settings_path};

pub const DEFAULT_NOTIFICATION_INTERVAL_HOURS: u64 = 4;
/// One week
pub const MAX_NOTIFICATION_INTERVAL_HOURS: u64 = 24 * 7;

/// Application settings stored in settings.toml, not in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub dark_mode: bool,
    pub window_width: f32,
    pub window_height: f32,
    /// Hours between notification popups
    pub notification_interval_hours: u64,
    /// Overrides the database location in the platform data directory
    pub database_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            window_width: 1100.0,
            window_height: 640.0,
            notification_interval_hours: DEFAULT_NOTIFICATION_INTERVAL_HOURS,
            database_path: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::load_from(&get_settings_path())
    }

    /// Missing or unreadable files fall back to defaults
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };

        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring invalid settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&get_settings_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path.clone().unwrap_or_else(get_database_path)
    }

    /// Clamped to between one hour and one week
    pub fn notification_interval(&self) -> std::time::Duration {
        let hours = self
            .notification_interval_hours
            .clamp(1, MAX_NOTIFICATION_INTERVAL_HOURS);
        std::time::Duration::from_secs(hours * 60 * 60)
    }
}
