use std::path::{Path, PathBuf};

const DATABASE_FILE: &str = "home_reminders.db";
const BACKUP_FILE: &str = "db_backup.bak";
const SETTINGS_FILE: &str = "settings.toml";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "homereminders", "Home Reminders")
}

/// Default database location in the platform data directory
pub fn get_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

/// Settings file in the platform config directory
pub fn get_settings_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}

/// The backup always sits next to the database it was taken from
pub fn backup_path_for(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(dir) => dir.join(BACKUP_FILE),
        None => PathBuf::from(BACKUP_FILE),
    }
}

/// Shorten the home directory to ~ for display
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_is_sibling() {
        let db = Path::new("/data/Home Reminders/home_reminders.db");
        assert_eq!(
            backup_path_for(db),
            PathBuf::from("/data/Home Reminders/db_backup.bak")
        );
    }

    #[test]
    fn test_default_paths_have_expected_file_names() {
        assert!(get_database_path().ends_with(DATABASE_FILE));
        assert!(get_settings_path().ends_with(SETTINGS_FILE));
    }

    #[test]
    fn test_display_path_outside_home() {
        assert_eq!(display_path(Path::new("relative/x.db")), "relative/x.db");
    }
}
