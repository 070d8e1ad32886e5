//! Backup and restore of the database file

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local};
use tracing::info;

use crate::db::Database;
use crate::utils::path::backup_path_for;

/// Result of a backup operation
#[derive(Debug, Clone)]
pub struct BackupResult {
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    pub created_at: String,
}

impl BackupResult {
    pub fn size_display(&self) -> String {
        format_size(self.size)
    }
}

/// The existing backup file, if any
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<String>,
}

impl BackupInfo {
    pub fn size_display(&self) -> String {
        format_size(self.size)
    }
}

pub struct BackupService<'a> {
    db: &'a Database,
}

impl<'a> BackupService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Copy the database to `db_backup.bak`, overwriting any previous backup
    pub fn create_backup(&self) -> Result<BackupResult> {
        let db_path = self.db_path()?;
        let backup_path = backup_path_for(db_path);

        // Hold the connection so no write lands mid-copy
        self.db
            .with_connection(|_| {
                fs::copy(db_path, &backup_path)?;
                Ok(())
            })
            .context("Could not create the backup file")?;

        let metadata = fs::metadata(&backup_path)?;
        info!("Backed up database to {:?}", backup_path);

        Ok(BackupResult {
            path: backup_path,
            size: metadata.len(),
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// Replace the database with the backup and reopen it
    pub fn restore_backup(&self) -> Result<()> {
        let db_path = self.db_path()?;
        let backup_path = backup_path_for(db_path);

        if !backup_path.exists() {
            bail!("backup file not found");
        }

        self.db
            .replace_file(|target| {
                fs::copy(&backup_path, target)?;
                Ok(())
            })
            .context("Could not restore the backup")?;

        info!("Restored database from {:?}", backup_path);
        Ok(())
    }

    pub fn backup_info(&self) -> Result<Option<BackupInfo>> {
        let backup_path = backup_path_for(self.db_path()?);

        if !backup_path.exists() {
            return Ok(None);
        }

        let metadata = fs::metadata(&backup_path)?;
        let modified = metadata.modified().ok().map(format_time);

        Ok(Some(BackupInfo {
            path: backup_path,
            size: metadata.len(),
            modified,
        }))
    }

    fn db_path(&self) -> Result<&'a Path> {
        self.db
            .path()
            .ok_or_else(|| anyhow!("An in-memory database has no file to back up"))
    }
}

fn format_time(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match size {
        b if b >= GB => format!("{:.1} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}
