pub mod schema;
pub mod migrations;
pub mod reminder_repo;
pub mod user_repo;

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

pub use reminder_repo::ReminderRepository;
pub use user_repo::UserRepository;

use crate::utils::{AppError, AppResult};

/// Database handle shared by the UI; repositories borrow its connection
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open or create the database file
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Self::connect(path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// In-memory database with the schema applied (for tests)
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        };
        db.migrate()?;
        Ok(db)
    }

    /// Rollback journal, so the file alone is a complete copy between statements
    fn connect(path: &Path) -> AppResult<Connection> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = DELETE;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            ",
        )?;
        Ok(conn)
    }

    pub fn migrate(&self) -> AppResult<()> {
        let conn = lock(&self.conn)?;
        migrations::run_migrations(&conn)
    }

    /// File backing this database, `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn reminders(&self) -> ReminderRepository {
        ReminderRepository::new(Arc::clone(&self.conn))
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(Arc::clone(&self.conn))
    }

    /// Run `f` with the connection locked, so no statement runs meanwhile
    pub fn with_connection<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = lock(&self.conn)?;
        f(&conn)
    }

    /// Close the file, let `f` replace it, then reopen and migrate.
    /// When `f` fails or the new file does not open as a reminders
    /// database, the previous file is put back and reopened.
    pub fn replace_file<F>(&self, f: F) -> AppResult<()>
    where
        F: FnOnce(&Path) -> AppResult<()>,
    {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| AppError::other("In-memory database has no file"))?;

        let mut guard = lock(&self.conn)?;
        let old = std::mem::replace(&mut *guard, Connection::open_in_memory()?);
        if let Err((conn, e)) = old.close() {
            *guard = conn;
            return Err(e.into());
        }

        let previous = previous_copy_path(path);
        if let Err(e) = fs::copy(path, &previous) {
            *guard = Self::reopen(path)?;
            return Err(e.into());
        }

        match f(path).and_then(|()| Self::reopen(path)) {
            Ok(conn) => {
                *guard = conn;
                discard(&previous);
                info!("Reopened database {:?}", path);
                Ok(())
            }
            Err(e) => {
                warn!("Replacing {:?} failed, putting the previous file back: {}", path, e);
                fs::copy(&previous, path)?;
                *guard = Self::reopen(path)?;
                discard(&previous);
                Err(e)
            }
        }
    }

    /// Connect, migrate and check that the reminders table has the expected columns
    fn reopen(path: &Path) -> AppResult<Connection> {
        let conn = Self::connect(path)?;
        migrations::run_migrations(&conn)?;
        conn.prepare(
            "SELECT id, description, frequency, period, date_last, date_next, note
             FROM reminders LIMIT 0",
        )?;
        Ok(conn)
    }
}

/// Sibling file holding the live database while it is being replaced
fn previous_copy_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".previous");
    path.with_file_name(name)
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Could not remove {:?}: {}", path, e);
    }
}

pub(crate) fn lock(conn: &Mutex<Connection>) -> AppResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| AppError::other("Database connection lock poisoned"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Home Reminders").join("home_reminders.db");

        let db = Database::open(&path).unwrap();
        db.migrate().unwrap();

        assert!(path.exists());
        assert_eq!(db.path(), Some(path.as_path()));
    }

    #[test]
    fn test_replace_file_requires_file() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.replace_file(|_| Ok(())).is_err());
    }

    fn file_db(dir: &tempfile::TempDir) -> Database {
        let db = Database::open(&dir.path().join("home_reminders.db")).unwrap();
        db.migrate().unwrap();
        db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO reminders (description, frequency, period, date_last, date_next, note)
                 VALUES ('gutters', '6', 'months', '2024-10-01', '2025-04-01', '')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        db
    }

    fn reminder_count(db: &Database) -> i64 {
        db.with_connection(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM reminders", [], |row| row.get(0))?)
        })
        .unwrap()
    }

    #[test]
    fn test_replace_with_garbage_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir);

        let result = db.replace_file(|target| Ok(fs::write(target, b"not a database at all")?));
        assert!(result.is_err());

        assert_eq!(reminder_count(&db), 1);
        assert!(!previous_copy_path(db.path().unwrap()).exists());
    }

    #[test]
    fn test_failed_replace_restores_partial_write() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir);

        let result = db.replace_file(|target| {
            fs::write(target, b"half")?;
            Err(AppError::other("copy interrupted"))
        });
        assert!(result.is_err());

        assert_eq!(reminder_count(&db), 1);
        let may = chrono::NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(db.reminders().count_past_due(may).unwrap(), 1);
    }

    #[test]
    fn test_replace_rejects_foreign_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir);

        let foreign = dir.path().join("other.db");
        {
            let conn = Connection::open(&foreign).unwrap();
            conn.execute_batch("CREATE TABLE reminders(id INTEGER PRIMARY KEY, title TEXT);")
                .unwrap();
        }

        let result = db.replace_file(|target| {
            fs::copy(&foreign, target)?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(reminder_count(&db), 1);
    }
}
