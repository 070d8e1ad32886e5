use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::lock;
use crate::models::UserPreference;
use crate::utils::date::{format_date, parse_date};
use crate::utils::AppResult;

/// Access to the single-row `user` table
pub struct UserRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UserRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Current preferences. An empty table is seeded with opted-out defaults.
    pub fn get(&self) -> AppResult<UserPreference> {
        let conn = lock(&self.conn)?;

        if let Some(prefs) = read_row(&conn)? {
            return Ok(prefs);
        }

        let prefs = UserPreference::default();
        insert_row(&conn, &prefs)?;
        debug!("Seeded default user preferences");
        Ok(prefs)
    }

    /// Replace the stored row so exactly one remains
    pub fn save(&self, prefs: &UserPreference) -> AppResult<()> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM user", [])?;
        insert_row(&tx, prefs)?;
        tx.commit()?;

        info!(
            "Saved notification preferences (opted in: {})",
            prefs.is_opted_in()
        );
        Ok(())
    }

    /// Remove the stored row entirely
    pub fn clear(&self) -> AppResult<()> {
        let conn = lock(&self.conn)?;
        conn.execute("DELETE FROM user", [])?;
        info!("Cleared notification preferences");
        Ok(())
    }

    /// Stamp the date of the last popup, keeping the other fields
    pub fn record_notification(&self, date: NaiveDate) -> AppResult<()> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;

        let mut prefs = read_row(&tx)?.unwrap_or_default();
        prefs.last_notification_date = date;

        tx.execute("DELETE FROM user", [])?;
        insert_row(&tx, &prefs)?;
        tx.commit()?;

        debug!("Recorded notification on {}", date);
        Ok(())
    }
}

fn read_row(conn: &Connection) -> AppResult<Option<UserPreference>> {
    let prefs = conn
        .query_row(
            "SELECT phone_number, week_before, day_before, day_of, last_notification_date
             FROM user LIMIT 1",
            [],
            |row| {
                let flag = |idx: usize| -> rusqlite::Result<bool> {
                    Ok(row.get::<_, Option<i64>>(idx)?.unwrap_or(0) != 0)
                };
                let last: Option<String> = row.get(4)?;

                Ok(UserPreference {
                    phone_number: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    week_before: flag(1)?,
                    day_before: flag(2)?,
                    day_of: flag(3)?,
                    last_notification_date: last
                        .as_deref()
                        .and_then(parse_date)
                        .unwrap_or_else(|| UserPreference::default().last_notification_date),
                })
            },
        )
        .optional()?;
    Ok(prefs)
}

fn insert_row(conn: &Connection, prefs: &UserPreference) -> AppResult<()> {
    conn.execute(
        "INSERT INTO user (phone_number, week_before, day_before, day_of, last_notification_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            prefs.phone_number,
            prefs.week_before as i64,
            prefs.day_before as i64,
            prefs.day_of as i64,
            format_date(prefs.last_notification_date),
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn row_count(db: &Database) -> i64 {
        db.with_connection(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))?)
        })
        .unwrap()
    }

    #[test]
    fn test_get_seeds_defaults() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();

        let prefs = users.get().unwrap();
        assert_eq!(prefs, UserPreference::default());
        assert!(!prefs.is_opted_in());
        assert_eq!(row_count(&db), 1);

        // Second read does not add another row
        users.get().unwrap();
        assert_eq!(row_count(&db), 1);
    }

    #[test]
    fn test_save_replaces_row() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();
        users.get().unwrap();

        let prefs = UserPreference {
            phone_number: "5551234567".into(),
            week_before: true,
            day_before: false,
            day_of: true,
            last_notification_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        };
        users.save(&prefs).unwrap();
        users.save(&prefs).unwrap();

        assert_eq!(row_count(&db), 1);
        assert_eq!(users.get().unwrap(), prefs);
    }

    #[test]
    fn test_clear_then_get_returns_defaults() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();

        users
            .save(&UserPreference {
                phone_number: "5551234567".into(),
                ..Default::default()
            })
            .unwrap();
        users.clear().unwrap();
        assert_eq!(row_count(&db), 0);

        assert!(!users.get().unwrap().is_opted_in());
    }

    #[test]
    fn test_record_notification_keeps_other_fields() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();

        let prefs = UserPreference {
            phone_number: "5551234567".into(),
            day_of: true,
            ..Default::default()
        };
        users.save(&prefs).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        users.record_notification(date).unwrap();

        let loaded = users.get().unwrap();
        assert_eq!(loaded.phone_number, "5551234567");
        assert!(loaded.day_of);
        assert_eq!(loaded.last_notification_date, date);
        assert_eq!(row_count(&db), 1);
    }

    #[test]
    fn test_legacy_row_with_nulls() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            conn.execute("INSERT INTO user (phone_number) VALUES (NULL)", [])?;
            Ok(())
        })
        .unwrap();

        assert_eq!(db.users().get().unwrap(), UserPreference::default());
    }
}
