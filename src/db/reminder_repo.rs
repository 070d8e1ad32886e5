use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use super::lock;
use crate::models::{ListScope, Period, Reminder};
use crate::utils::date::{format_date, parse_date};
use crate::utils::{AppError, AppResult};

const SELECT_COLUMNS: &str =
    "SELECT id, description, frequency, period, date_last, date_next, note FROM reminders";

pub struct ReminderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReminderRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Reminders for the list, soonest first. Pending keeps unscheduled rows.
    pub fn find_all(&self, scope: ListScope, today: NaiveDate) -> AppResult<Vec<Reminder>> {
        let conn = lock(&self.conn)?;

        let reminders = match scope {
            // Unscheduled rows (NULL or legacy '') stay in the pending list
            ListScope::Pending => {
                let mut stmt = conn.prepare(&format!(
                    "{SELECT_COLUMNS}
                     WHERE date_next >= ?1 OR date_next IS NULL OR date_next = ''
                     ORDER BY date_next ASC, description ASC"
                ))?;
                let rows = stmt.query_map([format_date(today)], Self::row_to_reminder)?;
                collect_rows(rows)
            }
            ListScope::All => {
                let mut stmt = conn.prepare(&format!(
                    "{SELECT_COLUMNS} ORDER BY date_next ASC, description ASC"
                ))?;
                let rows = stmt.query_map([], Self::row_to_reminder)?;
                collect_rows(rows)
            }
        };

        Ok(reminders)
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<Option<Reminder>> {
        let conn = lock(&self.conn)?;
        let reminder = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?"),
                [id],
                Self::row_to_reminder,
            )
            .optional()?;
        Ok(reminder)
    }

    /// Insert a new reminder. `date_next` is recomputed before writing.
    pub fn create(&self, reminder: &mut Reminder) -> AppResult<i64> {
        check_description(&reminder.description)?;
        reminder.recompute_next();

        // Uniqueness is checked under the same lock as the insert
        let conn = lock(&self.conn)?;
        if description_taken(&conn, &reminder.description, None)? {
            return Err(duplicate_description());
        }

        conn.execute(
            "INSERT INTO reminders (description, frequency, period, date_last, date_next, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                reminder.description,
                reminder.frequency.to_string(),
                reminder.period_display(),
                format_date(reminder.date_last),
                reminder.date_next.map(format_date),
                reminder.note,
            ],
        )?;

        let id = conn.last_insert_rowid();
        reminder.id = Some(id);
        info!("Created reminder {} ({})", id, reminder.description);

        Ok(id)
    }

    /// Rewrite every column of an existing reminder
    pub fn update(&self, reminder: &mut Reminder) -> AppResult<()> {
        let id = reminder
            .id
            .ok_or_else(|| AppError::other("Reminder has no id"))?;
        check_description(&reminder.description)?;
        reminder.recompute_next();

        let conn = lock(&self.conn)?;
        if description_taken(&conn, &reminder.description, Some(id))? {
            return Err(duplicate_description());
        }

        let rows = conn.execute(
            "UPDATE reminders SET
                description = ?1, frequency = ?2, period = ?3,
                date_last = ?4, date_next = ?5, note = ?6
             WHERE id = ?7",
            params![
                reminder.description,
                reminder.frequency.to_string(),
                reminder.period_display(),
                format_date(reminder.date_last),
                reminder.date_next.map(format_date),
                reminder.note,
                id,
            ],
        )?;

        if rows == 0 {
            return Err(AppError::not_found(format!("reminder {}", id)));
        }

        info!("Updated reminder {}", id);
        Ok(())
    }

    // Deletion

    pub fn delete(&self, id: i64) -> AppResult<()> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute("DELETE FROM reminders WHERE id = ?", [id])?;

        if rows == 0 {
            return Err(AppError::not_found(format!("reminder {}", id)));
        }

        info!("Deleted reminder {}", id);
        Ok(())
    }

    /// Remove every reminder, returning how many were deleted
    pub fn delete_all(&self) -> AppResult<usize> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute("DELETE FROM reminders", [])?;
        info!("Deleted all reminders ({})", rows);
        Ok(rows)
    }

    // Counts

    pub fn count(&self) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM reminders", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Rows with a next date before `today`; unscheduled rows never count
    pub fn count_past_due(&self, today: NaiveDate) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM reminders WHERE date_next < ?1 AND date_next != ''",
            [format_date(today)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn row_to_reminder(row: &Row) -> rusqlite::Result<Reminder> {
        let frequency: Option<String> = row.get(2)?;
        let period: Option<String> = row.get(3)?;
        let date_last: Option<String> = row.get(4)?;
        let date_next: Option<String> = row.get(5)?;

        let date_last = date_last.as_deref().and_then(parse_date).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                "date_last is not a YYYY-MM-DD date".into(),
            )
        })?;

        // Legacy rows may hold NULLs or free text; fall back rather than fail
        Ok(Reminder {
            id: row.get(0)?,
            description: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            frequency: frequency
                .and_then(|f| f.trim().parse().ok())
                .unwrap_or(1),
            period: period.as_deref().and_then(Period::from_db_str),
            date_last,
            date_next: date_next.as_deref().and_then(parse_date),
            note: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        })
    }
}

fn collect_rows<I>(rows: I) -> Vec<Reminder>
where
    I: Iterator<Item = rusqlite::Result<Reminder>>,
{
    let mut reminders = Vec::new();
    for row in rows {
        match row {
            Ok(reminder) => reminders.push(reminder),
            Err(e) => warn!("Skipping unreadable reminder row: {}", e),
        }
    }
    reminders
}

fn check_description(description: &str) -> AppResult<()> {
    if description.trim().is_empty() {
        return Err(AppError::validation("Description cannot be blank."));
    }
    Ok(())
}

fn duplicate_description() -> AppError {
    AppError::already_exists("There is already an entry with this description. Try again.")
}

/// Exact, case-sensitive match, ignoring `exclude_id`
fn description_taken(conn: &Connection, description: &str, exclude_id: Option<i64>) -> rusqlite::Result<bool> {
    let count: i64 = match exclude_id {
        Some(id) => conn.query_row(
            "SELECT COUNT(*) FROM reminders WHERE description = ? AND id != ?",
            params![description, id],
            |row| row.get(0),
        )?,
        None => conn.query_row(
            "SELECT COUNT(*) FROM reminders WHERE description = ?",
            [description],
            |row| row.get(0),
        )?,
    };
    Ok(count > 0)
}
