/// SQL schema for Home Reminders

pub const SCHEMA_VERSION: i32 = 1;

pub const CREATE_TABLES: &str = r#"
-- Notification preferences (at most one row)
CREATE TABLE IF NOT EXISTS user (
    phone_number TEXT,
    week_before INT,
    day_before INT,
    day_of INT,
    last_notification_date TEXT
);

-- Reminders
CREATE TABLE IF NOT EXISTS reminders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT,
    frequency TEXT,
    period TEXT,
    date_last TEXT,
    date_next TEXT,
    note TEXT
);

CREATE INDEX IF NOT EXISTS idx_reminders_date_next ON reminders(date_next);

-- Migration history
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
