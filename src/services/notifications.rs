use chrono::NaiveDate;
use tracing::info;

use super::due::{categorize, render_notifications};
use crate::db::Database;
use crate::models::ListScope;
use crate::utils::AppResult;

/// Builds the text for the periodic notification popup
pub struct NotificationService<'a> {
    db: &'a Database,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Render the message for `today` and record it as the last notification
    pub fn build_message(&self, today: NaiveDate) -> AppResult<String> {
        let users = self.db.users();
        let prefs = users.get()?;

        let reminders = self.db.reminders().find_all(ListScope::All, today)?;
        let categorized = categorize(&reminders, today);
        let message = render_notifications(Some(&categorized), &prefs);

        users.record_notification(today)?;
        info!(
            "Built notification for {} ({} reminders due)",
            today,
            categorized.total()
        );

        Ok(message)
    }
}
