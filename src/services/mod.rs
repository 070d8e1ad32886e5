//! Services for Home Reminders
//!
//! Logic that belongs neither in the UI nor in the database layer.

pub mod backup;
pub mod due;
pub mod notifications;
pub mod scheduler;
pub mod search;

pub use backup::{BackupInfo, BackupResult, BackupService};
pub use due::{categorize, render_notifications, CategorizedReminders, RowHighlight, NO_NOTIFICATIONS};
pub use notifications::NotificationService;
pub use scheduler::{DateWatcher, Ticker};
pub use search::{SearchCursor, SearchError};
