use std::time::Instant;

use chrono::NaiveDate;

use crate::models::ListScope;

/// Shared state for the main window and its modals
#[derive(Debug)]
pub struct AppState {
    /// Local calendar date, refreshed by the date watcher
    pub today: NaiveDate,

    /// Which reminders the list shows
    pub scope: ListScope,

    /// Row highlighted in the list
    pub selected_reminder_id: Option<i64>,

    /// Reminder form (None = new reminder)
    pub show_reminder_form: bool,
    pub editing_reminder_id: Option<i64>,

    pub show_preferences: bool,

    pub show_confirm_dialog: bool,
    pub confirm_dialog_message: String,
    pub confirm_dialog_action: Option<ConfirmAction>,

    /// Text of the open notification popup
    pub notification: Option<String>,

    pub status_message: Option<StatusMessage>,

    /// Error shown in a modal until acknowledged
    pub error_dialog: Option<String>,

    /// Move keyboard focus to the search field next frame
    pub focus_search: bool,

    /// Reload the reminder list next frame
    pub list_dirty: bool,

    pub dark_mode: bool,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            scope: ListScope::default(),
            selected_reminder_id: None,
            show_reminder_form: false,
            editing_reminder_id: None,
            show_preferences: false,
            show_confirm_dialog: false,
            confirm_dialog_message: String::new(),
            confirm_dialog_action: None,
            notification: None,
            status_message: None,
            error_dialog: None,
            focus_search: false,
            list_dirty: true,
            dark_mode: false,
        }
    }

    pub fn set_scope(&mut self, scope: ListScope) {
        if self.scope != scope {
            self.scope = scope;
            self.list_dirty = true;
        }
    }

    pub fn open_new_reminder_form(&mut self) {
        self.editing_reminder_id = None;
        self.show_reminder_form = true;
    }

    pub fn open_edit_reminder_form(&mut self, reminder_id: i64) {
        self.selected_reminder_id = Some(reminder_id);
        self.editing_reminder_id = Some(reminder_id);
        self.show_reminder_form = true;
    }

    pub fn close_reminder_form(&mut self) {
        self.show_reminder_form = false;
        self.editing_reminder_id = None;
    }

    pub fn show_confirm(&mut self, message: &str, action: ConfirmAction) {
        self.confirm_dialog_message = message.to_string();
        self.confirm_dialog_action = Some(action);
        self.show_confirm_dialog = true;
    }

    pub fn close_confirm(&mut self) {
        self.show_confirm_dialog = false;
        self.confirm_dialog_action = None;
    }

    /// A new popup replaces any popup still open
    pub fn show_notification(&mut self, text: String) {
        self.notification = Some(text);
    }

    pub fn any_modal_open(&self) -> bool {
        self.show_reminder_form
            || self.show_preferences
            || self.show_confirm_dialog
            || self.error_dialog.is_some()
    }

    pub fn show_status(&mut self, message: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: message.to_string(),
            status_type,
            created_at: Instant::now(),
        });
    }

    pub fn show_success(&mut self, message: &str) {
        self.show_status(message, StatusType::Success);
    }

    pub fn show_info(&mut self, message: &str) {
        self.show_status(message, StatusType::Info);
    }

    /// Errors go to the status line and to a modal the user must dismiss
    pub fn show_error(&mut self, message: &str) {
        self.show_status(message, StatusType::Error);
        self.error_dialog = Some(message.to_string());
    }

    pub fn dismiss_error(&mut self) {
        self.error_dialog = None;
    }

    /// Drop the status message once it is more than five seconds old
    pub fn clear_old_status(&mut self) {
        if let Some(ref status) = self.status_message {
            if status.created_at.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }
}

/// Action run when the confirm dialog is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteReminder(i64),
    DeleteAll,
    Backup,
    Restore,
    OptOut,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub status_type: StatusType,
    pub created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Success,
    Error,
    Info,
    Warning,
}
