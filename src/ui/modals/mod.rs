pub mod confirm_dialog;
pub mod error_dialog;
pub mod notification_popup;
pub mod preferences;
pub mod reminder_form;

pub use confirm_dialog::ConfirmDialog;
pub use error_dialog::ErrorDialog;
pub use notification_popup::NotificationPopup;
pub use preferences::PreferencesModal;
pub use reminder_form::ReminderFormModal;
