use egui::{self, RichText};

use crate::db::Database;
use crate::services::BackupService;
use crate::ui::{
    state::{AppState, ConfirmAction},
    theme::{Colors, Icons},
};
use crate::utils::path::display_path;

pub struct ConfirmDialog;

impl ConfirmDialog {
    /// Show the dialog; Some(true) once the action was confirmed and run,
    /// Some(false) when declined
    pub fn show(ctx: &egui::Context, state: &mut AppState, db: &Database) -> Option<bool> {
        if !state.show_confirm_dialog {
            return None;
        }

        let mut result = None;

        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);

                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(Icons::WARNING).size(32.0).color(Colors::WARNING));
                    ui.add_space(8.0);
                    ui.label(&state.confirm_dialog_message);
                });

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("No").clicked() {
                        state.close_confirm();
                        result = Some(false);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(RichText::new("Yes").color(Colors::ERROR)).clicked() {
                            if let Some(action) = state.confirm_dialog_action.clone() {
                                Self::execute_action(&action, state, db);
                            }
                            state.close_confirm();
                            result = Some(true);
                        }
                    });
                });
            });

        result
    }

    /// Run the confirmed action and report the outcome in `state`
    pub fn execute_action(action: &ConfirmAction, state: &mut AppState, db: &Database) {
        match action {
            ConfirmAction::DeleteReminder(id) => match db.reminders().delete(*id) {
                Ok(()) => {
                    state.show_success("Reminder deleted");
                    if state.selected_reminder_id == Some(*id) {
                        state.selected_reminder_id = None;
                    }
                }
                Err(e) => {
                    tracing::error!("Could not delete reminder {}: {}", id, e);
                    state.show_error(&format!("Could not delete: {}", e));
                }
            },
            ConfirmAction::DeleteAll => match db.reminders().delete_all() {
                Ok(count) => {
                    state.selected_reminder_id = None;
                    state.show_success(&format!("Deleted {} reminders", count));
                }
                Err(e) => {
                    tracing::error!("Could not delete all reminders: {}", e);
                    state.show_error(&format!("Could not delete: {}", e));
                }
            },
            ConfirmAction::Backup => match BackupService::new(db).create_backup() {
                Ok(backup) => {
                    state.show_success(&format!(
                        "Backup saved to {} at {} ({})",
                        display_path(&backup.path),
                        backup.created_at,
                        backup.size_display()
                    ));
                }
                Err(e) => {
                    tracing::error!("Backup failed: {:#}", e);
                    state.show_error(&format!("Backup failed: {:#}", e));
                }
            },
            // Restore swaps the database file under the open connection
            ConfirmAction::Restore => match BackupService::new(db).restore_backup() {
                Ok(()) => {
                    state.selected_reminder_id = None;
                    state.show_success("Data restored from backup");
                }
                Err(e) => {
                    tracing::error!("Restore failed: {:#}", e);
                    state.show_error(&format!("Restore failed: {:#}", e));
                }
            },
            ConfirmAction::OptOut => match db.users().clear() {
                Ok(()) => state.show_success("You have opted out of text notifications."),
                Err(e) => {
                    tracing::error!("Could not opt out: {}", e);
                    state.show_error(&format!("Could not opt out: {}", e));
                }
            },
        }
    }
}
