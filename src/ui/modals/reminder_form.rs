use egui::{self, RichText};

use crate::db::Database;
use crate::models::{Period, ReminderInput};
use crate::ui::{
    state::{AppState, ConfirmAction},
    theme::{Colors, Icons},
};
use crate::utils::date::format_date;
use crate::utils::AppError;

pub struct ReminderFormModal {
    form_data: ReminderInput,
    error_message: Option<String>,
    /// Reminder whose values are in `form_data`
    loaded_id: Option<i64>,
}

impl ReminderFormModal {
    pub fn new() -> Self {
        Self {
            form_data: ReminderInput::default(),
            error_message: None,
            loaded_id: None,
        }
    }

    /// Show the form; returns true when it should close
    pub fn show(&mut self, ctx: &egui::Context, state: &mut AppState, db: &Database) -> bool {
        let mut should_close = false;

        // Load the row once per edited id
        if let Some(id) = state.editing_reminder_id {
            if self.loaded_id != Some(id) {
                match db.reminders().find_by_id(id) {
                    Ok(Some(reminder)) => {
                        self.form_data = ReminderInput::from_reminder(&reminder);
                        self.loaded_id = Some(id);
                    }
                    Ok(None) => {
                        state.show_error("The selected reminder no longer exists.");
                        self.reset();
                        return true;
                    }
                    Err(e) => {
                        tracing::error!("Could not load reminder {}: {}", id, e);
                        state.show_error(&format!("Could not load reminder: {}", e));
                        self.reset();
                        return true;
                    }
                }
            }
        }

        let title = if state.editing_reminder_id.is_some() {
            "Edit Reminder"
        } else {
            "New Reminder"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(420.0);

                egui::Grid::new("reminder_form_grid")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Description:");
                        ui.text_edit_singleline(&mut self.form_data.description);
                        ui.end_row();

                        ui.label("Period:");
                        let selected = if self.form_data.period.is_empty() {
                            "Select..."
                        } else {
                            self.form_data.period.as_str()
                        };
                        egui::ComboBox::from_id_salt("reminder_period")
                            .selected_text(selected.to_string())
                            .width(120.0)
                            .show_ui(ui, |ui| {
                                for period in Period::all() {
                                    ui.selectable_value(
                                        &mut self.form_data.period,
                                        period.as_str().to_string(),
                                        period.as_str(),
                                    );
                                }
                            });
                        ui.end_row();

                        // One-time reminders always use frequency 1
                        let one_time = self.form_data.period == Period::OneTime.as_str();
                        ui.label("Frequency:");
                        ui.add_enabled(
                            !one_time,
                            egui::TextEdit::singleline(&mut self.form_data.frequency)
                                .hint_text(if one_time { "1" } else { "" })
                                .desired_width(60.0),
                        );
                        ui.end_row();

                        ui.label("Last date:");
                        ui.horizontal(|ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut self.form_data.date_last)
                                    .desired_width(100.0),
                            );
                            ui.label(RichText::new("YYYY-MM-DD").small().color(Colors::TEXT_MUTED));
                            if ui
                                .small_button(Icons::CALENDAR)
                                .on_hover_text("Use today's date")
                                .clicked()
                            {
                                self.form_data.date_last = format_date(state.today);
                            }
                        });
                        ui.end_row();

                        // Live preview; empty until the input validates
                        ui.label("Next date:");
                        let preview = self
                            .form_data
                            .validate()
                            .map(|r| r.date_next_display())
                            .unwrap_or_default();
                        ui.label(RichText::new(preview).color(Colors::TEXT_MUTED));
                        ui.end_row();

                        ui.label("Note:");
                        ui.text_edit_singleline(&mut self.form_data.note);
                        ui.end_row();
                    });

                if let Some(ref error) = self.error_message {
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).color(Colors::ERROR));
                }

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.reset();
                        should_close = true;
                    }

                    if let Some(id) = state.editing_reminder_id {
                        if ui
                            .button(RichText::new(format!("{} Delete", Icons::DELETE)).color(Colors::ERROR))
                            .clicked()
                        {
                            state.show_confirm(
                                "Are you sure you want to delete this reminder?",
                                ConfirmAction::DeleteReminder(id),
                            );
                            self.reset();
                            should_close = true;
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = if state.editing_reminder_id.is_some() {
                            format!("{} Update", Icons::SAVE)
                        } else {
                            format!("{} Save", Icons::SAVE)
                        };

                        if ui.button(label).clicked() {
                            match self.save(state, db) {
                                Ok(message) => {
                                    self.reset();
                                    should_close = true;
                                    state.list_dirty = true;
                                    state.show_success(message);
                                }
                                // Input problems stay inline; storage failures also get the error dialog
                                Err(e) => {
                                    if !e.is_user_error() {
                                        tracing::error!("Could not save reminder: {}", e);
                                        state.show_error(&format!("Could not save reminder: {}", e));
                                    }
                                    self.error_message = Some(e.to_string());
                                }
                            }
                        }
                    });
                });
            });

        should_close
    }

    /// Validate and write the form; the input stays in place on error
    fn save(&mut self, state: &mut AppState, db: &Database) -> Result<&'static str, AppError> {
        let mut reminder = self.form_data.validate()?;

        match state.editing_reminder_id {
            Some(id) => {
                reminder.id = Some(id);
                db.reminders().update(&mut reminder)?;
                Ok("Reminder updated")
            }
            None => {
                let id = db.reminders().create(&mut reminder)?;
                state.selected_reminder_id = Some(id);
                Ok("Reminder saved")
            }
        }
    }

    fn reset(&mut self) {
        self.form_data.clear();
        self.error_message = None;
        self.loaded_id = None;
    }
}

impl Default for ReminderFormModal {
    fn default() -> Self {
        Self::new()
    }
}
