use egui::{self, RichText};

use crate::db::Database;
use crate::models::PreferenceInput;
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::AppResult;

/// Phone number and notification horizons
pub struct PreferencesModal {
    form_data: PreferenceInput,
    error_message: Option<String>,
    loaded: bool,
}

impl PreferencesModal {
    pub fn new() -> Self {
        Self {
            form_data: PreferenceInput::default(),
            error_message: None,
            loaded: false,
        }
    }

    /// Show the form; returns true when it should close
    pub fn show(&mut self, ctx: &egui::Context, state: &mut AppState, db: &Database) -> bool {
        let mut should_close = false;

        if !self.loaded {
            match db.users().get() {
                Ok(prefs) => {
                    self.form_data = PreferenceInput::from_preference(&prefs);
                    self.loaded = true;
                }
                Err(e) => {
                    tracing::error!("Could not load preferences: {}", e);
                    state.show_error(&format!("Could not load preferences: {}", e));
                    return true;
                }
            }
        }

        egui::Window::new("Notification Preferences")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(340.0);

                egui::Grid::new("preferences_grid")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Phone number:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form_data.phone_number)
                                .hint_text("10 digits")
                                .desired_width(140.0),
                        );
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.label(RichText::new("Notify me:").strong());
                ui.checkbox(&mut self.form_data.week_before, "A week before");
                ui.checkbox(&mut self.form_data.day_before, "A day before");
                ui.checkbox(&mut self.form_data.day_of, "On the day");
                ui.label(
                    RichText::new("Past due items are always included.")
                        .small()
                        .color(Colors::TEXT_MUTED),
                );

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

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(format!("{} Save", Icons::SAVE)).clicked() {
                            match self.save(db) {
                                Ok(()) => {
                                    self.reset();
                                    should_close = true;
                                    state.show_success("Notification preferences saved");
                                }
                                Err(e) => {
                                    if !e.is_user_error() {
                                        tracing::error!("Could not save preferences: {}", e);
                                        state.show_error(&format!("Could not save preferences: {}", e));
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

    /// Keeps `last_notification_date` from the stored row
    fn save(&self, db: &Database) -> AppResult<()> {
        let users = db.users();
        let current = users.get()?;
        let prefs = self.form_data.validate(&current)?;
        users.save(&prefs)
    }

    fn reset(&mut self) {
        self.form_data = PreferenceInput::default();
        self.error_message = None;
        self.loaded = false;
    }
}

impl Default for PreferencesModal {
    fn default() -> Self {
        Self::new()
    }
}
