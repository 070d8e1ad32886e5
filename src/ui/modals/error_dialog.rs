use egui::{self, RichText};

use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

pub struct ErrorDialog;

impl ErrorDialog {
    pub fn show(ctx: &egui::Context, state: &mut AppState) {
        let Some(message) = state.error_dialog.as_deref() else {
            return;
        };

        let mut open = true;
        let mut dismissed = false;

        egui::Window::new("Error")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);

                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(Icons::WARNING).size(32.0).color(Colors::ERROR));
                    ui.add_space(8.0);
                    ui.label(message);
                    ui.add_space(16.0);

                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if !open || dismissed {
            state.dismiss_error();
        }
    }
}
