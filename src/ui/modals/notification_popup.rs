use egui::{self, RichText};

use crate::services::NO_NOTIFICATIONS;
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

pub struct NotificationPopup;

impl NotificationPopup {
    /// Show the latest notification text until dismissed
    pub fn show(ctx: &egui::Context, state: &mut AppState) {
        let Some(text) = state.notification.as_deref() else {
            return;
        };

        let mut open = true;
        let mut dismissed = false;

        egui::Window::new(format!("{} Notifications", Icons::BELL))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, [-16.0, 48.0])
            .show(ctx, |ui| {
                ui.set_min_width(280.0);

                if text == NO_NOTIFICATIONS {
                    ui.label("No notifications at this time.");
                } else {
                    for line in text.lines() {
                        match Self::line_fill(line) {
                            Some(fill) => {
                                egui::Frame::none()
                                    .fill(fill)
                                    .rounding(3.0)
                                    .inner_margin(egui::Margin::symmetric(4.0, 1.0))
                                    .show(ui, |ui| {
                                        ui.label(RichText::new(line).color(Colors::HIGHLIGHT_TEXT));
                                    });
                            }
                            None => {
                                ui.label(line);
                            }
                        }
                    }
                }

                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if !open || dismissed {
            state.notification = None;
        }
    }

    fn line_fill(line: &str) -> Option<egui::Color32> {
        if line.starts_with("• Past due:") {
            Some(Colors::PAST_DUE)
        } else if line.starts_with("• Due today:") {
            Some(Colors::DUE_TODAY)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_fill() {
        assert_eq!(NotificationPopup::line_fill("• Past due: Rent"), Some(Colors::PAST_DUE));
        assert_eq!(NotificationPopup::line_fill("• Due today: Trash"), Some(Colors::DUE_TODAY));
        assert_eq!(NotificationPopup::line_fill("• Due tomorrow: Plants"), None);
    }
}
