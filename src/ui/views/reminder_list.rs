use egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::db::Database;
use crate::models::Reminder;
use crate::services::{RowHighlight, SearchCursor};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

const COLUMNS: [&str; 7] = ["Id", "Item", "Freq", "Period", "Last", "Next", "Note"];
const ROW_HEIGHT: f32 = 22.0;

pub struct ReminderListView {
    reminders: Vec<Reminder>,
    /// Rows in the table, whatever the scope
    total_count: i64,
    past_due_count: i64,
    search_query: String,
    search: SearchCursor,
    scroll_to_row: Option<usize>,
}

impl ReminderListView {
    pub fn new() -> Self {
        Self {
            reminders: Vec::new(),
            total_count: 0,
            past_due_count: 0,
            search_query: String::new(),
            search: SearchCursor::new(),
            scroll_to_row: None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, db: &Database) {
        if state.list_dirty {
            self.refresh(state, db);
            state.list_dirty = false;
        }

        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.heading(state.scope.label());
                ui.label(
                    RichText::new(self.count_label()).color(Colors::TEXT_MUTED),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} Today is {}",
                            Icons::CALENDAR,
                            state.today.format("%A, %B %-d, %Y")
                        ))
                        .strong(),
                    );
                });
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                self.search_bar(ui, state);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let edit = ui.add_enabled(
                        state.selected_reminder_id.is_some(),
                        egui::Button::new(format!("{} Edit", Icons::EDIT)),
                    );
                    if edit.clicked() {
                        if let Some(id) = state.selected_reminder_id {
                            state.open_edit_reminder_form(id);
                        }
                    }

                    if self.past_due_count > 0 {
                        ui.label(
                            RichText::new(format!("{} past due", self.past_due_count))
                                .color(Colors::WARNING),
                        );
                    }
                });
            });

            ui.add_space(4.0);
            Self::legend(ui);
            ui.separator();

            if self.reminders.is_empty() {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("No reminders to show.").color(Colors::TEXT_MUTED));
                });
            } else {
                self.table(ui, state);
            }
        });
    }

    fn count_label(&self) -> String {
        if self.reminders.len() as i64 == self.total_count {
            format!("{} items", self.total_count)
        } else {
            format!("{} of {} items", self.reminders.len(), self.total_count)
        }
    }

    fn search_bar(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        let search_id = egui::Id::new("reminder_search_field");
        if state.focus_search {
            ui.memory_mut(|m| m.request_focus(search_id));
            state.focus_search = false;
        }

        ui.label(Icons::SEARCH);
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.search_query)
                .id(search_id)
                .hint_text("Search...")
                .desired_width(200.0),
        );

        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Find Next").clicked() || submitted {
            self.find_next(state);
        }
    }

    /// Select the next match and scroll it into view
    fn find_next(&mut self, state: &mut AppState) {
        match self.search.find_next(&self.search_query, &self.reminders) {
            Ok(id) => {
                state.selected_reminder_id = Some(id);
                self.scroll_to_row = self.reminders.iter().position(|r| r.id == Some(id));
            }
            Err(e) => state.show_info(&e.to_string()),
        }
    }

    /// Colour key for the row highlights
    fn legend(ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for highlight in [RowHighlight::PastDue, RowHighlight::DueToday, RowHighlight::Unscheduled] {
                let Some(fill) = Colors::row_fill(highlight) else {
                    continue;
                };
                let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 2.0, fill);
                ui.label(RichText::new(highlight.label()).small());
                ui.add_space(8.0);
            }
        });
    }

    fn table(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        let today = state.today;
        let selected = state.selected_reminder_id;
        let mut clicked: Option<i64> = None;
        let mut double_clicked: Option<i64> = None;

        let mut table = TableBuilder::new(ui)
            .striped(false)
            .resizable(true)
            .sense(egui::Sense::click())
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(36.0))
            .column(Column::initial(240.0).at_least(120.0).clip(true))
            .column(Column::auto().at_least(40.0))
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder().clip(true))
            .min_scrolled_height(0.0);

        if let Some(row) = self.scroll_to_row.take() {
            table = table.scroll_to_row(row, Some(egui::Align::Center));
        }

        table
            .header(ROW_HEIGHT, |mut header| {
                for title in COLUMNS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, self.reminders.len(), |mut row| {
                    let reminder = &self.reminders[row.index()];
                    let is_selected = selected.is_some() && selected == reminder.id;
                    // Selection colour wins over the due-date highlight
                    let fill = if is_selected {
                        None
                    } else {
                        Colors::row_fill(RowHighlight::for_date(reminder.date_next, today))
                    };

                    row.set_selected(is_selected);

                    for value in reminder.display_columns() {
                        row.col(|ui| match fill {
                            Some(fill) => {
                                ui.painter().rect_filled(ui.max_rect(), 0.0, fill);
                                ui.label(RichText::new(value).color(Colors::HIGHLIGHT_TEXT));
                            }
                            None => {
                                ui.label(value);
                            }
                        });
                    }

                    let response = row.response();
                    if response.double_clicked() {
                        double_clicked = reminder.id;
                    } else if response.clicked() {
                        clicked = reminder.id;
                    }
                });
            });

        if let Some(id) = clicked {
            state.selected_reminder_id = Some(id);
        }
        if let Some(id) = double_clicked {
            state.open_edit_reminder_form(id);
        }
    }

    /// Reload the list for the current scope and date
    pub fn refresh(&mut self, state: &mut AppState, db: &Database) {
        let repo = db.reminders();

        match repo.find_all(state.scope, state.today) {
            Ok(reminders) => self.reminders = reminders,
            Err(e) => {
                tracing::error!("Could not load reminders: {}", e);
                state.show_error(&format!("Could not load reminders: {}", e));
                self.reminders.clear();
            }
        }

        self.total_count = repo.count().unwrap_or_else(|e| {
            tracing::warn!("Could not count reminders: {}", e);
            self.reminders.len() as i64
        });
        self.past_due_count = repo.count_past_due(state.today).unwrap_or_else(|e| {
            tracing::warn!("Could not count past due reminders: {}", e);
            0
        });

        // Drop a selection that is no longer listed
        if let Some(id) = state.selected_reminder_id {
            if !self.reminders.iter().any(|r| r.id == Some(id)) {
                state.selected_reminder_id = None;
            }
        }
    }
}

impl Default for ReminderListView {
    fn default() -> Self {
        Self::new()
    }
}
