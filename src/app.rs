//! Main window for Home Reminders

use std::time::{Duration, Instant};

use eframe::egui;

use crate::db::Database;
use crate::models::{AppSettings, ListScope};
use crate::services::{BackupService, DateWatcher, NotificationService, Ticker};
use crate::ui::{
    modals::{ConfirmDialog, ErrorDialog, NotificationPopup, PreferencesModal, ReminderFormModal},
    state::{AppState, ConfirmAction, StatusType},
    theme::{configure_style, Colors, Icons},
    views::ReminderListView,
};
use crate::utils::date::today;

const NOT_OPTED_IN: &str =
    "You are not currently receiving text notifications. Click opt-in to start.";

pub struct RemindersApp {
    db: Database,
    state: AppState,
    app_settings: AppSettings,

    reminder_list: ReminderListView,

    reminder_form_modal: ReminderFormModal,
    preferences_modal: PreferencesModal,

    date_watcher: DateWatcher,
    notification_ticker: Ticker,

    style_initialized: bool,
}

impl RemindersApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, db: Database, app_settings: AppSettings) -> Self {
        let today = today();
        let mut state = AppState::new(today);
        state.dark_mode = app_settings.dark_mode;

        let notification_ticker = Ticker::new(app_settings.notification_interval());

        Self {
            db,
            state,
            app_settings,
            reminder_list: ReminderListView::new(),
            reminder_form_modal: ReminderFormModal::new(),
            preferences_modal: PreferencesModal::new(),
            date_watcher: DateWatcher::new(today),
            notification_ticker,
            style_initialized: false,
        }
    }

    /// Midnight rollover and the periodic notification popup
    fn poll_timers(&mut self, ctx: &egui::Context) {
        let now = Instant::now();

        if let Some(date) = self.date_watcher.poll(now, today) {
            tracing::info!("Date changed to {}", date);
            self.state.today = date;
            self.state.list_dirty = true;
        }

        if self.notification_ticker.poll(now) {
            self.show_notifications();
        }

        // Keep repainting while idle so both timers are polled
        let next_wake = DateWatcher::CHECK_INTERVAL.min(self.notification_ticker.remaining(now));
        ctx.request_repaint_after(next_wake.max(Duration::from_millis(100)));
    }

    /// Build the popup text from the current data and open the popup
    fn show_notifications(&mut self) {
        match NotificationService::new(&self.db).build_message(self.state.today) {
            Ok(text) => self.state.show_notification(text),
            Err(e) => {
                tracing::error!("Could not build notifications: {}", e);
                self.state.show_error(&format!("Could not build notifications: {}", e));
            }
        }
    }

    /// Opt-in always opens the form, with a hint when already opted in
    fn opt_in(&mut self) {
        match self.db.users().get() {
            Ok(prefs) => {
                if prefs.is_opted_in() {
                    self.state.show_info("You are already opted in. You can change your preferences.");
                }
                self.state.show_preferences = true;
            }
            Err(e) => self.report_storage_error("Could not read preferences", e),
        }
    }

    fn opt_out(&mut self) {
        match self.db.users().get() {
            Ok(prefs) if prefs.is_opted_in() => {
                self.state.show_confirm(
                    "Stop receiving text notifications?",
                    ConfirmAction::OptOut,
                );
            }
            Ok(_) => self.state.show_info(NOT_OPTED_IN),
            Err(e) => self.report_storage_error("Could not read preferences", e),
        }
    }

    fn open_preferences(&mut self) {
        match self.db.users().get() {
            Ok(prefs) if prefs.is_opted_in() => self.state.show_preferences = true,
            Ok(_) => self.state.show_info(NOT_OPTED_IN),
            Err(e) => self.report_storage_error("Could not read preferences", e),
        }
    }

    /// Ask before restoring, naming the backup's date and size
    fn confirm_restore(&mut self) {
        match BackupService::new(&self.db).backup_info() {
            Ok(Some(info)) => {
                let taken = info.modified.as_deref().unwrap_or("unknown date");
                self.state.show_confirm(
                    &format!(
                        "All current data will be overwritten. Are you sure?\n\nBackup from {} ({})",
                        taken,
                        info.size_display()
                    ),
                    ConfirmAction::Restore,
                );
            }
            // Nothing to restore, so skip the confirmation
            Ok(None) => self.state.show_error("backup file not found"),
            Err(e) => {
                tracing::error!("Could not read backup: {:#}", e);
                self.state.show_error(&format!("Could not read backup: {:#}", e));
            }
        }
    }

    fn report_storage_error(&mut self, context: &str, e: crate::utils::AppError) {
        tracing::error!("{}: {}", context, e);
        self.state.show_error(&format!("{}: {}", context, e));
    }

    fn toggle_dark_mode(&mut self, ctx: &egui::Context) {
        self.state.dark_mode = !self.state.dark_mode;
        configure_style(ctx, self.state.dark_mode);

        // Persist; a failed save is only logged
        self.app_settings.dark_mode = self.state.dark_mode;
        if let Err(e) = self.app_settings.save() {
            tracing::warn!("Could not save settings: {:#}", e);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Notifications", |ui| {
                    if ui.button("Opt-in").clicked() {
                        self.opt_in();
                        ui.close_menu();
                    }
                    if ui.button("Opt-out").clicked() {
                        self.opt_out();
                        ui.close_menu();
                    }
                    if ui.button("Preferences").clicked() {
                        self.open_preferences();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Show now").clicked() {
                        self.show_notifications();
                        ui.close_menu();
                    }
                });

                // Scope and theme
                ui.menu_button("View", |ui| {
                    for scope in [ListScope::Pending, ListScope::All] {
                        if ui
                            .selectable_label(self.state.scope == scope, scope.label())
                            .clicked()
                        {
                            self.state.set_scope(scope);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    let mode = if self.state.dark_mode { "Light mode" } else { "Dark mode" };
                    if ui.button(mode).clicked() {
                        self.toggle_dark_mode(ui.ctx());
                        ui.close_menu();
                    }
                });

                // Every data action goes through the confirm dialog
                ui.menu_button("Data", |ui| {
                    if ui.button("Backup").clicked() {
                        self.state.show_confirm(
                            "The current backup will be overwritten. Are you sure?",
                            ConfirmAction::Backup,
                        );
                        ui.close_menu();
                    }
                    if ui.button("Restore").clicked() {
                        self.confirm_restore();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Delete All").clicked() {
                        self.state.show_confirm(
                            "This will delete all data. Are you sure?",
                            ConfirmAction::DeleteAll,
                        );
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .small()
                            .weak(),
                    );
                });
            });
        });
    }

    fn bottom_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let modal_open = self.state.any_modal_open();

                if ui
                    .add_enabled(!modal_open, egui::Button::new(format!("{} New Item", Icons::ADD)))
                    .clicked()
                {
                    self.state.open_new_reminder_form();
                }

                // Status line
                if let Some(ref status) = self.state.status_message {
                    let color = match status.status_type {
                        StatusType::Success => Colors::SUCCESS,
                        StatusType::Error => Colors::ERROR,
                        StatusType::Warning => Colors::WARNING,
                        StatusType::Info => Colors::INFO,
                    };
                    ui.separator();
                    ui.colored_label(color, &status.text);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(format!("{} Quit", Icons::QUIT)).clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn modals(&mut self, ctx: &egui::Context) {
        if self.state.show_reminder_form
            && self.reminder_form_modal.show(ctx, &mut self.state, &self.db)
        {
            self.state.close_reminder_form();
        }

        if self.state.show_preferences
            && self.preferences_modal.show(ctx, &mut self.state, &self.db)
        {
            self.state.show_preferences = false;
        }

        // Any confirmed action may have changed the rows
        if self.state.show_confirm_dialog {
            if let Some(true) = ConfirmDialog::show(ctx, &mut self.state, &self.db) {
                self.state.list_dirty = true;
            }
        }

        // Popups
        NotificationPopup::show(ctx, &mut self.state);
        ErrorDialog::show(ctx, &mut self.state);
    }
}

impl eframe::App for RemindersApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.style_initialized {
            configure_style(ctx, self.state.dark_mode);
            self.style_initialized = true;
        }

        self.state.clear_old_status();
        self.poll_timers(ctx);

        // Ctrl+F / Cmd+F focuses the search field
        if !self.state.any_modal_open() && ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::F)) {
            self.state.focus_search = true;
        }

        self.menu_bar(ctx);
        self.bottom_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.reminder_list.show(ui, &mut self.state, &self.db);
        });

        self.modals(ctx);
    }
}
