//! Home Reminders - Entry Point

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use eframe::egui;

use home_reminders::{AppSettings, Database, RemindersApp};

fn open_database(settings: &AppSettings) -> anyhow::Result<Database> {
    let db_path = settings.database_path();
    tracing::info!("Opening database: {:?}", db_path);

    let db = Database::open(&db_path)
        .with_context(|| format!("Could not open database {:?}", db_path))?;
    db.migrate().context("Could not migrate database")?;
    Ok(db)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    tracing::info!("Starting Home Reminders v{}", env!("CARGO_PKG_VERSION"));

    let settings = AppSettings::load();

    let db = match open_database(&settings) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Home Reminders v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([720.0, 420.0])
            .with_app_id("home-reminders"),
        ..Default::default()
    };

    eframe::run_native(
        "Home Reminders",
        options,
        Box::new(move |cc| Ok(Box::new(RemindersApp::new(cc, db, settings)))),
    )
}
