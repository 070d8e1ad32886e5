//! Home Reminders - recurring household tasks with due-date notifications
//!
//! A native desktop application built with Rust and egui.

pub mod app;
pub mod db;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::RemindersApp;
pub use db::Database;
pub use models::*;
pub use ui::AppState;
