pub mod modals;
pub mod state;
pub mod theme;
pub mod views;

pub use state::{AppState, ConfirmAction, StatusMessage, StatusType};
