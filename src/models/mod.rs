pub mod config;
pub mod period;
pub mod reminder;
pub mod user;

pub use config::*;
pub use period::*;
pub use reminder::*;
pub use user::*;
