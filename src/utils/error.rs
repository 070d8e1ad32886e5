use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// True for errors the user can fix by editing input
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::AlreadyExists(_))
    }
}

impl From<crate::models::ReminderValidationError> for AppError {
    fn from(e: crate::models::ReminderValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<crate::models::PreferenceValidationError> for AppError {
    fn from(e: crate::models::PreferenceValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReminderValidationError;

    #[test]
    fn test_validation_errors_are_user_errors() {
        let err: AppError = ReminderValidationError::BlankDescription.into();
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "Description cannot be blank.");

        let err = AppError::not_found("reminder 7");
        assert!(!err.is_user_error());
        assert_eq!(err.to_string(), "Not found: reminder 7");
    }
}
