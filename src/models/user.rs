use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Notification opt-in state (at most one row in the database)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    /// Empty means opted out
    pub phone_number: String,
    pub week_before: bool,
    pub day_before: bool,
    pub day_of: bool,
    pub last_notification_date: NaiveDate,
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            phone_number: String::new(),
            week_before: false,
            day_before: false,
            day_of: false,
            last_notification_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default(),
        }
    }
}

impl UserPreference {
    pub fn is_opted_in(&self) -> bool {
        !self.phone_number.is_empty()
    }
}

/// Raw form input for the preferences dialog
#[derive(Debug, Default, Clone)]
pub struct PreferenceInput {
    pub phone_number: String,
    pub week_before: bool,
    pub day_before: bool,
    pub day_of: bool,
}

impl PreferenceInput {
    pub fn from_preference(prefs: &UserPreference) -> Self {
        Self {
            phone_number: prefs.phone_number.clone(),
            week_before: prefs.week_before,
            day_before: prefs.day_before,
            day_of: prefs.day_of,
        }
    }

    /// Build the replacement preference row, keeping the last notification date
    pub fn validate(&self, current: &UserPreference) -> Result<UserPreference, PreferenceValidationError> {
        let phone_number = self.phone_number.trim();
        validate_phone_number(phone_number)?;

        Ok(UserPreference {
            phone_number: phone_number.to_string(),
            week_before: self.week_before,
            day_before: self.day_before,
            day_of: self.day_of,
            last_notification_date: current.last_notification_date,
        })
    }
}

pub fn validate_phone_number(num: &str) -> Result<(), PreferenceValidationError> {
    if num.len() == 10 && num.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PreferenceValidationError::InvalidPhoneNumber)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceValidationError {
    #[error("Phone number must be a ten digit numeric.")]
    InvalidPhoneNumber,
}
