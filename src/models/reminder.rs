use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::period::{next_due_date, Period};
use crate::utils::date::{format_date, parse_date};

/// A one-time or repeating task with its computed next due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Option<i64>,
    pub description: String,
    pub frequency: u32,
    pub period: Option<Period>,
    pub date_last: NaiveDate,
    pub date_next: Option<NaiveDate>,
    pub note: String,
}

impl Reminder {
    pub fn new(
        description: impl Into<String>,
        frequency: u32,
        period: Period,
        date_last: NaiveDate,
        note: impl Into<String>,
    ) -> Self {
        let mut reminder = Self {
            id: None,
            description: description.into(),
            frequency,
            period: Some(period),
            date_last,
            date_next: None,
            note: note.into(),
        };
        reminder.recompute_next();
        reminder
    }

    /// Re-derive `date_next` from `date_last`, `frequency` and `period`.
    /// One-time reminders always carry frequency 1.
    pub fn recompute_next(&mut self) {
        if self.period == Some(Period::OneTime) {
            self.frequency = 1;
        }
        self.date_next = next_due_date(self.date_last, self.frequency, self.period);
    }

    pub fn period_display(&self) -> &'static str {
        self.period.map(|p| p.as_str()).unwrap_or("")
    }

    pub fn date_last_display(&self) -> String {
        format_date(self.date_last)
    }

    pub fn date_next_display(&self) -> String {
        self.date_next.map(format_date).unwrap_or_default()
    }

    /// Column values in table order (id, item, frequency, period, last, next, note)
    pub fn display_columns(&self) -> [String; 7] {
        [
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.description.clone(),
            self.frequency.to_string(),
            self.period_display().to_string(),
            self.date_last_display(),
            self.date_next_display(),
            self.note.clone(),
        ]
    }

    /// Case-insensitive substring match over every displayed column
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.display_columns()
            .iter()
            .any(|value| value.to_lowercase().contains(&query))
    }
}

/// Which reminders the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListScope {
    /// Due today, in the future, or not yet scheduled
    #[default]
    Pending,
    All,
}

impl ListScope {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending items",
            Self::All => "All items",
        }
    }
}

/// Raw form input for creating or editing a reminder
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReminderInput {
    pub description: String,
    pub frequency: String,
    pub period: String,
    pub date_last: String,
    pub note: String,
}

impl ReminderInput {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn from_reminder(reminder: &Reminder) -> Self {
        Self {
            description: reminder.description.clone(),
            frequency: reminder.frequency.to_string(),
            period: reminder.period_display().to_string(),
            date_last: reminder.date_last_display(),
            note: reminder.note.clone(),
        }
    }

    /// Check the input and build a reminder with its next date computed.
    /// Uniqueness of the description is checked by the repository.
    pub fn validate(&self) -> Result<Reminder, ReminderValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ReminderValidationError::BlankDescription);
        }

        let period = Period::from_db_str(&self.period).ok_or(ReminderValidationError::MissingPeriod)?;

        let frequency = if period == Period::OneTime {
            1
        } else {
            parse_frequency(&self.frequency)?
        };

        if self.date_last.trim().is_empty() {
            return Err(ReminderValidationError::MissingLastDate);
        }
        let date_last = parse_date(&self.date_last).ok_or(ReminderValidationError::InvalidLastDate)?;

        let reminder = Reminder::new(description, frequency, period, date_last, self.note.trim());
        if reminder.date_next.is_none() {
            return Err(ReminderValidationError::FrequencyTooLarge);
        }
        Ok(reminder)
    }
}

fn parse_frequency(s: &str) -> Result<u32, ReminderValidationError> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(ReminderValidationError::InvalidFrequency);
    }
    match s.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ReminderValidationError::InvalidFrequency),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReminderValidationError {
    #[error("Description cannot be blank.")]
    BlankDescription,
    #[error("Please enter frequency as a whole number of at least 1.")]
    InvalidFrequency,
    #[error("Frequency is too large, the next date would be out of range.")]
    FrequencyTooLarge,
    #[error("Please select the period.")]
    MissingPeriod,
    #[error("Please enter a valid last date.")]
    MissingLastDate,
    #[error("Invalid last date format, please enter a valid last date (YYYY-MM-DD).")]
    InvalidLastDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(description: &str, frequency: &str, period: &str, date_last: &str) -> ReminderInput {
        ReminderInput {
            description: description.into(),
            frequency: frequency.into(),
            period: period.into(),
            date_last: date_last.into(),
            note: String::new(),
        }
    }

    #[test]
    fn test_valid_input_computes_next_date() {
        let reminder = input("test", "2", "weeks", "2025-01-01").validate().unwrap();
        assert_eq!(reminder.description, "test");
        assert_eq!(reminder.frequency, 2);
        assert_eq!(reminder.period, Some(Period::Weeks));
        assert_eq!(reminder.date_next_display(), "2025-01-15");
    }

    #[test]
    fn test_invalid_inputs() {
        let cases = [
            (input("", "2", "weeks", "2025-01-01"), ReminderValidationError::BlankDescription),
            (input("   ", "2", "weeks", "2025-01-01"), ReminderValidationError::BlankDescription),
            (input("test", "", "weeks", "2025-01-01"), ReminderValidationError::InvalidFrequency),
            (input("test", "-1", "weeks", "2025-01-01"), ReminderValidationError::InvalidFrequency),
            (input("test", "0", "weeks", "2025-01-01"), ReminderValidationError::InvalidFrequency),
            (input("test", "1.5", "weeks", "2025-01-01"), ReminderValidationError::InvalidFrequency),
            (input("test", "2", "weeks", ""), ReminderValidationError::MissingLastDate),
            (input("test", "2", "weeks", "invalid-date"), ReminderValidationError::InvalidLastDate),
            (input("test", "2", "", "2025-01-01"), ReminderValidationError::MissingPeriod),
            (input("test", "2", "fortnights", "2025-01-01"), ReminderValidationError::MissingPeriod),
            (input("", "", "", ""), ReminderValidationError::BlankDescription),
        ];

        for (case, expected) in cases {
            assert_eq!(case.validate(), Err(expected), "input: {:?}", case);
        }
    }

    #[test]
    fn test_frequency_past_calendar_range_is_rejected() {
        for (frequency, period) in [("4294967295", "days"), ("4294967295", "months"), ("300000", "years")] {
            let result = input("far future", frequency, period, "2025-01-01").validate();
            assert_eq!(result, Err(ReminderValidationError::FrequencyTooLarge), "{} {}", frequency, period);
        }

        // Large but representable
        let reminder = input("far future", "100", "years", "2025-01-01").validate().unwrap();
        assert_eq!(reminder.date_next_display(), "2125-01-01");
    }

    #[test]
    fn test_one_time_forces_frequency_one() {
        let reminder = input("dentist", "", "one-time", "2025-06-10").validate().unwrap();
        assert_eq!(reminder.frequency, 1);
        assert_eq!(reminder.date_next, Some(reminder.date_last));

        let reminder = input("dentist", "5", "one-time", "2025-06-10").validate().unwrap();
        assert_eq!(reminder.frequency, 1);
    }

    #[test]
    fn test_recompute_after_change() {
        let mut reminder = input("rent", "1", "months", "2025-01-31").validate().unwrap();
        assert_eq!(reminder.date_next_display(), "2025-02-28");

        reminder.date_last = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        reminder.recompute_next();
        assert_eq!(reminder.date_next_display(), "2025-03-28");
    }

    #[test]
    fn test_matches_any_column() {
        let mut reminder = input("Change furnace filter", "3", "months", "2025-01-01")
            .validate()
            .unwrap();
        reminder.id = Some(42);
        reminder.note = "Size 16x25".into();

        assert!(reminder.matches("FURNACE"));
        assert!(reminder.matches("16x25"));
        assert!(reminder.matches("2025-04-01"));
        assert!(reminder.matches("42"));
        assert!(!reminder.matches("gutter"));
    }

    #[test]
    fn test_input_roundtrip_from_reminder() {
        let original = input("water plants", "3", "days", "2025-05-05");
        let reminder = original.validate().unwrap();
        assert_eq!(ReminderInput::from_reminder(&reminder), original);
    }
}
