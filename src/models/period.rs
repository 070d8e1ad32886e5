//! Recurrence units and the next-due-date calculation

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::date::format_date;

/// Recurrence granularity of a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    OneTime,
    Days,
    Weeks,
    Months,
    Years,
}

impl Period {
    pub fn all() -> &'static [Period] {
        &[
            Self::OneTime,
            Self::Days,
            Self::Weeks,
            Self::Months,
            Self::Years,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one-time",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }

    /// Parse the stored text form. Blank and unknown values have no period.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "one-time" => Some(Self::OneTime),
            "days" => Some(Self::Days),
            "weeks" => Some(Self::Weeks),
            "months" => Some(Self::Months),
            "years" => Some(Self::Years),
            _ => None,
        }
    }

    /// Advance `date` by `frequency` units of this period.
    ///
    /// Month and year steps keep the day of month and clamp to the last
    /// valid day (Jan 31 + 1 month = Feb 28/29, Feb 29 + 1 year = Feb 28).
    /// Returns `None` only when the result leaves chrono's date range.
    pub fn advance(&self, date: NaiveDate, frequency: u32) -> Option<NaiveDate> {
        match self {
            Self::OneTime => Some(date),
            Self::Days => date.checked_add_days(Days::new(u64::from(frequency))),
            Self::Weeks => date.checked_add_days(Days::new(7 * u64::from(frequency))),
            Self::Months => date.checked_add_months(Months::new(frequency)),
            Self::Years => frequency
                .checked_mul(12)
                .and_then(|months| date.checked_add_months(Months::new(months))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next occurrence of a reminder.
///
/// `None` for `period` means no recurrence has been configured yet, and the
/// result is then `None` as well.
pub fn next_due_date(date_last: NaiveDate, frequency: u32, period: Option<Period>) -> Option<NaiveDate> {
    period.and_then(|p| p.advance(date_last, frequency))
}

/// Same as [`next_due_date`] but formatted as `YYYY-MM-DD`, or an empty
/// string when there is no next date.
pub fn next_due_date_string(date_last: NaiveDate, frequency: u32, period: Option<Period>) -> String {
    next_due_date(date_last, frequency, period)
        .map(format_date)
        .unwrap_or_default()
}
