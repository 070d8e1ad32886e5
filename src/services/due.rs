//! Due-date categorization and notification text
//!
//! Pure functions over reminders and a caller-supplied "today".

use chrono::{Days, NaiveDate};

use crate::models::{Reminder, UserPreference};

/// Text used when nothing qualifies for the notification message
pub const NO_NOTIFICATIONS: &str = "No notifications.";

/// Reminders grouped by notification horizon, each in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedReminders {
    pub past_due: Vec<Reminder>,
    pub due_today: Vec<Reminder>,
    pub due_tomorrow: Vec<Reminder>,
    pub due_in_week: Vec<Reminder>,
}

impl CategorizedReminders {
    pub fn is_empty(&self) -> bool {
        self.past_due.is_empty()
            && self.due_today.is_empty()
            && self.due_tomorrow.is_empty()
            && self.due_in_week.is_empty()
    }

    pub fn total(&self) -> usize {
        self.past_due.len() + self.due_today.len() + self.due_tomorrow.len() + self.due_in_week.len()
    }
}

/// Sort reminders into the four horizons relative to `today`.
///
/// Reminders due 2 to 6 days out, more than a week out, or without a
/// next date fall into no bucket.
pub fn categorize(reminders: &[Reminder], today: NaiveDate) -> CategorizedReminders {
    let tomorrow = today.checked_add_days(Days::new(1));
    let in_week = today.checked_add_days(Days::new(7));

    let mut result = CategorizedReminders::default();

    for reminder in reminders {
        let Some(next) = reminder.date_next else {
            continue;
        };

        if next < today {
            result.past_due.push(reminder.clone());
        } else if next == today {
            result.due_today.push(reminder.clone());
        } else if Some(next) == tomorrow {
            result.due_tomorrow.push(reminder.clone());
        } else if Some(next) == in_week {
            result.due_in_week.push(reminder.clone());
        }
    }

    result
}

/// Render the bullet list shown in the notification popup.
///
/// Past-due lines are always included; the other horizons follow the
/// user's preference flags.
pub fn render_notifications(categorized: Option<&CategorizedReminders>, prefs: &UserPreference) -> String {
    let Some(categorized) = categorized.filter(|c| !c.is_empty()) else {
        return NO_NOTIFICATIONS.to_string();
    };

    let sections: [(&str, &[Reminder], bool); 4] = [
        ("Past due", &categorized.past_due, true),
        ("Due today", &categorized.due_today, prefs.day_of),
        ("Due tomorrow", &categorized.due_tomorrow, prefs.day_before),
        ("Due in 7 days", &categorized.due_in_week, prefs.week_before),
    ];

    let lines: Vec<String> = sections
        .iter()
        .filter(|(_, _, enabled)| *enabled)
        .flat_map(|(label, reminders, _)| {
            reminders
                .iter()
                .map(move |r| format!("• {}: {}", label, r.description))
        })
        .collect();

    if lines.is_empty() {
        NO_NOTIFICATIONS.to_string()
    } else {
        lines.join("\n")
    }
}

/// Background colour class for a row in the reminder list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHighlight {
    PastDue,
    DueToday,
    Unscheduled,
    Upcoming,
}

impl RowHighlight {
    pub fn for_date(date_next: Option<NaiveDate>, today: NaiveDate) -> Self {
        match date_next {
            None => Self::Unscheduled,
            Some(next) if next < today => Self::PastDue,
            Some(next) if next == today => Self::DueToday,
            Some(_) => Self::Upcoming,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PastDue => "Past due",
            Self::DueToday => "Due today",
            Self::Unscheduled => "No next date",
            Self::Upcoming => "Upcoming",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn due_on(description: &str, date_next: Option<NaiveDate>) -> Reminder {
        let mut r = Reminder::new(description, 1, Period::OneTime, d(2020, 1, 1), "");
        r.date_next = date_next;
        r
    }

    fn all_flags() -> UserPreference {
        UserPreference {
            phone_number: "5551234567".into(),
            week_before: true,
            day_before: true,
            day_of: true,
            ..Default::default()
        }
    }

    fn descriptions(reminders: &[Reminder]) -> Vec<&str> {
        reminders.iter().map(|r| r.description.as_str()).collect()
    }

    #[test]
    fn test_categorize_buckets() {
        let today = d(2025, 6, 15);
        let reminders = vec![
            due_on("yesterday", Some(d(2025, 6, 14))),
            due_on("today", Some(today)),
            due_on("tomorrow", Some(d(2025, 6, 16))),
            due_on("three days", Some(d(2025, 6, 18))),
            due_on("week", Some(d(2025, 6, 22))),
            due_on("eight days", Some(d(2025, 6, 23))),
            due_on("no date", None),
        ];

        let c = categorize(&reminders, today);
        assert_eq!(descriptions(&c.past_due), vec!["yesterday"]);
        assert_eq!(descriptions(&c.due_today), vec!["today"]);
        assert_eq!(descriptions(&c.due_tomorrow), vec!["tomorrow"]);
        assert_eq!(descriptions(&c.due_in_week), vec!["week"]);
        assert_eq!(c.total(), 4);
    }

    #[test]
    fn test_categorize_preserves_input_order() {
        let today = d(2025, 6, 15);
        let reminders = vec![
            due_on("z", Some(d(2025, 6, 1))),
            due_on("a", Some(d(2025, 5, 1))),
            due_on("m", Some(d(2025, 6, 10))),
        ];

        let c = categorize(&reminders, today);
        assert_eq!(descriptions(&c.past_due), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_categorize_empty_input() {
        let c = categorize(&[], d(2025, 6, 15));
        assert!(c.is_empty());
        assert_eq!(c, CategorizedReminders::default());
    }

    #[test]
    fn test_categorize_across_month_end() {
        let today = d(2025, 1, 31);
        let reminders = vec![
            due_on("tomorrow", Some(d(2025, 2, 1))),
            due_on("week", Some(d(2025, 2, 7))),
        ];

        let c = categorize(&reminders, today);
        assert_eq!(descriptions(&c.due_tomorrow), vec!["tomorrow"]);
        assert_eq!(descriptions(&c.due_in_week), vec!["week"]);
    }

    #[test]
    fn test_render_respects_flags() {
        let today = d(2025, 6, 15);
        let reminders = vec![
            due_on("Furnace filter", Some(d(2025, 6, 1))),
            due_on("Take out trash", Some(today)),
            due_on("Water plants", Some(d(2025, 6, 16))),
            due_on("Pay insurance", Some(d(2025, 6, 22))),
        ];
        let c = categorize(&reminders, today);

        let text = render_notifications(Some(&c), &all_flags());
        assert_eq!(
            text,
            "• Past due: Furnace filter\n\
             • Due today: Take out trash\n\
             • Due tomorrow: Water plants\n\
             • Due in 7 days: Pay insurance"
        );

        let only_day_of = UserPreference {
            day_of: true,
            ..Default::default()
        };
        assert_eq!(
            render_notifications(Some(&c), &only_day_of),
            "• Past due: Furnace filter\n• Due today: Take out trash"
        );
    }

    #[test]
    fn test_render_past_due_ignores_flags() {
        let today = d(2025, 6, 15);
        let c = categorize(&[due_on("Late", Some(d(2025, 6, 10)))], today);

        let text = render_notifications(Some(&c), &UserPreference::default());
        assert_eq!(text, "• Past due: Late");
    }

    #[test]
    fn test_render_no_notifications() {
        let prefs = all_flags();
        assert_eq!(render_notifications(None, &prefs), NO_NOTIFICATIONS);

        let empty = CategorizedReminders::default();
        assert_eq!(render_notifications(Some(&empty), &prefs), NO_NOTIFICATIONS);

        // Only disabled horizons have entries
        let today = d(2025, 6, 15);
        let c = categorize(&[due_on("Soon", Some(d(2025, 6, 16)))], today);
        assert_eq!(render_notifications(Some(&c), &UserPreference::default()), NO_NOTIFICATIONS);
    }

    #[test]
    fn test_row_highlight() {
        let today = d(2025, 6, 15);
        assert_eq!(RowHighlight::for_date(None, today), RowHighlight::Unscheduled);
        assert_eq!(RowHighlight::for_date(Some(d(2025, 6, 14)), today), RowHighlight::PastDue);
        assert_eq!(RowHighlight::for_date(Some(today), today), RowHighlight::DueToday);
        assert_eq!(RowHighlight::for_date(Some(d(2025, 6, 16)), today), RowHighlight::Upcoming);
    }
}
