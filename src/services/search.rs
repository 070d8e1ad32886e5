use thiserror::Error;

use crate::models::Reminder;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter search text.")]
    EmptyQuery,

    #[error("No matching items found.")]
    NoMatch,
}

/// "Find next" over the visible reminders, wrapping at the end
#[derive(Debug, Default, Clone)]
pub struct SearchCursor {
    query: String,
    current: Option<i64>,
}

impl SearchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the next reminder matching `query`.
    /// A new query starts again from the top of the list.
    pub fn find_next(&mut self, query: &str, reminders: &[Reminder]) -> Result<i64, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            self.reset();
            return Err(SearchError::EmptyQuery);
        }

        // Same comparison as `Reminder::matches`, so case-only edits keep the cycle
        if self.query.to_lowercase() != query.to_lowercase() {
            self.query = query.to_string();
            self.current = None;
        }

        let matches: Vec<i64> = reminders
            .iter()
            .filter(|r| r.matches(query))
            .filter_map(|r| r.id)
            .collect();

        let Some(&first) = matches.first() else {
            self.current = None;
            return Err(SearchError::NoMatch);
        };

        let next = self
            .current
            .and_then(|current| matches.iter().position(|&id| id == current))
            .and_then(|pos| matches.get(pos + 1).copied())
            .unwrap_or(first);

        self.current = Some(next);
        Ok(next)
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.current = None;
    }
}
