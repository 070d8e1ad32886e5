//! Timers driven from the UI frame loop

use std::time::{Duration, Instant};

use chrono::NaiveDate;

/// Interval gate: `poll` fires on first use and then once per interval
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// True when the interval has elapsed; the next interval starts at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last_fired {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };

        if due {
            self.last_fired = Some(now);
        }
        due
    }

    /// Time left until `poll` would fire
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_fired {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

/// Tracks the calendar date so the UI can refresh at midnight
#[derive(Debug, Clone)]
pub struct DateWatcher {
    today: NaiveDate,
    ticker: Ticker,
}

impl DateWatcher {
    pub const CHECK_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            ticker: Ticker::new(Self::CHECK_INTERVAL),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Re-read the date via `current` at most once per second.
    /// Returns the new date when it changed.
    pub fn poll<F>(&mut self, now: Instant, current: F) -> Option<NaiveDate>
    where
        F: FnOnce() -> NaiveDate,
    {
        if !self.ticker.poll(now) {
            return None;
        }

        let date = current();
        if date == self.today {
            return None;
        }

        self.today = date;
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_fires_first_then_each_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(10));

        assert!(ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_secs(5)));
        assert_eq!(ticker.remaining(start + Duration::from_secs(5)), Duration::from_secs(5));
        assert!(ticker.poll(start + Duration::from_secs(10)));
        assert!(!ticker.poll(start + Duration::from_secs(19)));
        assert!(ticker.poll(start + Duration::from_secs(25)));
    }

    #[test]
    fn test_ticker_survives_clock_going_backwards() {
        let start = Instant::now() + Duration::from_secs(100);
        let mut ticker = Ticker::new(Duration::from_secs(60));
        assert!(ticker.poll(start));

        let earlier = start - Duration::from_secs(30);
        assert!(!ticker.poll(earlier));
        assert_eq!(ticker.remaining(earlier), Duration::from_secs(60));
    }

    #[test]
    fn test_date_watcher_reports_change_once() {
        let day1 = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let start = Instant::now();
        let mut watcher = DateWatcher::new(day1);

        assert_eq!(watcher.poll(start, || day1), None);
        // Throttled: the closure is not consulted within the same second
        assert_eq!(watcher.poll(start + Duration::from_millis(500), || day2), None);
        assert_eq!(watcher.poll(start + Duration::from_secs(1), || day2), Some(day2));
        assert_eq!(watcher.today(), day2);
        assert_eq!(watcher.poll(start + Duration::from_secs(2), || day2), None);
    }
}
