use chrono::{Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict ISO date (YYYY-MM-DD)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Format a date the way it is stored and displayed
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(
            parse_date(" 2025-02-28 "),
            Some(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap())
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("invalid-date"), None);
        assert_eq!(parse_date("2025/01/01"), None);
        assert_eq!(parse_date("2025-02-30"), None);
    }

    #[test]
    fn test_format_date_pads() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(format_date(date), "2025-03-04");
    }
}
