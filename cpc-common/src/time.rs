//! Date utilities

use chrono::{Local, NaiveDate};

/// Format used for `lastUpdated` and other catalog dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Render a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
    }

    #[test]
    fn test_today_is_recent() {
        let date = today();
        assert!(date > NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert!(date < NaiveDate::from_ymd_opt(2100, 1, 1).unwrap());
    }
}
