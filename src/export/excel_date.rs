// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveDateTime};

pub(crate) const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm";

/// Excel serial number of a `YYYY-MM-DD HH:MM` cell, if the string is one.
pub(crate) fn parse_to_excel_datetime(s: &str) -> Option<f64> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .ok()
        .and_then(|dt| naive_datetime_to_excel_serial(&dt))
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    Some(days + secs / 86400.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_serials() {
        assert_eq!(parse_to_excel_datetime("1900-01-01 00:00"), Some(2.0));
        assert_eq!(parse_to_excel_datetime("2025-09-01 12:00"), Some(45901.5));
    }

    #[test]
    fn durations_are_not_dates() {
        assert_eq!(parse_to_excel_datetime("08:00"), None);
        assert_eq!(parse_to_excel_datetime("125:30"), None);
    }
}
