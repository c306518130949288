//! Calendar month boundaries.
//!
//! Boundaries are computed in UTC: a shift belongs to the month in which its
//! clock-in falls, as seen from UTC, whatever the local zone of the machine.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use std::fmt;

const MAX_YEAR: i32 = 9998;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBounds {
    pub year: i32,
    pub month: u32,
    pub start: DateTime<Utc>,
    pub end_exclusive: DateTime<Utc>,
}

impl MonthBounds {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
        let (ny, nm) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end_exclusive = Utc.with_ymd_and_hms(ny, nm, 1, 0, 0, 0).single()?;

        Some(Self {
            year,
            month,
            start,
            end_exclusive,
        })
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidMonth(s.to_string());
        let raw = s.trim();

        let (y, m) = raw.split_once('-').ok_or_else(invalid)?;
        let digits =
            |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(y, 4) || !digits(m, 2) {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        // the month after must still print as a four-digit year
        if year > MAX_YEAR {
            return Err(invalid());
        }

        Self::new(year, month).ok_or_else(invalid)
    }

    pub fn current() -> Self {
        Self::containing(Utc::now())
    }

    pub fn containing(ts: DateTime<Utc>) -> Self {
        // the first day of an existing month is always representable
        Self::new(ts.year(), ts.month()).unwrap_or(Self {
            year: ts.year(),
            month: ts.month(),
            start: ts,
            end_exclusive: ts,
        })
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts < self.end_exclusive
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month() {
        let m = MonthBounds::parse("2025-09").unwrap();
        assert_eq!(m.start, Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap());
        assert_eq!(
            m.end_exclusive,
            Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(m.label(), "2025-09");
    }

    #[test]
    fn december_rolls_over() {
        let m = MonthBounds::parse("2024-12").unwrap();
        assert_eq!(
            m.end_exclusive,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        for bad in [
            "2025-13", "2025-00", "2025", "25-09", "2025-9", "abcd-ef", "", "+123-09", "2025-+9",
            "9999-01", "9999-12",
        ] {
            assert!(
                matches!(MonthBounds::parse(bad), Err(AppError::InvalidMonth(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_the_extreme_years() {
        assert_eq!(MonthBounds::parse("0000-01").unwrap().label(), "0000-01");

        let last = MonthBounds::parse("9998-12").unwrap();
        assert_eq!(
            last.end_exclusive,
            Utc.with_ymd_and_hms(9999, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn contains_is_half_open() {
        let m = MonthBounds::parse("2025-02").unwrap();
        assert!(m.contains(m.start));
        assert!(!m.contains(m.end_exclusive));
        assert!(m.contains(m.end_exclusive - chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn containing_finds_the_month() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 59).unwrap();
        assert_eq!(MonthBounds::containing(ts).label(), "2026-03");
    }
}
