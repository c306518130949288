//! One clock-in/clock-out pair, possibly still open.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub id: i64,
    pub user_id: String,
    pub start: DateTime<Utc>,    // ⇔ shifts.start_at (TEXT, RFC 3339 UTC)
    pub end: Option<DateTime<Utc>>, // ⇔ shifts.end_at (NULL while clocked in)
}

impl Interval {
    pub fn new(
        id: i64,
        user_id: impl Into<String>,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            start,
            end,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// `end - start` in milliseconds, `None` while the interval is open.
    /// Negative when the stored end precedes the start.
    pub fn duration_ms(&self) -> Option<i64> {
        self.end
            .map(|end| end.signed_duration_since(self.start).num_milliseconds())
    }
}
