//! Derived report rows. Nothing here is stored: every report is rebuilt
//! from the shifts table on request.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserMonthlySummary {
    pub user_id: String,
    pub raw_duration_ms: i64,
    pub rounded_duration_ms: i64,
    pub interval_count: usize,
}

/// Summary of one profile, with the name shown in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub full_name: String,
    pub summary: UserMonthlySummary,
}

/// One closed shift of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftDetail {
    pub user_id: String,
    pub full_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub raw_ms: i64,
    pub rounded_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    pub month: String,
    pub quantum_minutes: u32,
    pub rows: Vec<SummaryRow>,
    pub details: Vec<ShiftDetail>,
}
