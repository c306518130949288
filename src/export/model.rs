// src/export/model.rs

use crate::core::aggregator::format_duration_hhmm;
use crate::models::summary::{MonthlyReport, ShiftDetail, SummaryRow};
use crate::utils::time::format_local;
use serde::Serialize;

pub const SUMMARY_SHEET: &str = "Summary";
pub const DETAIL_SHEET: &str = "Detail";

/// How a column is typed in spreadsheet output. Text formats ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Count,
    DateTime,
    Duration,
}

/// One named table of strings, the unit every export format consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub kinds: Vec<ColumnKind>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Kind of column `col`; columns without a declared kind are text.
    pub fn kind(&self, col: usize) -> ColumnKind {
        self.kinds.get(col).copied().unwrap_or(ColumnKind::Text)
    }
}

fn rounded_header(quantum_minutes: u32) -> String {
    format!("Worked ({quantum_minutes}m)")
}

pub fn summary_sheet(report: &MonthlyReport) -> Sheet {
    Sheet {
        name: SUMMARY_SHEET.to_string(),
        headers: vec![
            "Name".to_string(),
            "Shifts".to_string(),
            "Worked (raw)".to_string(),
            rounded_header(report.quantum_minutes),
        ],
        kinds: vec![
            ColumnKind::Text,
            ColumnKind::Count,
            ColumnKind::Duration,
            ColumnKind::Duration,
        ],
        rows: report.rows.iter().map(summary_to_row).collect(),
    }
}

pub fn detail_sheet(report: &MonthlyReport) -> Sheet {
    Sheet {
        name: DETAIL_SHEET.to_string(),
        headers: vec![
            "Name".to_string(),
            "Start".to_string(),
            "End".to_string(),
            "Worked (raw)".to_string(),
            rounded_header(report.quantum_minutes),
        ],
        kinds: vec![
            ColumnKind::Text,
            ColumnKind::DateTime,
            ColumnKind::DateTime,
            ColumnKind::Duration,
            ColumnKind::Duration,
        ],
        rows: report.details.iter().map(detail_to_row).collect(),
    }
}

pub fn report_to_sheets(report: &MonthlyReport) -> Vec<Sheet> {
    vec![summary_sheet(report), detail_sheet(report)]
}

fn summary_to_row(r: &SummaryRow) -> Vec<String> {
    vec![
        r.full_name.clone(),
        r.summary.interval_count.to_string(),
        format_duration_hhmm(r.summary.raw_duration_ms),
        format_duration_hhmm(r.summary.rounded_duration_ms),
    ]
}

fn detail_to_row(d: &ShiftDetail) -> Vec<String> {
    vec![
        d.full_name.clone(),
        format_local(&d.start),
        format_local(&d.end),
        format_duration_hhmm(d.raw_ms),
        format_duration_hhmm(d.rounded_ms),
    ]
}

/// Flat JSON shape of a summary row.
#[derive(Serialize, Clone, Debug)]
pub struct SummaryExport {
    pub user_id: String,
    pub name: String,
    pub shifts: usize,
    pub worked_raw: String,
    pub worked_rounded: String,
    pub worked_raw_ms: i64,
    pub worked_rounded_ms: i64,
}

/// Flat JSON shape of a detail row. Timestamps stay in UTC.
#[derive(Serialize, Clone, Debug)]
pub struct DetailExport {
    pub user_id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub worked_raw: String,
    pub worked_rounded: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct ReportExport {
    pub month: String,
    pub quantum_minutes: u32,
    pub summary: Vec<SummaryExport>,
    pub detail: Vec<DetailExport>,
}

impl From<&MonthlyReport> for ReportExport {
    fn from(report: &MonthlyReport) -> Self {
        Self {
            month: report.month.clone(),
            quantum_minutes: report.quantum_minutes,
            summary: report
                .rows
                .iter()
                .map(|r| SummaryExport {
                    user_id: r.summary.user_id.clone(),
                    name: r.full_name.clone(),
                    shifts: r.summary.interval_count,
                    worked_raw: format_duration_hhmm(r.summary.raw_duration_ms),
                    worked_rounded: format_duration_hhmm(r.summary.rounded_duration_ms),
                    worked_raw_ms: r.summary.raw_duration_ms,
                    worked_rounded_ms: r.summary.rounded_duration_ms,
                })
                .collect(),
            detail: report
                .details
                .iter()
                .map(|d| DetailExport {
                    user_id: d.user_id.clone(),
                    name: d.full_name.clone(),
                    start: d.start.to_rfc3339(),
                    end: d.end.to_rfc3339(),
                    worked_raw: format_duration_hhmm(d.raw_ms),
                    worked_rounded: format_duration_hhmm(d.rounded_ms),
                })
                .collect(),
        }
    }
}
