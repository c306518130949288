use crate::core::aggregator::{aggregate_month, round_down_to_quantum};
use crate::core::month::MonthBounds;
use crate::db::pool::DbPool;
use crate::db::queries::{load_intervals_between, load_users};
use crate::errors::AppResult;
use crate::models::interval::Interval;
use crate::models::profile::Profile;
use crate::models::summary::{MonthlyReport, ShiftDetail, SummaryRow};

pub struct SummaryLogic;

impl SummaryLogic {
    /// Load profiles and shifts of `month` and aggregate them.
    pub fn build(pool: &mut DbPool, month: &MonthBounds, quantum_minutes: u32) -> AppResult<MonthlyReport> {
        let profiles = load_users(pool)?;
        let intervals = load_intervals_between(pool, &month.start, &month.end_exclusive)?;

        tracing::debug!(
            month = %month,
            profiles = profiles.len(),
            intervals = intervals.len(),
            "building monthly report"
        );

        Ok(Self::from_parts(month, quantum_minutes, &profiles, &intervals))
    }

    /// Pure part of [`SummaryLogic::build`].
    pub fn from_parts(
        month: &MonthBounds,
        quantum_minutes: u32,
        profiles: &[Profile],
        intervals: &[Interval],
    ) -> MonthlyReport {
        let rows = profiles
            .iter()
            .map(|p| SummaryRow {
                full_name: p.full_name.clone(),
                summary: aggregate_month(
                    &p.user_id,
                    intervals,
                    month.start,
                    month.end_exclusive,
                    quantum_minutes,
                ),
            })
            .collect();

        let details = intervals
            .iter()
            .filter(|i| month.contains(i.start))
            .filter_map(|i| {
                let end = i.end?;
                let raw_ms = i.duration_ms()?;
                let full_name = profiles
                    .iter()
                    .find(|p| p.user_id == i.user_id)
                    .map(|p| p.full_name.clone())
                    .unwrap_or_else(|| i.user_id.clone());

                Some(ShiftDetail {
                    user_id: i.user_id.clone(),
                    full_name,
                    start: i.start,
                    end,
                    raw_ms,
                    rounded_ms: round_down_to_quantum(raw_ms, quantum_minutes),
                })
            })
            .collect();

        MonthlyReport {
            month: month.label(),
            quantum_minutes,
            rows,
            details,
        }
    }
}
