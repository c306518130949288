//! Duration rounding, HH:MM rendering and monthly aggregation.
//!
//! All durations are signed milliseconds. Rounding always moves toward
//! negative infinity, so a negative duration never rounds closer to zero.

use crate::models::interval::Interval;
use crate::models::summary::UserMonthlySummary;
use chrono::{DateTime, Utc};

pub const DEFAULT_QUANTUM_MINUTES: u32 = 15;

const MS_PER_MINUTE: i64 = 60 * 1000;

/// Largest multiple of `quantum_minutes` that is `<=` `duration_ms`.
///
/// A quantum of 0 leaves the duration untouched. Near `i64::MIN`, where the
/// floored bucket is not representable, the lowest representable multiple
/// is returned instead.
pub fn round_down_to_quantum(duration_ms: i64, quantum_minutes: u32) -> i64 {
    if quantum_minutes == 0 {
        return duration_ms;
    }
    let quantum_ms = i64::from(quantum_minutes) * MS_PER_MINUTE;
    duration_ms
        .div_euclid(quantum_ms)
        .checked_mul(quantum_ms)
        .unwrap_or((i64::MIN / quantum_ms) * quantum_ms)
}

/// Render a duration as `HH:MM`; hours are not wrapped at 24.
///
/// Minutes are floored, so `-1 ms` is `-00:01`.
pub fn format_duration_hhmm(duration_ms: i64) -> String {
    let total_minutes = duration_ms.div_euclid(MS_PER_MINUTE);
    let sign = if total_minutes < 0 { "-" } else { "" };
    let m = total_minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Totals of `user_id` over the closed intervals that start inside
/// `[month_start, month_end_exclusive)`.
///
/// Each interval is rounded on its own before being added to the rounded
/// total.
pub fn aggregate_month(
    user_id: &str,
    intervals: &[Interval],
    month_start: DateTime<Utc>,
    month_end_exclusive: DateTime<Utc>,
    quantum_minutes: u32,
) -> UserMonthlySummary {
    let mut summary = UserMonthlySummary {
        user_id: user_id.to_string(),
        ..Default::default()
    };

    for interval in intervals {
        if interval.user_id != user_id {
            continue;
        }
        if interval.start < month_start || interval.start >= month_end_exclusive {
            continue;
        }
        let Some(diff) = interval.duration_ms() else {
            continue;
        };

        if diff < 0 {
            tracing::warn!(
                interval = interval.id,
                user = user_id,
                diff_ms = diff,
                "interval ends before it starts"
            );
        }

        summary.raw_duration_ms = summary.raw_duration_ms.saturating_add(diff);
        summary.rounded_duration_ms = summary
            .rounded_duration_ms
            .saturating_add(round_down_to_quantum(diff, quantum_minutes));
        summary.interval_count += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const MIN: i64 = 60 * 1000;
    const HOUR: i64 = 60 * MIN;

    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, day, h, m, 0).unwrap()
    }

    fn sept() -> (DateTime<Utc>, DateTime<Utc>) {
        (at(1, 0, 0), Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn rounds_down_to_quarter_hours() {
        assert_eq!(round_down_to_quantum(0, 15), 0);
        assert_eq!(round_down_to_quantum(14 * MIN, 15), 0);
        assert_eq!(round_down_to_quantum(15 * MIN, 15), 15 * MIN);
        assert_eq!(round_down_to_quantum(29 * MIN, 15), 15 * MIN);
        assert_eq!(round_down_to_quantum(8 * HOUR + 7 * MIN, 15), 8 * HOUR);
        assert_eq!(round_down_to_quantum(15 * MIN - 1, 15), 0);
    }

    #[test]
    fn rounding_is_idempotent_and_bounded() {
        for x in (0..(3 * HOUR)).step_by(37_003) {
            let once = round_down_to_quantum(x, 15);
            assert_eq!(round_down_to_quantum(once, 15), once);
            assert!(x - once >= 0);
            assert!(x - once < 15 * MIN);
        }
    }

    #[test]
    fn negative_durations_round_away_from_zero() {
        assert_eq!(round_down_to_quantum(-1, 15), -15 * MIN);
        assert_eq!(round_down_to_quantum(-15 * MIN, 15), -15 * MIN);
        assert_eq!(round_down_to_quantum(-16 * MIN, 15), -30 * MIN);
    }

    #[test]
    fn extreme_negative_durations_do_not_overflow() {
        let q = 15 * MIN;
        let lowest = (i64::MIN / q) * q;

        assert_eq!(round_down_to_quantum(i64::MIN + 1, 15), lowest);
        assert_eq!(round_down_to_quantum(i64::MIN, 15), lowest);
        assert_eq!(round_down_to_quantum(lowest, 15), lowest);
        assert!(round_down_to_quantum(i64::MIN + 1, 15) <= 0);
        assert_eq!(round_down_to_quantum(i64::MAX, 15), (i64::MAX / q) * q);
    }

    #[test]
    fn other_quanta() {
        assert_eq!(round_down_to_quantum(59 * MIN, 30), 30 * MIN);
        assert_eq!(round_down_to_quantum(61 * MIN, 60), 60 * MIN);
        assert_eq!(round_down_to_quantum(7 * MIN + 5, 0), 7 * MIN + 5);
    }

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_duration_hhmm(90 * MIN), "01:30");
        assert_eq!(format_duration_hhmm(0), "00:00");
        assert_eq!(format_duration_hhmm(25 * HOUR), "25:00");
        assert_eq!(format_duration_hhmm(125 * HOUR + 5 * MIN), "125:05");
        assert_eq!(format_duration_hhmm(MIN - 1), "00:00");
    }

    #[test]
    fn formats_negative_durations_with_floored_minutes() {
        assert_eq!(format_duration_hhmm(-1), "-00:01");
        assert_eq!(format_duration_hhmm(-MIN), "-00:01");
        assert_eq!(format_duration_hhmm(-90 * MIN), "-01:30");
    }

    #[test]
    fn rounds_each_interval_before_summing() {
        let (start, end) = sept();
        let intervals = vec![
            Interval::new(1, "eva", at(1, 9, 0), Some(at(1, 17, 7))),
            Interval::new(2, "eva", at(2, 9, 0), Some(at(2, 13, 0))),
        ];

        let s = aggregate_month("eva", &intervals, start, end, 15);

        assert_eq!(s.raw_duration_ms, 12 * HOUR + 7 * MIN);
        assert_eq!(s.rounded_duration_ms, 12 * HOUR);
        assert_eq!(s.interval_count, 2);
        assert_eq!(format_duration_hhmm(s.raw_duration_ms), "12:07");
        assert_eq!(format_duration_hhmm(s.rounded_duration_ms), "12:00");
    }

    #[test]
    fn per_interval_rounding_differs_from_rounding_the_sum() {
        let (start, end) = sept();
        // 4h10m + 4h10m = 8h20m; the sum would round to 8h15m.
        let intervals = vec![
            Interval::new(1, "eva", at(3, 8, 0), Some(at(3, 12, 10))),
            Interval::new(2, "eva", at(3, 13, 0), Some(at(3, 17, 10))),
        ];

        let s = aggregate_month("eva", &intervals, start, end, 15);

        assert_eq!(s.raw_duration_ms, 8 * HOUR + 20 * MIN);
        assert_eq!(round_down_to_quantum(s.raw_duration_ms, 15), 8 * HOUR + 15 * MIN);
        assert_eq!(s.rounded_duration_ms, 8 * HOUR);
    }

    #[test]
    fn open_intervals_are_not_counted() {
        let (start, end) = sept();
        let intervals = vec![
            Interval::new(1, "eva", at(4, 9, 0), Some(at(4, 10, 0))),
            Interval::new(2, "eva", at(5, 9, 0), None),
        ];

        let s = aggregate_month("eva", &intervals, start, end, 15);

        assert_eq!(s.interval_count, 1);
        assert_eq!(s.raw_duration_ms, HOUR);
        assert_eq!(s.rounded_duration_ms, HOUR);
    }

    #[test]
    fn intervals_outside_the_month_are_ignored() {
        let (start, end) = sept();
        let before = Utc.with_ymd_and_hms(2025, 8, 31, 22, 0, 0).unwrap();
        let intervals = vec![
            // starts in August, ends in September
            Interval::new(1, "eva", before, Some(at(1, 2, 0))),
            // starts exactly at the exclusive end
            Interval::new(2, "eva", end, Some(end + chrono::Duration::hours(1))),
            // starts exactly at the inclusive start
            Interval::new(3, "eva", start, Some(at(1, 0, 45))),
        ];

        let s = aggregate_month("eva", &intervals, start, end, 15);

        assert_eq!(s.interval_count, 1);
        assert_eq!(s.raw_duration_ms, 45 * MIN);
    }

    #[test]
    fn other_users_are_ignored() {
        let (start, end) = sept();
        let intervals = vec![
            Interval::new(1, "eva", at(6, 9, 0), Some(at(6, 10, 0))),
            Interval::new(2, "jan", at(6, 9, 0), Some(at(6, 18, 0))),
        ];

        let s = aggregate_month("jan", &intervals, start, end, 15);

        assert_eq!(s.user_id, "jan");
        assert_eq!(s.interval_count, 1);
        assert_eq!(s.raw_duration_ms, 9 * HOUR);
    }

    #[test]
    fn malformed_interval_flows_through_as_negative() {
        let (start, end) = sept();
        let intervals = vec![Interval::new(1, "eva", at(7, 10, 0), Some(at(7, 9, 50)))];

        let s = aggregate_month("eva", &intervals, start, end, 15);

        assert_eq!(s.interval_count, 1);
        assert_eq!(s.raw_duration_ms, -10 * MIN);
        assert_eq!(s.rounded_duration_ms, -15 * MIN);
        assert_eq!(format_duration_hhmm(s.rounded_duration_ms), "-00:15");
    }

    #[test]
    fn empty_month_is_all_zero() {
        let (start, end) = sept();
        let s = aggregate_month("eva", &[], start, end, 15);
        assert_eq!(s, UserMonthlySummary {
            user_id: "eva".into(),
            ..Default::default()
        });
    }
}
