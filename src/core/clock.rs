use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    close_interval, find_open_interval, find_overlapping_interval, insert_interval,
};
use crate::errors::{AppError, AppResult};
use crate::models::interval::Interval;
use crate::models::session::Session;
use chrono::{DateTime, Utc};

pub struct ClockLogic;

impl ClockLogic {
    /// Open a new interval for the session user.
    ///
    /// `at` must not fall inside a closed shift.
    pub fn clock_in(pool: &mut DbPool, session: &Session, at: DateTime<Utc>) -> AppResult<Interval> {
        let user_id = session.user_id();

        if let Some(open) = find_open_interval(pool, user_id)? {
            return Err(already_clocked_in(user_id, &open));
        }
        if let Some(other) = find_overlapping_interval(pool, user_id, &at, None)? {
            return Err(overlapping(&other));
        }

        let id = match insert_interval(pool, user_id, &at) {
            Ok(id) => id,
            // another process opened a shift in between
            Err(AppError::Db(rusqlite::Error::SqliteFailure(e, _)))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(match find_open_interval(pool, user_id)? {
                    Some(open) => already_clocked_in(user_id, &open),
                    None => AppError::Other(format!("could not open a shift for '{user_id}'")),
                });
            }
            Err(e) => return Err(e),
        };
        ttlog(
            &pool.conn,
            "clock_in",
            user_id,
            &format!("Shift #{} started at {}", id, at.to_rfc3339()),
        )?;

        Ok(Interval::new(id, user_id, at, None))
    }

    /// Close the open interval of the session user at `at`.
    ///
    /// Rejects a clock-out that would precede the clock-in, or a shift that
    /// would overlap one already closed.
    pub fn clock_out(pool: &mut DbPool, session: &Session, at: DateTime<Utc>) -> AppResult<Interval> {
        let user_id = session.user_id();

        let open = find_open_interval(pool, user_id)?
            .ok_or_else(|| AppError::NotClockedIn(user_id.to_string()))?;

        if at < open.start {
            return Err(AppError::InvalidInterval {
                start: open.start.to_rfc3339(),
                end: at.to_rfc3339(),
            });
        }
        if let Some(other) = find_overlapping_interval(pool, user_id, &open.start, Some(&at))? {
            return Err(overlapping(&other));
        }

        close_interval(pool, open.id, &at)?;
        ttlog(
            &pool.conn,
            "clock_out",
            user_id,
            &format!("Shift #{} ended at {}", open.id, at.to_rfc3339()),
        )?;

        Ok(Interval {
            end: Some(at),
            ..open
        })
    }

    pub fn open_interval(pool: &mut DbPool, session: &Session) -> AppResult<Option<Interval>> {
        find_open_interval(pool, session.user_id())
    }
}

fn already_clocked_in(user_id: &str, open: &Interval) -> AppError {
    AppError::AlreadyClockedIn {
        user: user_id.to_string(),
        since: open.start.to_rfc3339(),
    }
}

fn overlapping(other: &Interval) -> AppError {
    AppError::OverlappingShift {
        id: other.id,
        start: other.start.to_rfc3339(),
        end: other.end.map(|e| e.to_rfc3339()).unwrap_or_default(),
    }
}
