use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::interval::Interval;
use crate::models::profile::{Profile, Role};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{OptionalExtension, Result, Row, params};

/// Timestamps are stored as fixed-width RFC 3339 UTC strings so that text
/// ordering in SQL matches chronological ordering.
pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn ts_from_db(idx: usize, s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTimestamp(s.to_string())),
            )
        })
}

// ---------------------------
// users
// ---------------------------

fn map_profile(row: &Row) -> Result<Profile> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(Profile {
        user_id: row.get("user_id")?,
        full_name: row.get("full_name")?,
        role,
    })
}

pub fn insert_user(pool: &mut DbPool, profile: &Profile) -> AppResult<()> {
    if find_user(pool, &profile.user_id)?.is_some() {
        return Err(AppError::UserExists(profile.user_id.clone()));
    }

    pool.conn.execute(
        "INSERT INTO users (user_id, full_name, role, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            profile.user_id,
            profile.full_name,
            profile.role.to_db_str(),
            ts_to_db(&Utc::now()),
        ],
    )?;
    Ok(())
}

pub fn find_user(pool: &mut DbPool, user_id: &str) -> AppResult<Option<Profile>> {
    let profile = pool
        .conn
        .query_row(
            "SELECT user_id, full_name, role FROM users WHERE user_id = ?1",
            [user_id],
            map_profile,
        )
        .optional()?;
    Ok(profile)
}

/// All profiles ordered by name.
pub fn load_users(pool: &mut DbPool) -> AppResult<Vec<Profile>> {
    let mut stmt = pool.conn.prepare(
        "SELECT user_id, full_name, role FROM users
         ORDER BY full_name COLLATE NOCASE ASC, user_id ASC",
    )?;

    let rows = stmt.query_map([], map_profile)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// shifts
// ---------------------------

pub fn map_interval(row: &Row) -> Result<Interval> {
    let start_str: String = row.get("start_at")?;
    let end_str: Option<String> = row.get("end_at")?;

    let start = ts_from_db(2, &start_str)?;
    let end = match end_str {
        Some(s) => Some(ts_from_db(3, &s)?),
        None => None,
    };

    Ok(Interval {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        start,
        end,
    })
}

/// Insert an open interval and return its id.
pub fn insert_interval(pool: &mut DbPool, user_id: &str, start: &DateTime<Utc>) -> AppResult<i64> {
    pool.conn.execute(
        "INSERT INTO shifts (user_id, start_at, end_at, created_at)
         VALUES (?1, ?2, NULL, ?3)",
        params![user_id, ts_to_db(start), ts_to_db(&Utc::now())],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

pub fn close_interval(pool: &mut DbPool, id: i64, end: &DateTime<Utc>) -> AppResult<()> {
    let changed = pool.conn.execute(
        "UPDATE shifts SET end_at = ?1 WHERE id = ?2 AND end_at IS NULL",
        params![ts_to_db(end), id],
    )?;

    if changed == 0 {
        return Err(AppError::Other(format!("shift #{id} is not open")));
    }
    Ok(())
}

/// Latest interval of `user_id` that has no end yet.
pub fn find_open_interval(pool: &mut DbPool, user_id: &str) -> AppResult<Option<Interval>> {
    let interval = pool
        .conn
        .query_row(
            "SELECT id, user_id, start_at, end_at FROM shifts
             WHERE user_id = ?1 AND end_at IS NULL
             ORDER BY start_at DESC
             LIMIT 1",
            [user_id],
            map_interval,
        )
        .optional()?;
    Ok(interval)
}

/// Intervals whose start lies in `[start, end_exclusive)`, ordered by start.
/// A closed shift of `user_id` that overlaps `[start, end)`.
///
/// With no `end` the candidate is a clock-in at `start`, which overlaps any
/// closed shift containing that instant.
pub fn find_overlapping_interval(
    pool: &mut DbPool,
    user_id: &str,
    start: &DateTime<Utc>,
    end: Option<&DateTime<Utc>>,
) -> AppResult<Option<Interval>> {
    let interval = pool
        .conn
        .query_row(
            "SELECT id, user_id, start_at, end_at FROM shifts
             WHERE user_id = ?1
               AND end_at IS NOT NULL
               AND end_at > ?2
               AND (start_at < ?3 OR start_at = ?2)
             ORDER BY start_at ASC
             LIMIT 1",
            params![user_id, ts_to_db(start), ts_to_db(end.unwrap_or(start))],
            map_interval,
        )
        .optional()?;
    Ok(interval)
}

pub fn load_intervals_between(
    pool: &mut DbPool,
    start: &DateTime<Utc>,
    end_exclusive: &DateTime<Utc>,
) -> AppResult<Vec<Interval>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, user_id, start_at, end_at FROM shifts
         WHERE start_at >= ?1 AND start_at < ?2
         ORDER BY start_at ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![ts_to_db(start), ts_to_db(end_exclusive)],
        map_interval,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// session
// ---------------------------

/// The signed-in user id and the sign-in time, if any.
pub fn load_session_row(pool: &mut DbPool) -> AppResult<Option<(String, DateTime<Utc>)>> {
    let row = pool
        .conn
        .query_row(
            "SELECT user_id, signed_in_at FROM session WHERE id = 1",
            [],
            |row| {
                let user_id: String = row.get(0)?;
                let at: String = row.get(1)?;
                Ok((user_id, ts_from_db(1, &at)?))
            },
        )
        .optional()?;
    Ok(row)
}

pub fn save_session_row(pool: &mut DbPool, user_id: &str, at: &DateTime<Utc>) -> AppResult<()> {
    pool.conn.execute(
        "INSERT INTO session (id, user_id, signed_in_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET user_id = excluded.user_id,
                                       signed_in_at = excluded.signed_in_at",
        params![user_id, ts_to_db(at)],
    )?;
    Ok(())
}

/// Remove the session row; returns whether there was one.
pub fn clear_session_row(pool: &mut DbPool) -> AppResult<bool> {
    let removed = pool.conn.execute("DELETE FROM session WHERE id = 1", [])?;
    Ok(removed > 0)
}
