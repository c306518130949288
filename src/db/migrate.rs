use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id     TEXT PRIMARY KEY,
            full_name   TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT 'worker' CHECK(role IN ('worker','admin')),
            created_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_shifts_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS shifts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL REFERENCES users(user_id),
            start_at    TEXT NOT NULL,
            end_at      TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_shifts_start ON shifts(start_at);
        CREATE INDEX IF NOT EXISTS idx_shifts_user_open ON shifts(user_id, end_at);
        "#,
    )?;
    Ok(())
}

fn create_session_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS session (
            id            INTEGER PRIMARY KEY CHECK(id = 1),
            user_id       TEXT NOT NULL REFERENCES users(user_id),
            signed_in_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// At most one open shift per user, enforced by the store itself.
fn create_open_shift_index(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_shifts_one_open
            ON shifts(user_id) WHERE end_at IS NULL;
        "#,
    )?;
    Ok(())
}

type Step = fn(&Connection) -> Result<()>;

/// Ordered schema steps: (version, description, step).
const MIGRATIONS: &[(&str, &str, Step)] = &[
    ("20250901_0001_create_users", "Created users table", create_users_table as Step),
    ("20250901_0002_create_shifts", "Created shifts table", create_shifts_table as Step),
    ("20250915_0003_create_session", "Created session table", create_session_table as Step),
    ("20251016_0004_one_open_shift", "Unique open shift per user", create_open_shift_index as Step),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Safe to call on every start.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, step) in MIGRATIONS {
        if migration_applied(conn, version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        let tx_conn: &Connection = &tx;
        step(tx_conn)?;
        mark_applied(&tx, version, message)?;
        tx.commit()?;

        tracing::info!(version, "migration applied");
        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}
