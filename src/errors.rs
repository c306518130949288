//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid timestamp '{0}': expected RFC 3339 or YYYY-MM-DD HH:MM")]
    InvalidTimestamp(String),

    #[error("Invalid role '{0}': use 'worker' or 'admin'")]
    InvalidRole(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("Nobody is signed in. Run `shiftlog login <user>` first")]
    NotSignedIn,

    #[error("User '{0}' is not an administrator")]
    Forbidden(String),

    #[error("User '{user}' is already clocked in since {since}")]
    AlreadyClockedIn { user: String, since: String },

    #[error("User '{0}' is not clocked in")]
    NotClockedIn(String),

    #[error("Invalid interval: clock-out {end} is before clock-in {start}")]
    InvalidInterval { start: String, end: String },

    #[error("Shift overlaps shift #{id} ({start} → {end})")]
    OverlappingShift { id: i64, start: String, end: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
