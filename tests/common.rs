#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

/// Home directory used by every test run, so the real config is never read.
fn test_home() -> PathBuf {
    let home = env::temp_dir().join("shiftlog_test_home");
    std::fs::create_dir_all(&home).ok();
    home
}

pub fn sl() -> Command {
    let mut cmd = cargo_bin_cmd!("shiftlog");
    cmd.env("HOME", test_home()).env_remove("SHIFTLOG_LOG");
    cmd
}

/// Fresh temporary directory and a database path inside it.
/// Keep the TempDir alive for the duration of the test.
pub fn setup_test_db() -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = dir.path().join("shiftlog.sqlite").to_string_lossy().to_string();
    (dir, db)
}

/// Run `shiftlog --db <db> <args…>` and assert success.
pub fn ok(db: &str, args: &[&str]) {
    sl().arg("--db").arg(db).args(args).assert().success();
}

/// Initialize the DB with an admin `boss` and a worker `eva`, leaving
/// `eva` signed in.
pub fn init_with_users(db: &str) {
    sl().args(["--db", db, "--test", "init"]).assert().success();

    ok(db, &["user", "add", "boss", "--name", "Petra Admin", "--role", "admin"]);
    ok(db, &["login", "boss"]);
    ok(db, &["user", "add", "eva", "--name", "Eva Nováková"]);
    ok(db, &["login", "eva"]);
}

/// Two September shifts for `eva`: 8h07m and 4h00m.
pub fn add_september_shifts(db: &str) {
    ok(db, &["in", "--at", "2025-09-01 09:00"]);
    ok(db, &["out", "--at", "2025-09-01 17:07"]);
    ok(db, &["in", "--at", "2025-09-02 09:00"]);
    ok(db, &["out", "--at", "2025-09-02 13:00"]);
}
