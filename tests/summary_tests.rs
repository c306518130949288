use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_september_shifts, init_with_users, ok, setup_test_db, sl};

#[test]
fn summary_rounds_each_shift_before_summing() {
    let (_dir, db) = setup_test_db();
    init_with_users(&db);
    add_september_shifts(&db);
    ok(&db, &["login", "boss"]);

    sl().args(["--db", &db, "summary", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("Attendance 2025-09"))
        .stdout(contains("Eva Nováková"))
        .stdout(contains("12:07"))
        .stdout(contains("12:00"));
}

#[test]
fn summary_excludes_other_months_and_open_shifts() {
    let (_dir, db) = setup_test_db();
    init_with_users(&db);
    add_september_shifts(&db);
    // October shift, left open
    ok(&db, &["in", "--at", "2025-10-01 08:00"]);
    ok(&db, &["login", "boss"]);

    sl().args(["--db", &db, "summary", "--month", "2025-10"])
        .assert()
        .success()
        .stdout(contains("00:00"))
        .stdout(contains("12:07").not());
}

#[test]
fn summary_requires_admin() {
    let (_dir, db) = setup_test_db();
    init_with_users(&db);

    sl().args(["--db", &db, "summary", "--month", "2025-09"])
        .assert()
        .failure()
        .stderr(contains("not an administrator"));
}

#[test]
fn summary_rejects_bad_month() {
    let (_dir, db) = setup_test_db();
    init_with_users(&db);
    ok(&db, &["login", "boss"]);

    sl().args(["--db", &db, "summary", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}
