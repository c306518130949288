// src/export/logic.rs

use crate::core::month::MonthBounds;
use crate::core::summary::SummaryLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::csv::{detail_path, write_csv};
use crate::export::fs_utils::ensure_writable;
use crate::export::json::write_json;
use crate::export::model::{detail_sheet, report_to_sheets, summary_sheet};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, notify_export_success};
use crate::models::summary::MonthlyReport;
use crate::utils::path::expand_tilde;
use std::path::{Path, PathBuf};

pub struct ExportLogic;

impl ExportLogic {
    /// Export the monthly report of `month`.
    ///
    /// - `file`: absolute output path (`~/` is expanded); defaults to
    ///   `attendance-YYYY-MM.<ext>` in the current directory
    /// - `force`: overwrite without asking
    ///
    /// Returns the path of the main file written.
    pub fn export(
        pool: &mut DbPool,
        month: &MonthBounds,
        quantum_minutes: u32,
        format: ExportFormat,
        file: Option<&str>,
        force: bool,
    ) -> AppResult<PathBuf> {
        let path = resolve_output_path(file, month, format)?;

        ensure_writable(&path, force)?;
        if format == ExportFormat::Csv {
            ensure_writable(&detail_path(&path), force)?;
        }

        let report = SummaryLogic::build(pool, month, quantum_minutes)?;
        Self::write_report(&report, format, &path)?;

        ttlog(
            &pool.conn,
            "export",
            &report.month,
            &format!("{} → {}", format.as_str(), path.display()),
        )?;

        Ok(path)
    }

    /// Write an already-built report in `format`.
    pub fn write_report(report: &MonthlyReport, format: ExportFormat, path: &Path) -> AppResult<()> {
        tracing::debug!(
            month = %report.month,
            format = format.as_str(),
            path = %path.display(),
            "writing export"
        );

        match format {
            ExportFormat::Xlsx => export_xlsx(&report_to_sheets(report), path)?,
            ExportFormat::Csv => {
                write_csv(&summary_sheet(report), path)?;
                let detail = detail_path(path);
                write_csv(&detail_sheet(report), &detail)?;
                notify_export_success("CSV", path);
                notify_export_success("CSV (detail)", &detail);
            }
            ExportFormat::Json => {
                write_json(report, path)?;
                notify_export_success("JSON", path);
            }
        }
        Ok(())
    }
}

fn resolve_output_path(file: Option<&str>, month: &MonthBounds, format: ExportFormat) -> AppResult<PathBuf> {
    match file {
        Some(f) => {
            let path = expand_tilde(f);
            if !path.is_absolute() {
                return Err(AppError::Export(format!(
                    "output file path must be absolute: {f}"
                )));
            }
            Ok(path)
        }
        None => {
            let name = format!("attendance-{}.{}", month.label(), format.extension());
            Ok(std::env::current_dir()?.join(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ClockLogic;
    use crate::core::session::SessionLogic;
    use crate::db::initialize::init_db;
    use crate::db::queries::insert_user;
    use crate::models::profile::{Profile, Role};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn pool_with_shift() -> DbPool {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        insert_user(
            &mut pool,
            &Profile {
                user_id: "eva".into(),
                full_name: "Eva".into(),
                role: Role::Worker,
            },
        )
        .unwrap();
        let s = SessionLogic::sign_in(&mut pool, "eva", Utc::now()).unwrap();
        ClockLogic::clock_in(&mut pool, &s, Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap()).unwrap();
        ClockLogic::clock_out(&mut pool, &s, Utc.with_ymd_and_hms(2025, 9, 1, 17, 7, 0).unwrap()).unwrap();
        pool
    }

    #[test]
    fn relative_paths_are_rejected() {
        let month = MonthBounds::parse("2025-09").unwrap();
        assert!(matches!(
            resolve_output_path(Some("out.xlsx"), &month, ExportFormat::Xlsx),
            Err(AppError::Export(_))
        ));
    }

    #[test]
    fn default_file_name_carries_the_month() {
        let month = MonthBounds::parse("2025-09").unwrap();
        let p = resolve_output_path(None, &month, ExportFormat::Json).unwrap();
        assert!(p.is_absolute());
        assert!(p.ends_with("attendance-2025-09.json"));
    }

    #[test]
    fn csv_export_writes_summary_and_detail() {
        let mut pool = pool_with_shift();
        let dir = tempdir().unwrap();
        let out = dir.path().join("sept.csv");
        let month = MonthBounds::parse("2025-09").unwrap();

        let written = ExportLogic::export(
            &mut pool,
            &month,
            15,
            ExportFormat::Csv,
            out.to_str(),
            false,
        )
        .unwrap();
        assert_eq!(written, out);

        let summary = std::fs::read_to_string(&out).unwrap();
        assert!(summary.starts_with("Name,Shifts,Worked (raw),Worked (15m)\n"));
        assert!(summary.contains("Eva,1,08:07,08:00"));

        let detail = std::fs::read_to_string(dir.path().join("sept-detail.csv")).unwrap();
        assert!(detail.contains("08:07,08:00"));
    }

    #[test]
    fn json_export() {
        let mut pool = pool_with_shift();
        let dir = tempdir().unwrap();
        let out = dir.path().join("sept.json");
        let month = MonthBounds::parse("2025-09").unwrap();

        ExportLogic::export(&mut pool, &month, 15, ExportFormat::Json, out.to_str(), false).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(v["summary"][0]["shifts"], 1);
        assert_eq!(v["summary"][0]["worked_raw"], "08:07");
        assert_eq!(v["detail"].as_array().unwrap().len(), 1);
    }
}
