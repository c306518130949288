// src/export/csv.rs

use crate::errors::AppResult;
use crate::export::model::Sheet;
use std::path::Path;

/// Write one sheet as CSV: header line, then one record per row.
pub(crate) fn write_csv(sheet: &Sheet, path: &Path) -> AppResult<()> {
    let mut wtr = ::csv::Writer::from_path(path)?;

    wtr.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// `<stem>-detail.csv` next to the summary file.
pub(crate) fn detail_path(summary: &Path) -> std::path::PathBuf {
    let stem = summary
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "attendance".to_string());
    summary.with_file_name(format!("{stem}-detail.csv"))
}
