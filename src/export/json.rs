// src/export/json.rs

use crate::errors::AppResult;
use crate::export::model::ReportExport;
use crate::models::summary::MonthlyReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the whole report (both sheets) as pretty JSON.
pub(crate) fn write_json(report: &MonthlyReport, path: &Path) -> AppResult<()> {
    let export = ReportExport::from(report);

    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &export)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
