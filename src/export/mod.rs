// src/export/mod.rs

mod csv;
mod excel_date;
mod fs_utils;
mod json;
pub mod logic;
pub mod model;
mod xlsx;

pub use logic::ExportLogic;
pub use model::Sheet;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::fmt;
use std::path::Path;

/// Common completion message for every format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
