// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::excel_date::{DATETIME_FORMAT, parse_to_excel_datetime};
use crate::export::model::{ColumnKind, Sheet};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// One worksheet per sheet, styled header, banded rows and auto-width columns.
pub(crate) fn export_xlsx(sheets: &[Sheet], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_sheet(worksheet, sheet)?;
    }

    workbook.save(path)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> AppResult<()> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, header.as_str(), &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = sheet
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, values) in sheet.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            write_xlsx_cell(worksheet, row, col as u16, sheet.kind(col), value, band_color)?;

            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    Ok(())
}

/// Typed value of one cell.
#[derive(Debug, PartialEq)]
enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
    DateTime(f64),
}

/// The column decides the type; a value that does not fit its column stays text.
fn cell_value(kind: ColumnKind, s: &str) -> CellValue<'_> {
    match kind {
        ColumnKind::Count => s
            .parse::<u64>()
            .map(|n| CellValue::Number(n as f64))
            .unwrap_or(CellValue::Text(s)),
        ColumnKind::DateTime => parse_to_excel_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Text(s)),
        ColumnKind::Text | ColumnKind::Duration => CellValue::Text(s),
    }
}

fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    kind: ColumnKind,
    s: &str,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match cell_value(kind, s) {
        CellValue::DateTime(serial) => {
            let fmt = base.set_num_format(DATETIME_FORMAT);
            worksheet.write_with_format(row, col, serial, &fmt)?;
        }
        CellValue::Number(num) => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, num, &fmt)?;
        }
        // durations stay text but line up like numbers
        CellValue::Text(text) if kind == ColumnKind::Duration => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, text, &fmt)?;
        }
        CellValue::Text(text) => {
            worksheet.write_with_format(row, col, text, &base)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_a_workbook_with_two_sheets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let sheets = vec![
            Sheet {
                name: "Summary".into(),
                headers: vec!["Name".into(), "Shifts".into(), "Worked (15m)".into()],
                kinds: vec![ColumnKind::Text, ColumnKind::Count, ColumnKind::Duration],
                rows: vec![vec!["Eva".into(), "2".into(), "12:00".into()]],
            },
            Sheet {
                name: "Detail".into(),
                headers: vec!["Name".into(), "Start".into()],
                kinds: vec![ColumnKind::Text, ColumnKind::DateTime],
                rows: vec![],
            },
        ];

        export_xlsx(&sheets, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn names_stay_text_whatever_they_look_like() {
        assert_eq!(cell_value(ColumnKind::Text, "007"), CellValue::Text("007"));
        assert_eq!(
            cell_value(ColumnKind::Text, "2025-09-01 09:00"),
            CellValue::Text("2025-09-01 09:00")
        );
        assert_eq!(cell_value(ColumnKind::Duration, "08:00"), CellValue::Text("08:00"));
    }

    #[test]
    fn typed_columns() {
        assert_eq!(cell_value(ColumnKind::Count, "007"), CellValue::Number(7.0));
        assert_eq!(
            cell_value(ColumnKind::DateTime, "2025-09-01 12:00"),
            CellValue::DateTime(45901.5)
        );
        assert_eq!(cell_value(ColumnKind::DateTime, "soon"), CellValue::Text("soon"));
    }
}
