//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| UnicodeWidthStr::width(c.as_str()))
                    .chain(std::iter::once(UnicodeWidthStr::width(col.header.as_str())))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let mut push_line = |cells: Vec<&str>| {
            let line: Vec<String> = cells
                .iter()
                .zip(self.columns.iter())
                .zip(widths.iter())
                .map(|((cell, col), w)| {
                    let pad = " ".repeat(w.saturating_sub(UnicodeWidthStr::width(*cell)));
                    match col.align {
                        Align::Left => format!("{cell}{pad}"),
                        Align::Right => format!("{pad}{cell}"),
                    }
                })
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        };

        // Header
        push_line(self.columns.iter().map(|c| c.header.as_str()).collect());

        // Separator
        let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(sep.iter().map(|s| s.as_str()).collect());

        // Rows
        for row in &self.rows {
            push_line(
                (0..self.columns.len())
                    .map(|i| row.get(i).map(|s| s.as_str()).unwrap_or(""))
                    .collect(),
            );
        }

        out
    }
}
