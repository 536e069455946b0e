//! Table rendering utilities for CLI outputs.

use crate::utils::colors::{RESET, color_for_optional_field};
use crate::utils::formatting::pad_right;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
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

    /// Build a table whose column widths fit the headers and every row.
    pub fn fitted(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.width());
                }
            }
        }

        let columns = headers
            .iter()
            .zip(widths)
            .map(|(h, width)| Column {
                header: h.to_string(),
                width,
            })
            .collect();

        let mut table = Self::new(columns);
        for row in rows {
            table.add_row(row);
        }
        table
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad_right(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let color = color_for_optional_field(Some(cell));
                let shown = if cell.is_empty() { "-" } else { cell };
                let pad = col.width.saturating_sub(shown.width());
                out.push_str(color);
                out.push_str(shown);
                out.push_str(RESET);
                out.push_str(&" ".repeat(pad + 1));
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_widths_follow_longest_cell() {
        let t = Table::fitted(
            &["Id", "Contract_Name"],
            vec![vec!["1".into(), "ABC".into()], vec!["1234".into(), "X".into()]],
        );
        assert_eq!(t.columns[0].width, 4);
        assert_eq!(t.columns[1].width, "Contract_Name".len());
        let out = t.render();
        assert!(out.starts_with("Id   Contract_Name"));
        assert!(out.contains("1234"));
    }
}
