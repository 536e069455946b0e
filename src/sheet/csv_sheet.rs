//! CSV files, exposed as a workbook with a single sheet named after the
//! file stem.

use super::{Cell, RawSheet, SheetSource};
use crate::errors::{AppError, AppResult};
use std::path::Path;

pub struct CsvSource {
    sheet_name: String,
    rows: Vec<Vec<Cell>>,
}

impl CsvSource {
    pub fn open(path: &Path) -> AppResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(parse_field).collect());
        }

        let sheet_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Sheet1".to_string());

        Ok(Self { sheet_name, rows })
    }
}

fn parse_field(field: &str) -> Cell {
    if field.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(field.to_string())
    }
}

impl SheetSource for CsvSource {
    fn sheet_names(&self) -> Vec<String> {
        vec![self.sheet_name.clone()]
    }

    fn read_sheet(&mut self, name: &str) -> AppResult<RawSheet> {
        if name != self.sheet_name {
            return Err(AppError::UnreadableSheet {
                sheet: name.to_string(),
                reason: "no such sheet in CSV file".into(),
            });
        }
        Ok(RawSheet {
            rows: self.rows.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn csv_is_one_sheet_named_after_file() {
        let path = std::env::temp_dir().join("csv_sheet_source_test.csv");
        fs::write(&path, "Name,Totals\nDana,8\n,\n").unwrap();

        let mut src = CsvSource::open(&path).unwrap();
        assert_eq!(src.sheet_names(), vec!["csv_sheet_source_test".to_string()]);

        let sheet = src.read_sheet("csv_sheet_source_test").unwrap();
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[1], vec![Cell::text("Dana"), Cell::text("8")]);
        assert_eq!(sheet.rows[2], vec![Cell::Empty, Cell::Empty]);

        assert!(src.read_sheet("Other").is_err());
    }
}
