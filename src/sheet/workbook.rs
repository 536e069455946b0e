//! Excel / OpenDocument workbooks through calamine.

use super::{Cell, RawSheet, SheetSource};
use crate::errors::{AppError, AppResult};
use calamine::{Data, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct WorkbookSource {
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    pub fn open(path: &Path) -> AppResult<Self> {
        let workbook = open_workbook_auto(path)?;
        Ok(Self { workbook })
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        other => Cell::Text(other.to_string()),
    }
}

impl SheetSource for WorkbookSource {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> AppResult<RawSheet> {
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| AppError::UnreadableSheet {
                sheet: name.to_string(),
                reason: e.to_string(),
            })?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(to_cell).collect())
            .collect();

        Ok(RawSheet { rows })
    }
}
