//! Spreadsheet reader boundary.
//!
//! The importer only sees [`SheetSource`]: a list of sheet names and, per
//! sheet, a grid of [`Cell`]s whose first row is the header.

mod csv_sheet;
mod memory;
mod workbook;

pub use csv_sheet::CsvSource;
pub use memory::MemorySource;
pub use workbook::WorkbookSource;

use crate::errors::{AppError, AppResult};
use std::fmt;
use std::path::Path;

/// A single spreadsheet cell after reading.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }

    /// Empty cells and blank text count as missing values.
    pub fn is_null(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
        }
    }

    /// Numeric value of the cell, if it has one. Text is parsed after
    /// trimming; NaN and infinities are not numbers here.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Empty => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A sheet as read: header row first, then data rows. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub rows: Vec<Vec<Cell>>,
}

pub trait SheetSource {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet. Errors mean "this sheet is unreadable".
    fn read_sheet(&mut self, name: &str) -> AppResult<RawSheet>;
}

/// Open a spreadsheet file, choosing the reader by extension.
pub fn open_source(path: &Path) -> AppResult<Box<dyn SheetSource>> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Box::new(WorkbookSource::open(path)?)),
        "csv" => Ok(Box::new(CsvSource::open(path)?)),
        _ => Err(AppError::UnsupportedFile(path.display().to_string())),
    }
}
