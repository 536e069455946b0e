//! Timecard import: sheet → cleaned rows → store.
//!
//! A sheet is processed in a fixed order: example-sheet skip, header
//! projection, `Totals` coercion, whitespace stripping, fill-down of
//! Name/Month/Year, hours and contract filtering, provenance, duplicate
//! check, and finally one transaction with all surviving rows.
//!
//! Failures never cross a sheet boundary: an unreadable sheet or file is
//! logged and counted, and the next sheet or file is processed.

use crate::db::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{NewEntry, is_valid_contract};
use crate::sheet::{Cell, RawSheet, SheetSource, open_source};
use crate::utils::path::source_file_name;
use crate::utils::strip_whitespace;
use std::path::{Path, PathBuf};

pub const COL_NAME: &str = "Name";
pub const COL_MONTH: &str = "Month";
pub const COL_YEAR: &str = "Year";
pub const COL_CONTRACT: &str = "Contract Name";
pub const COL_MANAGER: &str = "Project Manager";
pub const COL_TOTALS: &str = "Totals";

const EXAMPLE_SHEET: &str = "example";

/// What happened to one sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOutcome {
    Imported { rows: usize, skipped_rows: usize },
    SkippedExample,
    Duplicate,
    MissingIdentity,
    Failed(String),
}

impl SheetOutcome {
    pub fn imported_rows(&self) -> usize {
        match self {
            SheetOutcome::Imported { rows, .. } => *rows,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    pub file: PathBuf,
    pub source_file: String,
    pub sheet_name: String,
    pub outcome: SheetOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub sheets: Vec<SheetReport>,
    /// Files that could not be opened at all, with the reason.
    pub failed_files: Vec<(PathBuf, String)>,
}

impl ImportReport {
    pub fn imported_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.outcome.imported_rows()).sum()
    }

    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&SheetOutcome) -> bool,
    {
        self.sheets.iter().filter(|s| pred(&s.outcome)).count()
    }
}

/// Receives import progress. All methods default to no-ops.
pub trait ImportObserver {
    fn sheet_started(&mut self, _source_file: &str, _sheet_name: &str) {}
    /// Percentage of the current sheet, 0.0..=100.0.
    fn progress(&mut self, _percent: f64) {}
    fn sheet_finished(&mut self, _report: &SheetReport) {}
    fn file_failed(&mut self, _file: &Path, _reason: &str) {}
}

/// Observer that ignores everything.
pub struct Silent;

impl ImportObserver for Silent {}

/// Result of cleaning one sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Rows(Vec<NewEntry>),
    /// Name, Month or Year has no value anywhere in the sheet.
    MissingIdentity,
}

pub fn is_example_sheet(sheet_name: &str) -> bool {
    sheet_name.trim().eq_ignore_ascii_case(EXAMPLE_SHEET)
}

/// Row after projection and stripping, before fill-down.
struct Projected {
    name: Option<String>,
    month: Option<String>,
    year: Option<String>,
    contract: Option<String>,
    manager: String,
    hours: Option<f64>,
}

fn column_index(headers: &[String], sheet: &str, column: &str) -> AppResult<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| AppError::MissingColumn {
            sheet: sheet.to_string(),
            column: column.to_string(),
        })
}

static EMPTY: Cell = Cell::Empty;

fn cell_at(row: &[Cell], idx: usize) -> &Cell {
    row.get(idx).unwrap_or(&EMPTY)
}

fn value(cell: &Cell) -> Option<String> {
    (!cell.is_null()).then(|| cell.to_string().trim().to_string())
}

fn stripped(cell: &Cell) -> Option<String> {
    (!cell.is_null()).then(|| strip_whitespace(&cell.to_string()))
}

/// Clean a raw sheet into entries ready for insertion.
pub fn normalize_sheet(raw: &RawSheet, source_file: &str, sheet_name: &str) -> AppResult<Normalized> {
    let Some((header_row, data)) = raw.rows.split_first() else {
        return Err(AppError::MissingColumn {
            sheet: sheet_name.to_string(),
            column: COL_TOTALS.to_string(),
        });
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();

    let totals_idx = column_index(&headers, sheet_name, COL_TOTALS)?;
    let name_idx = column_index(&headers, sheet_name, COL_NAME)?;
    let month_idx = column_index(&headers, sheet_name, COL_MONTH)?;
    let year_idx = column_index(&headers, sheet_name, COL_YEAR)?;
    let contract_idx = column_index(&headers, sheet_name, COL_CONTRACT)?;
    let manager_idx = column_index(&headers, sheet_name, COL_MANAGER)?;

    let projected: Vec<Projected> = data
        .iter()
        // Totals must be numeric, otherwise the row is not a time row.
        .filter(|row| cell_at(row, totals_idx).as_number().is_some())
        .map(|row| {
            // Hours go through their text form with whitespace removed,
            // then are coerced again.
            let hours = stripped(cell_at(row, totals_idx))
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|h| h.is_finite());

            Projected {
                name: value(cell_at(row, name_idx)),
                month: stripped(cell_at(row, month_idx)),
                year: value(cell_at(row, year_idx)),
                contract: stripped(cell_at(row, contract_idx)),
                manager: stripped(cell_at(row, manager_idx)).unwrap_or_default(),
                hours,
            }
        })
        .collect();

    let (Some(name), Some(month), Some(year)) = (
        projected.iter().find_map(|p| p.name.clone()),
        projected.iter().find_map(|p| p.month.clone()),
        projected.iter().find_map(|p| p.year.clone()),
    ) else {
        return Ok(Normalized::MissingIdentity);
    };

    let rows = projected
        .into_iter()
        .filter_map(|p| {
            let hours = p.hours.filter(|h| *h > 0.0)?;
            let contract = p.contract.filter(|c| is_valid_contract(c))?;
            Some(NewEntry {
                name: name.clone(),
                month: month.clone(),
                year: year.clone(),
                contract_name: contract,
                project_manager: p.manager,
                hours,
                source_file: source_file.to_string(),
                sheet_name: sheet_name.to_string(),
            })
        })
        .collect();

    Ok(Normalized::Rows(rows))
}

/// Import one sheet of an open source. The observer sees 100% once the
/// sheet is done, whatever its outcome.
pub fn import_sheet(
    store: &mut RecordStore,
    source: &mut dyn SheetSource,
    source_file: &str,
    sheet_name: &str,
    observer: &mut dyn ImportObserver,
) -> SheetOutcome {
    let outcome = if is_example_sheet(sheet_name) {
        tracing::info!(source_file, sheet_name, "skipping example sheet");
        SheetOutcome::SkippedExample
    } else {
        match try_import_sheet(store, source, source_file, sheet_name, observer) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(source_file, sheet_name, error = %e, "sheet import failed");
                SheetOutcome::Failed(e.to_string())
            }
        }
    };

    observer.progress(100.0);
    outcome
}

fn try_import_sheet(
    store: &mut RecordStore,
    source: &mut dyn SheetSource,
    source_file: &str,
    sheet_name: &str,
    observer: &mut dyn ImportObserver,
) -> AppResult<SheetOutcome> {
    let raw = source.read_sheet(sheet_name)?;

    let candidates = match normalize_sheet(&raw, source_file, sheet_name)? {
        Normalized::Rows(rows) => rows,
        Normalized::MissingIdentity => {
            tracing::warn!(source_file, sheet_name, "missing Name/Month/Year, sheet skipped");
            return Ok(SheetOutcome::MissingIdentity);
        }
    };

    if store.exists(source_file, sheet_name)? {
        tracing::warn!(source_file, sheet_name, "duplicate sheet, skipping");
        return Ok(SheetOutcome::Duplicate);
    }

    let total = candidates.len();
    let mut skipped_rows = 0;

    let rows = store.write_sheet(source_file, sheet_name, |writer| {
        for entry in &candidates {
            if !is_valid_contract(&entry.contract_name) {
                tracing::warn!(
                    sheet_name,
                    contract = %entry.contract_name,
                    "skipping row with missing or invalid contract"
                );
                skipped_rows += 1;
                continue;
            }
            writer.insert(entry)?;
            observer.progress(writer.inserted() as f64 / total as f64 * 100.0);
        }
        Ok(())
    })?;

    tracing::info!(source_file, sheet_name, rows, "sheet imported");

    Ok(SheetOutcome::Imported { rows, skipped_rows })
}

/// Import every sheet of `source`, in order.
pub fn import_source(
    store: &mut RecordStore,
    source: &mut dyn SheetSource,
    file: &Path,
    observer: &mut dyn ImportObserver,
) -> Vec<SheetReport> {
    let source_file = source_file_name(file);
    let mut reports = Vec::new();

    for sheet_name in source.sheet_names() {
        observer.sheet_started(&source_file, &sheet_name);
        let outcome = import_sheet(store, source, &source_file, &sheet_name, observer);

        let report = SheetReport {
            file: file.to_path_buf(),
            source_file: source_file.clone(),
            sheet_name,
            outcome,
        };
        observer.sheet_finished(&report);
        reports.push(report);
    }

    reports
}

/// Import all sheets of all files. A file that cannot be opened is
/// reported and the remaining files are still imported.
pub fn import_files(
    store: &mut RecordStore,
    files: &[PathBuf],
    observer: &mut dyn ImportObserver,
) -> ImportReport {
    let mut report = ImportReport::default();

    for file in files {
        match open_source(file) {
            Ok(mut source) => {
                let sheets = import_source(store, source.as_mut(), file, observer);
                report.sheets.extend(sheets);
            }
            Err(e) => {
                tracing::error!(file = %file.display(), error = %e, "cannot open spreadsheet");
                observer.file_failed(file, &e.to_string());
                report.failed_files.push((file.clone(), e.to_string()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<Cell> {
        ["Name", " Month ", "Year", "Contract Name", "Project Manager", "Totals "]
            .iter()
            .map(|h| Cell::text(h))
            .collect()
    }

    fn row(name: &str, month: &str, year: f64, contract: &str, pm: &str, totals: Cell) -> Vec<Cell> {
        let t = |s: &str| if s.is_empty() { Cell::Empty } else { Cell::text(s) };
        vec![
            t(name),
            t(month),
            if year == 0.0 { Cell::Empty } else { Cell::Number(year) },
            t(contract),
            t(pm),
            totals,
        ]
    }

    fn rows(sheet: RawSheet) -> Vec<NewEntry> {
        match normalize_sheet(&sheet, "card.xlsx", "Week1").unwrap() {
            Normalized::Rows(r) => r,
            Normalized::MissingIdentity => panic!("unexpected missing identity"),
        }
    }

    #[test]
    fn example_sheet_names() {
        assert!(is_example_sheet("Example"));
        assert!(is_example_sheet("  EXAMPLE "));
        assert!(!is_example_sheet("Example 2"));
    }

    #[test]
    fn fill_down_uses_first_values() {
        let sheet = RawSheet {
            rows: vec![
                header(),
                row("Dana", "March", 2024.0, "ALPHA", "Lee", Cell::Number(8.0)),
                row("", "", 0.0, "BETA", "", Cell::Number(4.5)),
                row("Other", "April", 2025.0, "ALPHA", "", Cell::Number(2.0)),
            ],
        };

        let out = rows(sheet);
        assert_eq!(out.len(), 3);
        for e in &out {
            assert_eq!((e.name.as_str(), e.month.as_str(), e.year.as_str()), ("Dana", "March", "2024"));
            assert_eq!(e.source_file, "card.xlsx");
            assert_eq!(e.sheet_name, "Week1");
        }
        assert_eq!(out[1].project_manager, "");
    }

    #[test]
    fn bad_totals_hours_and_contracts_are_dropped() {
        let sheet = RawSheet {
            rows: vec![
                header(),
                row("Nobody", "May", 1999.0, "ALPHA", "", Cell::text("Totals:")),
                row("Dana", "March", 2024.0, "ALPHA", "", Cell::Number(0.0)),
                row("", "", 0.0, "ALPHA", "", Cell::Number(-3.0)),
                row("", "", 0.0, "", "", Cell::Number(5.0)),
                row("", "", 0.0, "  ", "", Cell::Number(5.0)),
                row("", "", 0.0, "NaN", "", Cell::Number(5.0)),
                row("", "", 0.0, "Big Contract 7", "Pat Doe", Cell::text(" 6.5 ")),
            ],
        };

        let out = rows(sheet);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].contract_name, "BigContract7");
        assert_eq!(out[0].project_manager, "PatDoe");
        assert_eq!(out[0].hours, 6.5);
        // The non-numeric Totals row is gone before fill-down.
        assert_eq!(out[0].name, "Dana");
        assert_eq!(out[0].year, "2024");
    }

    #[test]
    fn identity_only_in_dropped_row_is_missing() {
        let sheet = RawSheet {
            rows: vec![
                header(),
                row("Dana", "March", 2024.0, "", "", Cell::Empty),
                row("", "", 0.0, "ALPHA", "", Cell::Number(8.0)),
            ],
        };
        assert_eq!(
            normalize_sheet(&sheet, "f.xlsx", "S").unwrap(),
            Normalized::MissingIdentity
        );
    }

    #[test]
    fn missing_column_is_an_error() {
        let sheet = RawSheet {
            rows: vec![vec![Cell::text("Name"), Cell::text("Totals")]],
        };
        let err = normalize_sheet(&sheet, "f.xlsx", "S").unwrap_err();
        assert!(matches!(err, AppError::MissingColumn { ref column, .. } if column == "Month"));

        let empty = RawSheet::default();
        assert!(normalize_sheet(&empty, "f.xlsx", "S").is_err());
    }

    #[test]
    fn month_whitespace_is_removed() {
        let sheet = RawSheet {
            rows: vec![
                header(),
                row(" Dana ", " Mar ch ", 2024.0, "A", "", Cell::Number(1.0)),
            ],
        };
        let out = rows(sheet);
        assert_eq!(out[0].month, "March");
        assert_eq!(out[0].name, "Dana");
    }
}
