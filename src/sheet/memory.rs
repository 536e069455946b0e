//! In-memory workbook, used by tests and by callers that already hold rows.

use super::{RawSheet, SheetSource};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<(String, RawSheet)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: &str, sheet: RawSheet) -> Self {
        self.sheets.push((name.to_string(), sheet));
        self
    }
}

impl SheetSource for MemorySource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(n, _)| n.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> AppResult<RawSheet> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.clone())
            .ok_or_else(|| AppError::UnreadableSheet {
                sheet: name.to_string(),
                reason: "no such sheet".into(),
            })
    }
}
