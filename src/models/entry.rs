use crate::utils::format_hours;
use serde::Serialize;

/// Column headings of the displayed entry view, in `find_all` order.
pub const ENTRY_HEADERS: [&str; 8] = [
    "Entry_ID",
    "Name",
    "Month",
    "Year",
    "Contract_Name",
    "Project_Manager",
    "Hours",
    "Source_File",
];

/// A persisted timecard row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimecardEntry {
    pub entry_id: i64,
    pub name: String,
    pub month: String,
    pub year: String,
    pub contract_name: String,
    pub project_manager: String,
    pub hours: f64,
    pub source_file: String,
    pub sheet_name: String,
}

/// A validated row waiting for the store to assign its `entry_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub name: String,
    pub month: String,
    pub year: String,
    pub contract_name: String,
    pub project_manager: String,
    pub hours: f64,
    pub source_file: String,
    pub sheet_name: String,
}

/// A contract name may be persisted only if it has visible content and is
/// not the literal placeholder `nan`.
pub fn is_valid_contract(name: &str) -> bool {
    let v = name.trim();
    !v.is_empty() && !v.eq_ignore_ascii_case("nan")
}

impl NewEntry {
    /// Row-level invariants checked right before insertion.
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_contract(&self.contract_name) {
            return Err(format!("invalid contract name '{}'", self.contract_name));
        }
        if !self.hours.is_finite() || self.hours <= 0.0 {
            return Err(format!("non-positive hours {}", self.hours));
        }
        Ok(())
    }
}

impl TimecardEntry {
    /// Cells as shown in tables and reports, matching `ENTRY_HEADERS`.
    pub fn display_row(&self) -> Vec<String> {
        vec![
            self.entry_id.to_string(),
            self.name.clone(),
            self.month.clone(),
            self.year.clone(),
            self.contract_name.clone(),
            self.project_manager.clone(),
            format_hours(self.hours),
            self.source_file.clone(),
        ]
    }

    /// The fields free-text search looks into. `entry_id` is left out so
    /// that a digit in a search term never matches a row by its id.
    pub fn searchable_fields(&self) -> [String; 7] {
        [
            self.name.clone(),
            self.month.clone(),
            self.year.clone(),
            self.contract_name.clone(),
            self.project_manager.clone(),
            format_hours(self.hours),
            self.source_file.clone(),
        ]
    }
}
