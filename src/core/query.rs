//! Search and hour totals.
//!
//! Filtering runs over the session cache; totals always go to the store so
//! they reflect what is persisted even when the cache is behind.

use crate::db::{HoursFilter, RecordStore};
use crate::errors::AppResult;
use crate::models::TimecardEntry;
use crate::utils::casefold;

/// Lowercase `term` and drop all whitespace from it.
pub fn clean_term(term: &str) -> String {
    casefold(term)
}

fn field_contains(field: &str, cleaned: &str) -> bool {
    clean_term(field).contains(cleaned)
}

/// Whether any searchable field of `entry` contains the cleaned term.
pub fn matches_term(entry: &TimecardEntry, cleaned: &str) -> bool {
    entry
        .searchable_fields()
        .iter()
        .any(|f| field_contains(f, cleaned))
}

/// Free-text filter over the cache. A blank term returns everything.
pub fn filter_entries(cache: &[TimecardEntry], term: &str) -> Vec<TimecardEntry> {
    let cleaned = clean_term(term);
    if cleaned.is_empty() {
        return cache.to_vec();
    }
    cache
        .iter()
        .filter(|e| matches_term(e, &cleaned))
        .cloned()
        .collect()
}

/// Contract / month / year search as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedQuery {
    pub contract: String,
    pub month: String,
    pub year: String,
}

impl AdvancedQuery {
    pub fn new(contract: &str, month: &str, year: &str) -> Self {
        Self {
            contract: contract.to_string(),
            month: month.to_string(),
            year: year.to_string(),
        }
    }

    pub fn hours_filter(&self) -> HoursFilter {
        HoursFilter::new(&self.contract, Some(&self.month), Some(&self.year))
    }
}

/// Advanced filter over the cache.
///
/// The contract term drives the search; month and year only narrow it.
/// Without a contract term nothing matches.
pub fn advanced_filter(cache: &[TimecardEntry], q: &AdvancedQuery) -> Vec<TimecardEntry> {
    let contract = clean_term(&q.contract);
    let month = clean_term(&q.month);
    let year = clean_term(&q.year);

    let keep = |e: &TimecardEntry| -> bool {
        let c = field_contains(&e.contract_name, &contract);
        match (!month.is_empty(), !year.is_empty()) {
            (true, true) => c && field_contains(&e.month, &month) && field_contains(&e.year, &year),
            (true, false) => c && field_contains(&e.month, &month),
            (false, true) => c && field_contains(&e.year, &year),
            (false, false) => c,
        }
    };

    if contract.is_empty() {
        return Vec::new();
    }

    cache.iter().filter(|e| keep(e)).cloned().collect()
}

/// Total hours for `filter`, read from the store. An empty contract term
/// is zero and does not touch the store.
pub fn sum_hours(store: &RecordStore, filter: &HoursFilter) -> AppResult<f64> {
    if filter.is_empty() {
        return Ok(0.0);
    }
    store.sum_hours(filter)
}

/// Rows shown for a search plus the hours total that goes with them.
/// `total_hours` is `None` when the store could not compute it; the rows
/// are still valid in that case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub rows: Vec<TimecardEntry>,
    pub total_hours: Option<f64>,
}
