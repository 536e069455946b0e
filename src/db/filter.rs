//! Filters for store-side hour aggregation.
//!
//! A [`HoursFilter`] is a set of optional predicates. It is turned into a
//! fixed `WHERE` clause plus bound parameters; user text never becomes part
//! of the SQL string.

use crate::utils::casefold;
use rusqlite::types::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoursFilter {
    /// Casefolded substring looked for in `Contract_Name`.
    pub contract: String,
    /// Exact month, casefolded.
    pub month: Option<String>,
    /// Exact year, casefolded.
    pub year: Option<String>,
}

impl HoursFilter {
    /// Build a filter from raw user input. Every term goes through
    /// [`casefold`]; blank month/year terms are treated as absent.
    pub fn new(contract: &str, month: Option<&str>, year: Option<&str>) -> Self {
        let clean = |s: Option<&str>| s.map(casefold).filter(|v| !v.is_empty());
        Self {
            contract: casefold(contract),
            month: clean(month),
            year: clean(year),
        }
    }

    pub fn contract(term: &str) -> Self {
        Self::new(term, None, None)
    }

    /// An empty contract term means "nothing to aggregate".
    pub fn is_empty(&self) -> bool {
        self.contract.is_empty()
    }

    /// `WHERE` clause body and its parameters, in placeholder order.
    ///
    /// Columns are compared through the `casefold` SQL function registered
    /// by [`crate::db::DbPool`], so the store matches exactly what the
    /// session cache matches.
    pub fn to_where(&self) -> (String, Vec<Value>) {
        let mut clauses = vec!["instr(casefold(Contract_Name), ?) > 0".to_string()];
        let mut params = vec![Value::Text(self.contract.clone())];

        if let Some(month) = &self.month {
            clauses.push("casefold(Month) = ?".to_string());
            params.push(Value::Text(month.clone()));
        }

        if let Some(year) = &self.year {
            clauses.push("casefold(Year) = ?".to_string());
            params.push(Value::Text(year.clone()));
        }

        (clauses.join(" AND "), params)
    }
}
