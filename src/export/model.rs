use crate::models::{ENTRY_HEADERS, TimecardEntry};
use crate::utils::format_hours;
use serde::Serialize;

/// A displayed result set ready to be rendered: headings, cells and the
/// hours total computed for the search that produced it. A missing total
/// serializes as `null`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ReportView {
    pub title: String,
    pub total_hours: Option<f64>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportView {
    pub fn from_entries(title: &str, entries: &[TimecardEntry], total_hours: Option<f64>) -> Self {
        Self {
            title: title.to_string(),
            total_hours,
            headers: ENTRY_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: entries.iter().map(TimecardEntry::display_row).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total as printed in reports.
    pub fn total_text(&self) -> String {
        match self.total_hours {
            Some(h) => format_hours(h),
            None => "Error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_follows_entry_headers() {
        let e = TimecardEntry {
            entry_id: 7,
            name: "Dana".into(),
            month: "March".into(),
            year: "2024".into(),
            contract_name: "ALPHA".into(),
            project_manager: String::new(),
            hours: 7.5,
            source_file: "card.xlsx".into(),
            sheet_name: "S1".into(),
        };
        let v = ReportView::from_entries("Timecard Report", &[e], Some(7.5));

        assert_eq!(v.headers.len(), ENTRY_HEADERS.len());
        assert_eq!(v.rows[0][0], "7");
        assert_eq!(v.rows[0][6], "7.5");
        assert_eq!(v.total_text(), "7.5");
        assert!(!v.is_empty());
    }

    #[test]
    fn missing_total_is_marked_as_error() {
        let v = ReportView::from_entries("Timecard Report", &[], None);
        assert_eq!(v.total_text(), "Error");
        let json = serde_json::to_value(&v).unwrap();
        assert!(json["total_hours"].is_null());
    }
}
