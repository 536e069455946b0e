use crate::errors::{AppError, AppResult};
use crate::export::model::ReportView;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Pretty-printed JSON of the whole view, total included.
pub(crate) fn export_json(view: &ReportView, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(view)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Header row followed by the displayed cells.
pub(crate) fn export_csv(view: &ReportView, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&view.headers)?;
    for row in &view.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
