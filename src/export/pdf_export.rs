use crate::errors::{AppError, AppResult};
use crate::export::model::ReportView;
use crate::export::notify_export_success;
use crate::export::pdf::{PdfManager, ReportHeading};
use crate::ui::messages::info;
use std::path::Path;

pub(crate) fn export_pdf(view: &ReportView, path: &Path) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let total_line = format!("Total Hours Spent: {}", view.total_text());
    let subtitle = format!(
        "Generated by Timecard Vault on {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    let heading = ReportHeading {
        title: &view.title,
        total_line: &total_line,
        subtitle: &subtitle,
    };

    let mut pdf = PdfManager::new();
    pdf.write_report(&heading, &view.headers, &view.rows);
    tracing::debug!(pages = pdf.page_count(), rows = view.rows.len(), "pdf laid out");

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("cannot write {}: {e}", path.display())))?;

    notify_export_success("PDF", path);
    Ok(())
}
