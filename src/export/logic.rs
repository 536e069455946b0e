use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ReportView;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub struct ExportLogic;

impl ExportLogic {
    /// Render `view` to `path` in `format`.
    ///
    /// An existing file is replaced only with `force` or after the user
    /// confirms; a declined prompt yields `AppError::ExportCancelled` and
    /// leaves the file untouched.
    pub fn export(view: &ReportView, format: ExportFormat, path: &Path, force: bool) -> AppResult<()> {
        ensure_writable(path, force)?;
        ensure_parent(path)?;

        if view.is_empty() {
            warning("The report has no rows; writing headings only.");
        }

        match format {
            ExportFormat::Csv => export_csv(view, path)?,
            ExportFormat::Json => export_json(view, path)?,
            ExportFormat::Xlsx => export_xlsx(view, path)?,
            ExportFormat::Pdf => export_pdf(view, path)?,
        }

        tracing::info!(path = %path.display(), format = format.as_str(), rows = view.rows.len(), "report exported");
        Ok(())
    }
}

fn slug_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\-]").ok()).as_ref()
}

/// Search term with every character outside `[\w-]` replaced by `_`.
pub fn slugify(term: &str) -> String {
    match slug_pattern() {
        Some(re) => re.replace_all(term, "_").into_owned(),
        None => term
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect(),
    }
}

/// `timecard_report_<slug>.<ext>` for the active search term.
pub fn default_file_name(term: &str, format: ExportFormat) -> String {
    format!("timecard_report_{}.{}", slugify(term), format.as_str())
}
