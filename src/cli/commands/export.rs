use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AdvancedQuery;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportLogic, ReportView, default_file_name};
use crate::ui::messages::{error, info};
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        term,
        contract,
        month,
        year,
        format,
        file,
        force,
    } = cmd
    {
        let mut session = open_session(cfg)?;

        let result = match contract {
            Some(c) => {
                let q = AdvancedQuery::new(
                    c,
                    month.as_deref().unwrap_or(""),
                    year.as_deref().unwrap_or(""),
                );
                session.advanced_search(&q)
            }
            None => session.search(term.as_deref().unwrap_or("")),
        };

        let path = match file {
            Some(f) => f.clone(),
            None => {
                let dir: PathBuf = expand_tilde(&cfg.report_dir);
                dir.join(default_file_name(session.last_term(), *format))
            }
        };

        if result.total_hours.is_none() {
            error("Total Hours Spent could not be computed; exporting rows without it.");
        }
        let view = ReportView::from_entries(&cfg.report_title, &result.rows, result.total_hours);

        match ExportLogic::export(&view, *format, &path, *force) {
            Ok(()) => {}
            Err(AppError::ExportCancelled(reason)) => info(format!("Export cancelled: {reason}")),
            Err(e) => error(format!("Export failed: {e}")),
        }
    }

    Ok(())
}
