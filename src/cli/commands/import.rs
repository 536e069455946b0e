use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ImportObserver, SheetOutcome, SheetReport};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use crate::ui::progress::SheetProgress;
use crate::utils::colors::{CYAN, RESET};
use std::path::Path;

/// Draws one progress bar per sheet and a notice when the sheet is done.
struct CliObserver {
    quiet: bool,
    bar: Option<SheetProgress>,
}

impl ImportObserver for CliObserver {
    fn sheet_started(&mut self, source_file: &str, sheet_name: &str) {
        self.bar = Some(SheetProgress::new(
            format!("{source_file} / {sheet_name}"),
            self.quiet,
        ));
    }

    fn progress(&mut self, percent: f64) {
        if let Some(bar) = &self.bar {
            bar.set(percent);
        }
    }

    fn sheet_finished(&mut self, report: &SheetReport) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }

        let label = format!("{} / {}", report.source_file, report.sheet_name);
        match &report.outcome {
            SheetOutcome::Imported { rows, skipped_rows } => {
                if *skipped_rows > 0 {
                    success(format!(
                        "{label}: {rows} row(s) imported, {skipped_rows} skipped"
                    ));
                } else {
                    success(format!("{label}: {rows} row(s) imported"));
                }
            }
            SheetOutcome::SkippedExample => info(format!("{label}: example sheet skipped")),
            SheetOutcome::Duplicate => {
                warning(format!("{label}: already imported, skipped"))
            }
            SheetOutcome::MissingIdentity => warning(format!(
                "{label}: no Name, Month or Year value, sheet skipped"
            )),
            SheetOutcome::Failed(reason) => error(format!("{label}: {reason}")),
        }
    }

    fn file_failed(&mut self, file: &Path, reason: &str) {
        error(format!("{}: {}", file.display(), reason));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { files, quiet } = cmd {
        let mut session = open_session(cfg)?;
        let mut observer = CliObserver {
            quiet: *quiet,
            bar: None,
        };

        let report = session.import_files(files, &mut observer)?;

        println!();
        println!(
            "{}Imported {} row(s) from {} sheet(s); {} duplicate, {} failed, {} unreadable file(s).{}",
            CYAN,
            report.imported_rows(),
            report.count(|o| matches!(o, SheetOutcome::Imported { .. })),
            report.count(|o| matches!(o, SheetOutcome::Duplicate)),
            report.count(|o| matches!(o, SheetOutcome::Failed(_) | SheetOutcome::MissingIdentity)),
            report.failed_files.len(),
            RESET
        );
        println!("{}Entries in store: {}{}", CYAN, session.cache().len(), RESET);
    }

    Ok(())
}
