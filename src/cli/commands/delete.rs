use crate::cli::commands::{ask_confirmation, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::DataChange;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};

fn parse_ids(raw: &[String]) -> AppResult<Vec<i64>> {
    raw.iter()
        .map(|s| {
            s.trim()
                .parse::<i64>()
                .map_err(|_| AppError::InvalidEntryId(s.clone()))
        })
        .collect()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Delete {
        ids,
        source,
        sheet,
        yes,
    } = cmd
    {
        let target = match (ids.is_empty(), source, sheet) {
            (false, _, _) => Target::Ids(parse_ids(ids)?),
            (true, Some(file), Some(sheet)) => Target::Sheet(file.clone(), sheet.clone()),
            _ => {
                warning("Nothing to delete. Use --id <ID>... or --source <FILE> --sheet <SHEET>.");
                return Ok(());
            }
        };

        let prompt = match &target {
            Target::Ids(ids) => format!(
                "Delete {} entr{} ({})? This action is irreversible.",
                ids.len(),
                if ids.len() == 1 { "y" } else { "ies" },
                ids.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")
            ),
            Target::Sheet(file, sheet) => format!(
                "Delete every entry imported from {} / {}? This action is irreversible.",
                file, sheet
            ),
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut session = open_session(cfg)?;
        session.store_mut().subscribe(|change| {
            if let DataChange::Deleted { rows } = change {
                success(format!("{} entr{} deleted.", rows, if *rows == 1 { "y" } else { "ies" }));
            }
        });

        let result = match &target {
            Target::Ids(ids) => session.delete_entries(ids),
            Target::Sheet(file, sheet) => session.delete_sheet(file, sheet),
        };

        match result {
            Ok(0) => info("No matching entries; nothing deleted."),
            Ok(_) => {}
            Err(e) => error(format!("Delete failed, nothing was removed: {e}")),
        }
    }

    Ok(())
}

enum Target {
    Ids(Vec<i64>),
    Sheet(String, String),
}
