use crate::config::Config;
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::format_hours;
use crate::utils::table::Table;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = RecordStore::open(&cfg.database)?;
    let sources = store.list_sources()?;

    if sources.is_empty() {
        info("Nothing imported yet.");
        return Ok(());
    }

    header("Imported sheets");
    let rows = sources
        .iter()
        .map(|s| {
            vec![
                s.source_file.clone(),
                s.sheet_name.clone(),
                s.rows.to_string(),
                format_hours(s.hours),
            ]
        })
        .collect();
    let table = Table::fitted(&["Source_File", "Sheet_Name", "Rows", "Hours"], rows);
    print!("{}", table.render());
    Ok(())
}
