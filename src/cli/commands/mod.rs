pub mod config;
pub mod db;
pub mod delete;
pub mod export;
pub mod import;
pub mod init;
pub mod search;
pub mod sources;

use crate::config::Config;
use crate::core::Session;
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::models::{ENTRY_HEADERS, TimecardEntry};
use crate::ui::messages::{error, info, warning};
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::format_hours;
use crate::utils::table::Table;
use std::io::{self, Write};

/// Open the configured store and load the session cache.
pub(crate) fn open_session(cfg: &Config) -> AppResult<Session> {
    let store = RecordStore::open(&cfg.database)?;
    Session::open(store)
}

/// Print entries as a table, or a notice when there are none.
pub(crate) fn print_entries(rows: &[TimecardEntry]) {
    if rows.is_empty() {
        info("No entries found.");
        return;
    }

    let table = Table::fitted(
        &ENTRY_HEADERS,
        rows.iter().map(TimecardEntry::display_row).collect(),
    );
    print!("{}", table.render());
    println!("{}{} row(s){}", CYAN, rows.len(), RESET);
}

pub(crate) fn print_total(total: Option<f64>) {
    match total {
        Some(total) => println!(
            "{}Total Hours Spent:{} {}{}{}",
            CYAN,
            RESET,
            GREEN,
            format_hours(total),
            RESET
        ),
        None => error("Total Hours Spent: Error (see log)"),
    }
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
