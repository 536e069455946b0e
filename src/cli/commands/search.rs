use crate::cli::commands::{open_session, print_entries, print_total};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AdvancedQuery;
use crate::errors::AppResult;
use crate::ui::messages::header;

/// Handle `search`, `advanced` and `list`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut session = open_session(cfg)?;

    match cmd {
        Commands::Search { term } => {
            let term = term.as_deref().unwrap_or("");
            let result = session.search(term);

            if term.trim().is_empty() {
                header("All entries");
            } else {
                header(format!("Search: {}", term.trim()));
            }
            print_entries(&result.rows);
            print_total(result.total_hours);
        }
        Commands::Advanced {
            contract,
            month,
            year,
        } => {
            let q = AdvancedQuery::new(contract, month, year);
            let result = session.advanced_search(&q);

            header(format!(
                "Contract: {} | Month: {} | Year: {}",
                show(contract),
                show(month),
                show(year)
            ));
            print_entries(&result.rows);
            print_total(result.total_hours);
        }
        Commands::List => {
            header("All entries");
            print_entries(session.cache());
        }
        _ => {}
    }

    Ok(())
}

fn show(v: &str) -> &str {
    if v.trim().is_empty() { "-" } else { v.trim() }
}
