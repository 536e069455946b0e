use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::RecordStore;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db { info: show_info, check } = cmd {
        if !*show_info && !*check {
            info("Nothing to do. Use --info or --check.");
            return Ok(());
        }

        // Brings an older schema up to date before reading it.
        RecordStore::open(&cfg.database)?;
        let pool = DbPool::new(&cfg.database)?;

        if *show_info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let problems = stats::integrity_check(&pool)?;
            if problems.is_empty() {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{}", RED, RESET);
                for p in problems {
                    println!("  {}", p);
                }
                println!();
            }
        }
    }

    Ok(())
}
