use crate::db::migrate::current_version;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::format_hours;
use std::fs;

#[derive(Debug, Clone, PartialEq)]
pub struct DbStats {
    pub file_size: u64,
    pub schema_version: i32,
    pub entries: i64,
    pub sources: i64,
    pub contracts: i64,
    pub total_hours: f64,
}

pub fn collect(pool: &DbPool, db_path: &str) -> AppResult<DbStats> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let (entries, sources, contracts, total_hours) = pool.conn.query_row(
        "SELECT COUNT(*),
                COUNT(DISTINCT Source_File || '|' || Sheet_Name),
                COUNT(DISTINCT Contract_Name),
                COALESCE(SUM(Hours), 0.0)
         FROM Entries",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
    )?;

    Ok(DbStats {
        file_size,
        schema_version: current_version(&pool.conn)?,
        entries,
        sources,
        contracts,
        total_hours,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let s = collect(pool, db_path)?;
    let file_mb = (s.file_size as f64) / (1024.0 * 1024.0);

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Schema version:{} {}", CYAN, RESET, s.schema_version);
    println!("{}• Entries:{} {}{}{}", CYAN, RESET, GREEN, s.entries, RESET);
    println!("{}• Imported sheets:{} {}", CYAN, RESET, s.sources);
    println!("{}• Contracts:{} {}", CYAN, RESET, s.contracts);
    println!(
        "{}• Total hours:{} {}",
        CYAN,
        RESET,
        format_hours(s.total_hours)
    );
    println!();
    Ok(())
}

/// Run `PRAGMA integrity_check`; returns the problems found (empty = ok).
pub fn integrity_check(pool: &DbPool) -> AppResult<Vec<String>> {
    let mut stmt = pool.conn.prepare("PRAGMA integrity_check")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut problems = Vec::new();
    for r in rows {
        let line = r?;
        if line != "ok" {
            problems.push(line);
        }
    }
    Ok(problems)
}
