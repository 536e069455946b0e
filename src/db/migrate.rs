//! Schema migrations, tracked with `PRAGMA user_version`.
//!
//! Each migration runs inside its own transaction together with the
//! version bump, so a failed step leaves the schema at the previous version.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

pub const TABLE_NAME: &str = "Entries";

struct Migration {
    version: i32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_entries",
        sql: r#"
        CREATE TABLE IF NOT EXISTS Entries (
            Entry_ID        INTEGER PRIMARY KEY AUTOINCREMENT,
            Name            TEXT NOT NULL DEFAULT '',
            Month           TEXT NOT NULL DEFAULT '',
            Year            TEXT NOT NULL DEFAULT '',
            Contract_Name   TEXT NOT NULL
                CHECK (length(trim(Contract_Name)) > 0 AND lower(trim(Contract_Name)) <> 'nan'),
            Project_Manager TEXT NOT NULL DEFAULT '',
            Hours           REAL NOT NULL CHECK (Hours > 0),
            Source_File     TEXT NOT NULL,
            Sheet_Name      TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: 2,
        name: "index_source_and_contract",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_entries_source ON Entries(Source_File, Sheet_Name);
        CREATE INDEX IF NOT EXISTS idx_entries_contract ON Entries(Contract_Name);
        "#,
    },
];

/// Latest schema version known to this build.
pub fn latest_version() -> i32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

pub fn current_version(conn: &Connection) -> AppResult<i32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()` when a store is opened.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let current = current_version(conn)?;

    if current > latest_version() {
        return Err(AppError::Migration(format!(
            "database schema version {current} is newer than this build ({})",
            latest_version()
        )));
    }

    for m in MIGRATIONS.iter().filter(|m| m.version > current) {
        // user_version cannot be bound as a parameter; the value is a constant.
        let batch = format!(
            "BEGIN;\n{}\nPRAGMA user_version = {};\nCOMMIT;",
            m.sql, m.version
        );

        if let Err(e) = conn.execute_batch(&batch) {
            conn.execute_batch("ROLLBACK;").ok();
            return Err(AppError::Migration(format!(
                "{} (v{}) failed: {e}",
                m.name, m.version
            )));
        }

        tracing::info!(version = m.version, name = m.name, "migration applied");
    }

    Ok(())
}
