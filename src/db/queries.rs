//! Parameterized statements against the `Entries` table.
//! Every function works on a borrowed connection (or transaction) so the
//! store decides where a unit of work begins and ends.

use crate::db::filter::HoursFilter;
use crate::errors::AppResult;
use crate::models::{NewEntry, TimecardEntry};
use crate::utils::casefold;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const SELECT_ENTRY: &str = "SELECT Entry_ID, Name, Month, Year, Contract_Name, Project_Manager,
            Hours, Source_File, Sheet_Name
     FROM Entries";

/// One imported `(source_file, sheet_name)` group.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSummary {
    pub source_file: String,
    pub sheet_name: String,
    pub rows: i64,
    pub hours: f64,
}

pub fn map_row(row: &Row) -> Result<TimecardEntry> {
    Ok(TimecardEntry {
        entry_id: row.get("Entry_ID")?,
        name: row.get("Name")?,
        month: row.get("Month")?,
        year: row.get("Year")?,
        contract_name: row.get("Contract_Name")?,
        project_manager: row.get("Project_Manager")?,
        hours: row.get("Hours")?,
        source_file: row.get("Source_File")?,
        sheet_name: row.get("Sheet_Name")?,
    })
}

/// Insert one row and return the id the store assigned to it.
pub fn insert_entry(conn: &Connection, e: &NewEntry) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO Entries
            (Name, Month, Year, Contract_Name, Project_Manager, Hours, Source_File, Sheet_Name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    stmt.execute(params![
        e.name,
        e.month,
        e.year,
        e.contract_name,
        e.project_manager,
        e.hours,
        e.source_file,
        e.sheet_name,
    ])?;
    Ok(conn.last_insert_rowid())
}

pub fn source_exists(conn: &Connection, source_file: &str, sheet_name: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM Entries WHERE Source_File = ?1 AND Sheet_Name = ?2 LIMIT 1",
            params![source_file, sheet_name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn load_all(conn: &Connection) -> Result<Vec<TimecardEntry>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ENTRY} ORDER BY Entry_ID ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_by_contract_substring(conn: &Connection, term: &str) -> Result<Vec<TimecardEntry>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_ENTRY} WHERE instr(casefold(Contract_Name), ?1) > 0 ORDER BY Entry_ID ASC"
    ))?;
    let rows = stmt.query_map([casefold(term)], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Sum of `Hours` over the rows matched by `filter`.
pub fn sum_hours(conn: &Connection, filter: &HoursFilter) -> Result<f64> {
    let (clause, values) = filter.to_where();
    let sql = format!("SELECT COALESCE(SUM(Hours), 0.0) FROM Entries WHERE {clause}");
    conn.query_row(&sql, params_from_iter(values), |row| row.get(0))
}

pub fn delete_entry(conn: &Connection, entry_id: i64) -> Result<usize> {
    conn.execute("DELETE FROM Entries WHERE Entry_ID = ?1", [entry_id])
}

pub fn delete_source(conn: &Connection, source_file: &str, sheet_name: &str) -> Result<usize> {
    conn.execute(
        "DELETE FROM Entries WHERE Source_File = ?1 AND Sheet_Name = ?2",
        params![source_file, sheet_name],
    )
}

pub fn list_sources(conn: &Connection) -> AppResult<Vec<SourceSummary>> {
    let mut stmt = conn.prepare(
        "SELECT Source_File, Sheet_Name, COUNT(*), COALESCE(SUM(Hours), 0.0)
         FROM Entries
         GROUP BY Source_File, Sheet_Name
         ORDER BY Source_File ASC, Sheet_Name ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(SourceSummary {
            source_file: row.get(0)?,
            sheet_name: row.get(1)?,
            rows: row.get(2)?,
            hours: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
