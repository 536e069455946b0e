//! SQLite connection wrapper. One `DbPool` is opened per store operation
//! and dropped when the operation finishes.

use crate::utils::casefold;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        register_casefold(&conn)?;
        Ok(Self { conn })
    }
}

/// `casefold(x)`: the Rust-side [`casefold`] exposed to SQL. NULL stays NULL;
/// numbers are folded through their text form.
fn register_casefold(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let folded = match ctx.get_raw(0) {
                ValueRef::Null => None,
                ValueRef::Integer(i) => Some(i.to_string()),
                ValueRef::Real(f) => Some(f.to_string()),
                ValueRef::Text(t) | ValueRef::Blob(t) => {
                    Some(casefold(&String::from_utf8_lossy(t)))
                }
            };
            Ok(folded)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casefold_is_available_in_sql() {
        let pool = DbPool::new(":memory:").unwrap();
        let folded: String = pool
            .conn
            .query_row("SELECT casefold(' Über Bau ')", [], |r| r.get(0))
            .unwrap();
        assert_eq!(folded, "überbau");
        let null: Option<String> = pool
            .conn
            .query_row("SELECT casefold(NULL)", [], |r| r.get(0))
            .unwrap();
        assert_eq!(null, None);
    }
}
