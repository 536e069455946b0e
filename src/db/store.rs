//! Record store: CRUD over timecard entries.
//!
//! Every operation opens its own connection, does one unit of work and
//! drops the connection. Writes and deletes run in a transaction and emit a
//! [`DataChange`] only after the commit succeeded.

use crate::core::events::{ChangeBus, DataChange};
use crate::db::filter::HoursFilter;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::{self, SourceSummary};
use crate::errors::{AppError, AppResult};
use crate::models::{NewEntry, TimecardEntry};
use rusqlite::Transaction;

pub struct RecordStore {
    path: String,
    bus: ChangeBus,
}

/// Insert handle for a single sheet; lives inside the sheet's transaction.
pub struct SheetWriter<'a> {
    tx: &'a Transaction<'a>,
    inserted: usize,
}

impl SheetWriter<'_> {
    /// Insert one validated row and return its new `entry_id`.
    pub fn insert(&mut self, entry: &NewEntry) -> AppResult<i64> {
        entry.validate().map_err(AppError::InvalidEntry)?;
        let id = queries::insert_entry(self.tx, entry)?;
        self.inserted += 1;
        Ok(id)
    }

    pub fn inserted(&self) -> usize {
        self.inserted
    }
}

impl RecordStore {
    /// Open the store at `path`, creating or upgrading the schema.
    /// Failing here means the store is unusable for the whole session.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self {
            path: path.to_string(),
            bus: ChangeBus::new(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Register a listener for data-changed events.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&DataChange) + 'static,
    {
        self.bus.subscribe(listener);
    }

    fn connect(&self) -> AppResult<DbPool> {
        Ok(DbPool::new(&self.path)?)
    }

    /// Insert a single entry in its own transaction.
    pub fn insert(&mut self, entry: &NewEntry) -> AppResult<i64> {
        let mut ids = Vec::with_capacity(1);
        self.write_sheet(&entry.source_file, &entry.sheet_name, |w| {
            ids.push(w.insert(entry)?);
            Ok(())
        })?;
        ids.pop()
            .ok_or_else(|| AppError::Other("insert produced no id".into()))
    }

    /// Insert a batch of rows of one sheet in one transaction; either all
    /// rows are kept or none.
    pub fn insert_sheet(&mut self, entries: &[NewEntry]) -> AppResult<usize> {
        let Some(first) = entries.first() else {
            return Ok(0);
        };
        let (source_file, sheet_name) = (first.source_file.clone(), first.sheet_name.clone());
        self.write_sheet(&source_file, &sheet_name, |w| {
            for e in entries {
                w.insert(e)?;
            }
            Ok(())
        })
    }

    /// Run `fill` inside one transaction for the given sheet. If `fill`
    /// returns an error nothing of the sheet is kept. Returns the number of
    /// rows written.
    pub fn write_sheet<F>(&mut self, source_file: &str, sheet_name: &str, fill: F) -> AppResult<usize>
    where
        F: FnOnce(&mut SheetWriter<'_>) -> AppResult<()>,
    {
        let mut pool = self.connect()?;
        let tx = pool.conn.transaction()?;

        let inserted = {
            let mut writer = SheetWriter {
                tx: &tx,
                inserted: 0,
            };
            fill(&mut writer)?;
            writer.inserted
        };

        tx.commit()?;

        if inserted > 0 {
            self.bus.emit(&DataChange::Imported {
                source_file: source_file.to_string(),
                sheet_name: sheet_name.to_string(),
                rows: inserted,
            });
        }
        Ok(inserted)
    }

    /// Whether any entry already carries this `(source_file, sheet_name)`.
    pub fn exists(&self, source_file: &str, sheet_name: &str) -> AppResult<bool> {
        let pool = self.connect()?;
        Ok(queries::source_exists(&pool.conn, source_file, sheet_name)?)
    }

    /// Full snapshot ordered by `entry_id`.
    pub fn find_all(&self) -> AppResult<Vec<TimecardEntry>> {
        let pool = self.connect()?;
        Ok(queries::load_all(&pool.conn)?)
    }

    pub fn find_by_contract_substring(&self, term: &str) -> AppResult<Vec<TimecardEntry>> {
        let pool = self.connect()?;
        Ok(queries::find_by_contract_substring(&pool.conn, term)?)
    }

    pub fn sum_hours(&self, filter: &HoursFilter) -> AppResult<f64> {
        let pool = self.connect()?;
        Ok(queries::sum_hours(&pool.conn, filter)?)
    }

    pub fn list_sources(&self) -> AppResult<Vec<SourceSummary>> {
        let pool = self.connect()?;
        queries::list_sources(&pool.conn)
    }

    /// Delete the given ids in one transaction. Ids that do not exist are
    /// ignored; any failure rolls the whole batch back.
    pub fn delete(&mut self, entry_ids: &[i64]) -> AppResult<usize> {
        let mut pool = self.connect()?;
        let tx = pool.conn.transaction()?;

        let mut removed = 0;
        for id in entry_ids {
            removed += queries::delete_entry(&tx, *id)?;
        }
        tx.commit()?;

        tracing::info!(requested = entry_ids.len(), removed, "entries deleted");
        if removed > 0 {
            self.bus.emit(&DataChange::Deleted { rows: removed });
        }
        Ok(removed)
    }

    /// Delete every entry imported from `(source_file, sheet_name)`.
    pub fn delete_by_source(&mut self, source_file: &str, sheet_name: &str) -> AppResult<usize> {
        let mut pool = self.connect()?;
        let tx = pool.conn.transaction()?;
        let removed = queries::delete_source(&tx, source_file, sheet_name)?;
        tx.commit()?;

        tracing::info!(source_file, sheet_name, removed, "sheet deleted");
        if removed > 0 {
            self.bus.emit(&DataChange::Deleted { rows: removed });
        }
        Ok(removed)
    }
}
