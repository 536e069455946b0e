//! Working session: the store, the cached snapshot of all entries and the
//! last search state, passed explicitly to whoever needs them.

use crate::core::import::{self, ImportObserver, ImportReport};
use crate::core::query::{self, AdvancedQuery, SearchResult};
use crate::db::{HoursFilter, RecordStore};
use crate::errors::AppResult;
use crate::models::TimecardEntry;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct Session {
    store: RecordStore,
    cache: Vec<TimecardEntry>,
    stale: Rc<Cell<bool>>,
    last_total: Option<f64>,
    last_term: String,
}

impl Session {
    /// Wrap `store`, subscribe to its change events and load the cache.
    pub fn open(mut store: RecordStore) -> AppResult<Self> {
        let stale = Rc::new(Cell::new(true));
        let flag = Rc::clone(&stale);
        store.subscribe(move |_| flag.set(true));

        let mut session = Self {
            store,
            cache: Vec::new(),
            stale,
            last_total: Some(0.0),
            last_term: String::new(),
        };
        session.refresh()?;
        Ok(session)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    /// Current snapshot, ordered by entry id.
    pub fn cache(&self) -> &[TimecardEntry] {
        &self.cache
    }

    /// Total of the last search; `None` if the store failed to compute it.
    pub fn last_total(&self) -> Option<f64> {
        self.last_total
    }

    /// The term of the last search; names the default report file.
    pub fn last_term(&self) -> &str {
        &self.last_term
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Reload the cache from the store.
    pub fn refresh(&mut self) -> AppResult<()> {
        self.cache = self.store.find_all()?;
        self.stale.set(false);
        tracing::debug!(rows = self.cache.len(), "cache refreshed");
        Ok(())
    }

    fn refresh_if_stale(&mut self) -> AppResult<()> {
        if self.stale.get() {
            self.refresh()?;
        }
        Ok(())
    }

    /// Import files and bring the cache up to date afterwards.
    pub fn import_files(
        &mut self,
        files: &[PathBuf],
        observer: &mut dyn ImportObserver,
    ) -> AppResult<ImportReport> {
        let report = import::import_files(&mut self.store, files, observer);
        self.refresh_if_stale()?;
        Ok(report)
    }

    /// Search the cache and total the matching contract hours in the store.
    /// A failing total is logged and reported as `None`; the rows are kept.
    pub fn search(&mut self, term: &str) -> SearchResult {
        let rows = query::filter_entries(&self.cache, term);
        let total_hours = self.total_for(&HoursFilter::contract(term));

        self.last_term = term.trim().to_string();
        self.last_total = total_hours;
        SearchResult { rows, total_hours }
    }

    /// Contract / month / year search with its store-side total.
    pub fn advanced_search(&mut self, q: &AdvancedQuery) -> SearchResult {
        let rows = query::advanced_filter(&self.cache, q);
        let total_hours = self.total_for(&q.hours_filter());

        self.last_term = q.contract.trim().to_string();
        self.last_total = total_hours;
        SearchResult { rows, total_hours }
    }

    fn total_for(&self, filter: &HoursFilter) -> Option<f64> {
        match query::sum_hours(&self.store, filter) {
            Ok(total) => Some(total),
            Err(e) => {
                tracing::error!(contract = %filter.contract, error = %e, "hours total failed");
                None
            }
        }
    }

    /// Forget the last search.
    pub fn clear(&mut self) {
        self.last_term.clear();
        self.last_total = Some(0.0);
    }

    pub fn delete_entries(&mut self, ids: &[i64]) -> AppResult<usize> {
        let removed = self.store.delete(ids)?;
        self.refresh_if_stale()?;
        Ok(removed)
    }

    pub fn delete_sheet(&mut self, source_file: &str, sheet_name: &str) -> AppResult<usize> {
        let removed = self.store.delete_by_source(source_file, sheet_name)?;
        self.refresh_if_stale()?;
        Ok(removed)
    }
}
