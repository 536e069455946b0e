mod common;

use common::{setup_test_db, standard_workbook};
use std::cell::RefCell;
use std::rc::Rc;
use timecard_vault::core::import::Silent;
use timecard_vault::core::{AdvancedQuery, DataChange, Session};
use timecard_vault::db::RecordStore;
use timecard_vault::errors::AppError;
use timecard_vault::models::NewEntry;

/// Session over a store holding the standard March/April workbook:
/// ALPHA 10 + 2 (March) + 4 (April), BETA 5.5 (March) + 3 (April).
fn loaded_session(name: &str) -> Session {
    let db = setup_test_db(name);
    let file = standard_workbook(&format!("{name}.xlsx"));
    let mut session = Session::open(RecordStore::open(&db).unwrap()).unwrap();
    session.import_files(&[file], &mut Silent).unwrap();
    session
}

fn entry(contract: &str, hours: f64) -> NewEntry {
    NewEntry {
        name: "Ana".into(),
        month: "May".into(),
        year: "2025".into(),
        contract_name: contract.into(),
        project_manager: String::new(),
        hours,
        source_file: "manual".into(),
        sheet_name: "S1".into(),
    }
}

#[test]
fn contract_totals_follow_the_filter() {
    let mut s = loaded_session("sess_totals");
    assert_eq!(s.cache().len(), 5);

    let alpha = s.search("alpha");
    assert_eq!(alpha.rows.len(), 3);
    assert_eq!(alpha.total_hours, Some(16.0));
    assert_eq!(s.last_total(), Some(16.0));
    assert_eq!(s.last_term(), "alpha");

    assert_eq!(s.search(" Al Pha ").total_hours, Some(16.0));
    assert_eq!(s.search("BETA").total_hours, Some(8.5));
}

#[test]
fn advanced_totals_narrow_by_month_and_year() {
    let mut s = loaded_session("sess_advanced");

    let r = s.advanced_search(&AdvancedQuery::new("alpha", "march", ""));
    assert_eq!(r.rows.len(), 2);
    assert_eq!(r.total_hours, Some(12.0));

    let r = s.advanced_search(&AdvancedQuery::new("ALPHA", "MARCH", "2024"));
    assert_eq!(r.total_hours, Some(12.0));

    let r = s.advanced_search(&AdvancedQuery::new("beta", "", "2024"));
    assert_eq!(r.rows.len(), 2);
    assert_eq!(r.total_hours, Some(8.5));

    let r = s.advanced_search(&AdvancedQuery::new("alpha", "", "2023"));
    assert!(r.rows.is_empty());
    assert_eq!(r.total_hours, Some(0.0));
}

#[test]
fn non_ascii_terms_match_rows_and_totals_alike() {
    let db = setup_test_db("sess_unicode");
    let mut s = Session::open(RecordStore::open(&db).unwrap()).unwrap();
    let mut uber = entry("Über", 8.0);
    uber.month = "März".into();
    s.store_mut().insert(&uber).unwrap();
    s.store_mut().insert(&entry("Éclair", 2.0)).unwrap();
    s.refresh().unwrap();

    let r = s.search("über");
    assert_eq!(r.rows.len(), 1);
    assert_eq!(r.total_hours, Some(8.0));

    assert_eq!(s.search("ÉCLAIR").total_hours, Some(2.0));

    let r = s.advanced_search(&AdvancedQuery::new("ÜBER", "MÄRZ", "2025"));
    assert_eq!(r.rows.len(), 1);
    assert_eq!(r.total_hours, Some(8.0));
}

#[test]
fn failed_total_keeps_the_rows() {
    let mut s = loaded_session("sess_total_failure");

    let conn = rusqlite::Connection::open(s.store().path()).unwrap();
    conn.execute_batch("DROP TABLE Entries;").unwrap();

    let r = s.search("alpha");
    assert_eq!(r.rows.len(), 3);
    assert_eq!(r.total_hours, None);
    assert_eq!(s.last_total(), None);

    let r = s.advanced_search(&AdvancedQuery::new("beta", "march", ""));
    assert_eq!(r.rows.len(), 1);
    assert_eq!(r.total_hours, None);
}

#[test]
fn empty_search_returns_cache_and_zero_total() {
    let mut s = loaded_session("sess_empty_search");
    s.search("alpha");

    let r = s.search("   ");
    assert_eq!(r.rows.len(), 5);
    assert_eq!(r.total_hours, Some(0.0));
    assert_eq!(s.last_total(), Some(0.0));

    s.clear();
    assert_eq!(s.last_term(), "");
}

#[test]
fn deleting_unknown_ids_is_a_no_op() {
    let mut s = loaded_session("sess_delete_noop");
    let before = s.cache().to_vec();

    assert_eq!(s.delete_entries(&[999_999]).unwrap(), 0);
    assert_eq!(s.cache(), before.as_slice());
}

#[test]
fn deleting_refreshes_the_cache() {
    let mut s = loaded_session("sess_delete");
    let before = s.cache().to_vec();
    let doomed = [before[1].entry_id, before[4].entry_id];

    assert_eq!(s.delete_entries(&doomed).unwrap(), 2);
    assert!(!s.is_stale());

    let expected: Vec<_> = before
        .into_iter()
        .filter(|e| !doomed.contains(&e.entry_id))
        .collect();
    assert_eq!(expected.len(), 3);
    assert_eq!(s.cache(), expected.as_slice());
    assert_eq!(s.store().find_all().unwrap(), expected);
}

#[test]
fn failed_delete_removes_nothing() {
    let mut s = loaded_session("sess_delete_atomic");
    let ids: Vec<i64> = s.cache().iter().map(|e| e.entry_id).collect();
    let protected = ids[1];

    let conn = rusqlite::Connection::open(s.store().path()).unwrap();
    conn.execute_batch(&format!(
        "CREATE TRIGGER keep_row BEFORE DELETE ON Entries
         WHEN OLD.Entry_ID = {protected}
         BEGIN SELECT RAISE(ABORT, 'row is protected'); END;"
    ))
    .unwrap();

    let err = s.delete_entries(&[ids[0], protected]).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));

    s.refresh().unwrap();
    assert_eq!(s.cache().len(), 5);
}

#[test]
fn delete_by_sheet_removes_only_that_sheet() {
    let mut s = loaded_session("sess_delete_sheet");
    let source = s.cache()[0].source_file.clone();

    assert_eq!(s.delete_sheet(&source, "March").unwrap(), 3);
    assert!(s.cache().iter().all(|e| e.sheet_name == "April"));

    let sources = s.store().list_sources().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].rows, 2);
    assert_eq!(sources[0].hours, 7.0);
}

#[test]
fn store_writes_mark_the_cache_stale() {
    let db = setup_test_db("sess_stale");
    let mut s = Session::open(RecordStore::open(&db).unwrap()).unwrap();
    assert!(!s.is_stale());

    s.store_mut().insert(&entry("GAMMA", 2.0)).unwrap();
    assert!(s.is_stale());
    assert!(s.cache().is_empty());

    s.refresh().unwrap();
    assert_eq!(s.cache().len(), 1);
    assert_eq!(s.search("gamma").total_hours, Some(2.0));
}

#[test]
fn subscribers_see_committed_changes() {
    let db = setup_test_db("sess_events");
    let mut store = RecordStore::open(&db).unwrap();
    let seen: Rc<RefCell<Vec<DataChange>>> = Rc::default();
    let sink = Rc::clone(&seen);
    store.subscribe(move |c| sink.borrow_mut().push(c.clone()));

    let id = store.insert(&entry("DELTA", 1.0)).unwrap();
    store.delete(&[id]).unwrap();
    store.delete(&[id]).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0], DataChange::Imported { rows: 1, .. }));
    assert_eq!(seen[1], DataChange::Deleted { rows: 1 });
}

#[test]
fn failed_sheet_write_keeps_nothing() {
    let db = setup_test_db("sess_sheet_rollback");
    let mut store = RecordStore::open(&db).unwrap();

    let res = store.write_sheet("manual", "S1", |w| {
        w.insert(&entry("ALPHA", 1.0))?;
        w.insert(&entry("ALPHA", 2.0))?;
        w.insert(&entry("ALPHA", -1.0))?;
        Ok(())
    });

    assert!(matches!(res, Err(AppError::InvalidEntry(_))));
    assert!(store.find_all().unwrap().is_empty());
    assert!(!store.exists("manual", "S1").unwrap());
}

#[test]
fn invalid_rows_are_rejected_by_the_store() {
    let db = setup_test_db("sess_invalid_rows");
    let mut store = RecordStore::open(&db).unwrap();

    assert!(store.insert(&entry("nan", 1.0)).is_err());
    assert!(store.insert(&entry("  ", 1.0)).is_err());
    assert!(store.insert(&entry("OK", 0.0)).is_err());
    assert!(store.find_all().unwrap().is_empty());
}

#[test]
fn contract_lookup_treats_wildcards_literally() {
    let db = setup_test_db("sess_contract_lookup");
    let mut store = RecordStore::open(&db).unwrap();
    store.insert(&entry("ALPHA_1", 1.0)).unwrap();
    store.insert(&entry("ALPHAX1", 2.0)).unwrap();
    store.insert(&entry("100%", 3.0)).unwrap();

    let hits = store.find_by_contract_substring("a_1").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].contract_name, "ALPHA_1");

    assert_eq!(store.find_by_contract_substring("%").unwrap().len(), 1);
    assert_eq!(store.find_by_contract_substring("alpha").unwrap().len(), 2);
}

#[test]
fn sheet_batch_is_all_or_nothing() {
    let db = setup_test_db("sess_insert_sheet");
    let mut store = RecordStore::open(&db).unwrap();

    let good = vec![entry("ALPHA", 1.0), entry("BETA", 2.0)];
    assert_eq!(store.insert_sheet(&good).unwrap(), 2);
    assert!(store.exists("manual", "S1").unwrap());

    let mut bad = good.clone();
    bad.push(entry("nan", 1.0));
    for e in &mut bad {
        e.sheet_name = "S2".into();
    }
    assert!(store.insert_sheet(&bad).is_err());
    assert!(!store.exists("manual", "S2").unwrap());
    assert_eq!(store.insert_sheet(&[]).unwrap(), 0);
}
