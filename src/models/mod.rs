pub mod entry;

pub use entry::{ENTRY_HEADERS, NewEntry, TimecardEntry, is_valid_contract};
