pub mod filter;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod stats;
pub mod store;

pub use filter::HoursFilter;
pub use queries::SourceSummary;
pub use store::{RecordStore, SheetWriter};
