pub mod events;
pub mod import;
pub mod query;
pub mod session;

pub use events::{ChangeBus, DataChange};
pub use import::{ImportObserver, ImportReport, SheetOutcome, SheetReport};
pub use query::{AdvancedQuery, SearchResult};
pub use session::Session;
