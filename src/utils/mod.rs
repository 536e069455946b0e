pub mod colors;
pub mod formatting;
pub mod path;
pub mod table;

pub use formatting::format_hours;
pub use formatting::strip_whitespace;
pub use formatting::casefold;
