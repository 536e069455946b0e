pub mod messages;
pub mod progress;
