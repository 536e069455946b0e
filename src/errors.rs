//! Unified application error type.
//! All modules (db, core, sheet, export, cli) return AppError so that the
//! operation boundaries can turn any failure into one user notice.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Spreadsheet reading
    // ---------------------------
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported spreadsheet type: {0}")]
    UnsupportedFile(String),

    #[error("Sheet '{sheet}' is unreadable: {reason}")]
    UnreadableSheet { sheet: String, reason: String },

    #[error("Sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: String },

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Invalid entry id: {0}")]
    InvalidEntryId(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Export cancelled: {0}")]
    ExportCancelled(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
