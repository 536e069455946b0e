use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for Timecard Vault
/// Import timecard spreadsheets into SQLite, search and total hours, export reports
#[derive(Parser)]
#[command(
    name = "timecard-vault",
    version = env!("CARGO_PKG_VERSION"),
    about = "Import timecard spreadsheets into SQLite, search hours by contract/month/year and export reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Inspect the database
    Db {
        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,
    },

    /// Import every sheet of one or more timecard spreadsheets
    Import {
        /// Spreadsheet files (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv)
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,

        #[arg(long, short, help = "Do not draw progress bars")]
        quiet: bool,
    },

    /// Search all fields and total the hours of matching contracts
    Search {
        /// Search term; blank shows every entry
        term: Option<String>,
    },

    /// Search by contract, narrowed by month and/or year
    Advanced {
        #[arg(long, short, default_value = "", help = "Contract name (substring)")]
        contract: String,

        #[arg(long, short, default_value = "", help = "Month, e.g. March")]
        month: String,

        #[arg(long, short, default_value = "", help = "Year, e.g. 2024")]
        year: String,
    },

    /// List every stored entry
    List,

    /// List imported file/sheet pairs
    Sources,

    /// Delete entries by id or a whole imported sheet
    Delete {
        #[arg(
            long = "id",
            value_name = "ID",
            num_args = 1..,
            conflicts_with = "source",
            help = "Entry ids to delete"
        )]
        ids: Vec<String>,

        #[arg(long, value_name = "FILE", requires = "sheet", help = "Source file of the sheet to delete")]
        source: Option<String>,

        #[arg(long, value_name = "SHEET", requires = "source", help = "Sheet name to delete")]
        sheet: Option<String>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Export a search result as a report
    Export {
        /// Free-text search term (ignored when --contract is given)
        term: Option<String>,

        #[arg(long, help = "Contract name for an advanced search")]
        contract: Option<String>,

        #[arg(long, requires = "contract", help = "Month for an advanced search")]
        month: Option<String>,

        #[arg(long, requires = "contract", help = "Year for an advanced search")]
        year: Option<String>,

        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (default: timecard_report_<term>.<ext> in report_dir)")]
        file: Option<PathBuf>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
