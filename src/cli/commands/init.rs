use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::RecordStore;
use crate::db::migrate::latest_version;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with every migration applied
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    info("Initializing Timecard Vault…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    RecordStore::open(&cfg.database)?;
    tracing::info!(database = %cfg.database, schema = latest_version(), "database initialized");

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
