use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{field, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing shiftlog…");
    if !cli.test {
        field("Config file", Config::config_file().display());
    }
    field("Database", &cfg.database);

    let pool = open_db(&cfg.database)?;
    ttlog(&pool.conn, "init", "", "Database initialized")?;

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
