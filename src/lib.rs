//! shiftlog library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (aggregation core, SQLite store, exports).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::User { .. } => cli::commands::user::handle(&cli.command, cfg),
        Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            cli::commands::session::handle(&cli.command, cfg)
        }
        Commands::In { .. } | Commands::Out { .. } | Commands::Status => {
            cli::commands::clock::handle(&cli.command, cfg)
        }
        Commands::Summary { .. } => cli::commands::summary::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load the config once
    let mut cfg = Config::load()?;

    // command-line override of the database
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_database_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    tracing::debug!(database = %cfg.database, quantum = cfg.quantum_minutes, "configuration loaded");

    dispatch(&cli, &cfg)
}
