use crate::cli::commands::summary::resolve_month;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        month,
        format,
        file,
        force,
    } = cmd
    {
        let month = resolve_month(month.as_deref())?;

        let mut pool = open_db(&cfg.database)?;
        SessionLogic::require_admin(&mut pool)?;

        ExportLogic::export(
            &mut pool,
            &month,
            cfg.quantum_minutes,
            *format,
            file.as_deref(),
            *force,
        )?;
    }
    Ok(())
}
