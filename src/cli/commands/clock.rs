use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregator::format_duration_hhmm;
use crate::core::clock::ClockLogic;
use crate::core::session::SessionLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{field, info, success};
use crate::utils::colors::colorize_duration;
use crate::utils::time::{format_local, parse_optional_timestamp};
use chrono::Utc;

/// `in`, `out` and `status`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(&cfg.database)?;
    let session = SessionLogic::require_session(&mut pool)?;

    match cmd {
        Commands::In { at } => {
            let at = parse_optional_timestamp(at.as_ref())?;
            let shift = ClockLogic::clock_in(&mut pool, &session, at)?;
            success(format!(
                "{} clocked in at {}",
                session.user.full_name,
                format_local(&shift.start)
            ));
        }
        Commands::Out { at } => {
            let at = parse_optional_timestamp(at.as_ref())?;
            let shift = ClockLogic::clock_out(&mut pool, &session, at)?;
            let worked = shift.duration_ms().unwrap_or(0);
            success(format!(
                "{} clocked out at {} after {}",
                session.user.full_name,
                format_local(&at),
                colorize_duration(&format_duration_hhmm(worked), worked)
            ));
        }
        Commands::Status => match ClockLogic::open_interval(&mut pool, &session)? {
            Some(open) => {
                let elapsed = Utc::now().signed_duration_since(open.start).num_milliseconds();
                field("Shift running since", format_local(&open.start));
                field(
                    "Elapsed",
                    colorize_duration(&format_duration_hhmm(elapsed), elapsed),
                );
            }
            None => info(format!("{} is not clocked in.", session.user.full_name)),
        },
        _ => {}
    }

    Ok(())
}
