use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{field, info, success};
use crate::utils::time::format_local;
use chrono::Utc;

/// `login`, `logout` and `whoami`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(&cfg.database)?;

    match cmd {
        Commands::Login { user_id } => {
            let session = SessionLogic::sign_in(&mut pool, user_id, Utc::now())?;
            success(format!(
                "Signed in as {} ({})",
                session.user.full_name, session.user.user_id
            ));
        }
        Commands::Logout => match SessionLogic::sign_out(&mut pool)? {
            Some(user) => success(format!("Signed out {user}")),
            None => info("Nobody was signed in."),
        },
        Commands::Whoami => match SessionLogic::current(&mut pool)? {
            Some(s) => {
                field("User", format!("{} ({})", s.user.full_name, s.user.user_id));
                field("Role", s.user.role);
                field("Since", format_local(&s.signed_in_at));
            }
            None => info("Nobody is signed in."),
        },
        _ => {}
    }

    Ok(())
}
