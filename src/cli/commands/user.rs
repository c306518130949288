use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::core::users::UserLogic;
use crate::db::initialize::open_db;
use crate::errors::{AppError, AppResult};
use crate::models::profile::{Profile, Role};
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_db(&cfg.database)?;

    match action {
        UserAction::Add {
            user_id,
            name,
            role,
        } => {
            let role = Role::from_code(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
            let session = SessionLogic::current(&mut pool)?;

            let added = UserLogic::add(
                &mut pool,
                session.as_ref(),
                Profile {
                    user_id: user_id.clone(),
                    full_name: name.clone(),
                    role,
                },
            )?;

            success(format!(
                "User '{}' ({}) added as {}",
                added.user_id, added.full_name, added.role
            ));
        }
        UserAction::List => {
            let users = UserLogic::list(&mut pool)?;
            if users.is_empty() {
                info("No users yet. Add one with `shiftlog user add <id> --name <name>`.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("Id"),
                Column::left("Name"),
                Column::left("Role"),
            ]);
            for u in users {
                table.add_row(vec![u.user_id, u.full_name, u.role.to_string()]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
