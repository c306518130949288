use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_user, load_users};
use crate::errors::{AppError, AppResult};
use crate::models::profile::Profile;
use crate::models::session::Session;

pub struct UserLogic;

impl UserLogic {
    /// Register a profile.
    ///
    /// Until an administrator exists anyone may add users; afterwards only
    /// a signed-in administrator can.
    pub fn add(pool: &mut DbPool, session: Option<&Session>, profile: Profile) -> AppResult<Profile> {
        let user_id = profile.user_id.trim();
        if user_id.is_empty() || user_id.chars().any(char::is_whitespace) {
            return Err(AppError::Other(format!(
                "invalid user id '{}': must be non-empty and contain no spaces",
                profile.user_id
            )));
        }
        let full_name = profile.full_name.trim();
        let full_name = if full_name.is_empty() { user_id } else { full_name };

        let has_admin = load_users(pool)?.iter().any(Profile::is_admin);
        if has_admin {
            match session {
                Some(s) if s.user.is_admin() => {}
                Some(s) => return Err(AppError::Forbidden(s.user.user_id.clone())),
                None => return Err(AppError::NotSignedIn),
            }
        }

        let profile = Profile {
            user_id: user_id.to_string(),
            full_name: full_name.to_string(),
            role: profile.role,
        };
        insert_user(pool, &profile)?;
        ttlog(
            &pool.conn,
            "user_add",
            &profile.user_id,
            &format!("Added {} ({})", profile.full_name, profile.role),
        )?;

        Ok(profile)
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Profile>> {
        load_users(pool)
    }
}
