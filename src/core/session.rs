use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{clear_session_row, find_user, load_session_row, save_session_row};
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use chrono::{DateTime, Utc};

pub struct SessionLogic;

impl SessionLogic {
    /// Start a session for `user_id`, replacing whoever was signed in.
    pub fn sign_in(pool: &mut DbPool, user_id: &str, at: DateTime<Utc>) -> AppResult<Session> {
        let user = find_user(pool, user_id)?
            .ok_or_else(|| AppError::UnknownUser(user_id.to_string()))?;

        save_session_row(pool, &user.user_id, &at)?;
        ttlog(&pool.conn, "login", &user.user_id, "Signed in")?;

        Ok(Session {
            user,
            signed_in_at: at,
        })
    }

    /// End the current session. Returns the user that was signed in, if any.
    pub fn sign_out(pool: &mut DbPool) -> AppResult<Option<String>> {
        let previous = load_session_row(pool)?.map(|(user_id, _)| user_id);

        if clear_session_row(pool)? {
            let target = previous.as_deref().unwrap_or("");
            ttlog(&pool.conn, "logout", target, "Signed out")?;
        }

        Ok(previous)
    }

    /// Load the session stored in the database.
    ///
    /// A session pointing at a user that no longer exists is treated as
    /// absent.
    pub fn current(pool: &mut DbPool) -> AppResult<Option<Session>> {
        let Some((user_id, signed_in_at)) = load_session_row(pool)? else {
            return Ok(None);
        };

        let session = find_user(pool, &user_id)?.map(|user| Session { user, signed_in_at });
        if session.is_none() {
            tracing::warn!(user = %user_id, "session refers to an unknown user");
        }
        Ok(session)
    }

    pub fn require_session(pool: &mut DbPool) -> AppResult<Session> {
        Self::current(pool)?.ok_or(AppError::NotSignedIn)
    }

    pub fn require_admin(pool: &mut DbPool) -> AppResult<Session> {
        let session = Self::require_session(pool)?;
        if !session.user.is_admin() {
            return Err(AppError::Forbidden(session.user.user_id));
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::insert_user;
    use crate::models::profile::{Profile, Role};

    fn pool_with_users() -> DbPool {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        for (id, name, role) in [("eva", "Eva", Role::Worker), ("boss", "Petr", Role::Admin)] {
            insert_user(
                &mut pool,
                &Profile {
                    user_id: id.into(),
                    full_name: name.into(),
                    role,
                },
            )
            .unwrap();
        }
        pool
    }

    #[test]
    fn sign_in_requires_known_user() {
        let mut pool = pool_with_users();
        assert!(matches!(
            SessionLogic::sign_in(&mut pool, "ghost", Utc::now()),
            Err(AppError::UnknownUser(_))
        ));
        assert!(SessionLogic::current(&mut pool).unwrap().is_none());
    }

    #[test]
    fn lifecycle() {
        let mut pool = pool_with_users();

        assert!(matches!(
            SessionLogic::require_session(&mut pool),
            Err(AppError::NotSignedIn)
        ));

        let s = SessionLogic::sign_in(&mut pool, "eva", Utc::now()).unwrap();
        assert_eq!(s.user_id(), "eva");
        assert_eq!(
            SessionLogic::require_session(&mut pool).unwrap().user_id(),
            "eva"
        );

        // signing in again replaces the session
        SessionLogic::sign_in(&mut pool, "boss", Utc::now()).unwrap();
        assert_eq!(SessionLogic::current(&mut pool).unwrap().unwrap().user_id(), "boss");

        assert_eq!(SessionLogic::sign_out(&mut pool).unwrap().as_deref(), Some("boss"));
        assert!(SessionLogic::current(&mut pool).unwrap().is_none());
        assert_eq!(SessionLogic::sign_out(&mut pool).unwrap(), None);
    }

    #[test]
    fn admin_gate() {
        let mut pool = pool_with_users();

        SessionLogic::sign_in(&mut pool, "eva", Utc::now()).unwrap();
        assert!(matches!(
            SessionLogic::require_admin(&mut pool),
            Err(AppError::Forbidden(u)) if u == "eva"
        ));

        SessionLogic::sign_in(&mut pool, "boss", Utc::now()).unwrap();
        assert!(SessionLogic::require_admin(&mut pool).is_ok());
    }
}
