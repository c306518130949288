use super::profile::Profile;
use chrono::{DateTime, Utc};

/// The signed-in user, loaded once per command and passed explicitly to
/// whatever needs an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Profile,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user.user_id
    }
}
