//! Session schema - The authenticated user as returned by the auth endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Login response; persisted to session.json by `wfd login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,

    #[serde(default)]
    pub roles: Vec<String>,

    /// Set when the session is stored locally; never sent by the auth endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user_id: UserId, roles: Vec<String>) -> Self {
        Session {
            user_id,
            roles,
            logged_in_at: None,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Narrow the session to one of its roles.
    ///
    /// Returns None if the session does not hold that role.
    pub fn with_selected_role(&self, role: &str) -> Option<Self> {
        self.has_role(role).then(|| Session {
            user_id: self.user_id,
            roles: vec![role.to_string()],
            logged_in_at: self.logged_in_at,
        })
    }
}
