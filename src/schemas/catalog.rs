//! Catalog schema - Roles and users available as stage actors

use serde::{Deserialize, Serialize};

use super::{RoleId, UserId};

/// A role from the role catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "idrbRoleMaster")]
    pub id: RoleId,

    #[serde(rename = "rbRoleName")]
    pub name: String,
}

/// A user from the user catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "idrbUserMaster")]
    pub id: UserId,

    #[serde(rename = "username")]
    pub name: String,
}

/// Display placeholder for an unset actor or target
pub const NOT_APPLICABLE: &str = "N/A";

/// Read-only catalogs used for actor pickers and display names.
///
/// A catalog is `None` when it could not be fetched; lookups then degrade to
/// placeholder names rather than failing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub roles: Option<Vec<Role>>,
    pub users: Option<Vec<User>>,
}

impl Catalog {
    pub fn new(roles: Option<Vec<Role>>, users: Option<Vec<User>>) -> Self {
        Catalog { roles, users }
    }

    /// Display name for a role id
    pub fn role_name(&self, id: Option<RoleId>) -> &str {
        let Some(id) = id else {
            return NOT_APPLICABLE;
        };
        self.roles
            .as_deref()
            .and_then(|roles| roles.iter().find(|r| r.id == id))
            .map(|r| r.name.as_str())
            .unwrap_or("Unknown Role")
    }

    /// Display name for a user id
    pub fn user_name(&self, id: Option<UserId>) -> &str {
        let Some(id) = id else {
            return NOT_APPLICABLE;
        };
        self.users
            .as_deref()
            .and_then(|users| users.iter().find(|u| u.id == id))
            .map(|u| u.name.as_str())
            .unwrap_or("Unknown User")
    }

    /// Whether a role id is known. None when the role catalog is unavailable.
    pub fn has_role(&self, id: RoleId) -> Option<bool> {
        self.roles
            .as_deref()
            .map(|roles| roles.iter().any(|r| r.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            Some(vec![Role { id: RoleId(1), name: "Manager".to_string() }]),
            Some(vec![User { id: UserId(7), name: "alice".to_string() }]),
        )
    }

    #[test]
    fn test_role_json() {
        let role: Role =
            serde_json::from_str(r#"{"idrbRoleMaster": 3, "rbRoleName": "Finance"}"#).unwrap();
        assert_eq!(role.id, RoleId(3));
        assert_eq!(role.name, "Finance");
    }

    #[test]
    fn test_user_json() {
        let user: User =
            serde_json::from_str(r#"{"idrbUserMaster": 5, "username": "bob"}"#).unwrap();
        assert_eq!(user.id, UserId(5));
        assert_eq!(user.name, "bob");
    }

    #[test]
    fn test_name_resolution() {
        let catalog = catalog();
        assert_eq!(catalog.role_name(Some(RoleId(1))), "Manager");
        assert_eq!(catalog.role_name(Some(RoleId(2))), "Unknown Role");
        assert_eq!(catalog.role_name(None), "N/A");
        assert_eq!(catalog.user_name(Some(UserId(7))), "alice");
        assert_eq!(catalog.user_name(Some(UserId(8))), "Unknown User");
    }

    #[test]
    fn test_unavailable_catalog_degrades() {
        let catalog = Catalog::default();
        assert_eq!(catalog.role_name(Some(RoleId(1))), "Unknown Role");
        assert_eq!(catalog.has_role(RoleId(1)), None);
        assert_eq!(self::catalog().has_role(RoleId(1)), Some(true));
        assert_eq!(self::catalog().has_role(RoleId(4)), Some(false));
    }
}
