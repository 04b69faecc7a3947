//! User record types.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Nominal authority level of a user.
///
/// Roles are informational only; nothing in this crate grants or denies
/// anything based on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
    User,
    Guest,
}

impl Role {
    /// All role variants for iteration.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Moderator, Role::User, Role::Guest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
            Role::Guest => "guest",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

/// Account status, flipped by an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Active, Status::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }

    /// The other status. Applying this twice returns the original value.
    pub fn toggled(self) -> Self {
        match self {
            Status::Active => Status::Inactive,
            Status::Inactive => Status::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A user account as shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique within a directory
    pub id: String,
    /// Display name
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    /// Day of the last recorded activity (YYYY-MM-DD)
    pub last_activity: NaiveDate,
    /// Granted permission names, in display order. Not checked against `role`.
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Moderator).unwrap();
        assert_eq!(json, r#""moderator""#);

        let parsed: Role = serde_json::from_str(r#""guest""#).unwrap();
        assert_eq!(parsed, Role::Guest);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Moderator ".parse::<Role>(), Ok(Role::Moderator));
        assert_eq!(
            "wizard".parse::<Role>(),
            Err(ParseRoleError("wizard".to_string()))
        );
    }

    #[test]
    fn test_role_display_matches_wire_name() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_status_toggle_is_involution() {
        for status in Status::ALL {
            assert_ne!(status.toggled(), status);
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("INACTIVE".parse::<Status>(), Ok(Status::Inactive));
        assert!("all".parse::<Status>().is_err());
    }

    #[test]
    fn test_user_deserialization() {
        let json = r#"{
            "id": "7",
            "name": "Test User",
            "email": "test@example.com",
            "role": "user",
            "status": "inactive",
            "last_activity": "2024-09-01"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.status, Status::Inactive);
        assert_eq!(
            user.last_activity,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
        );
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn test_user_rejects_unknown_role() {
        let json = r#"{
            "id": "7",
            "name": "Test User",
            "email": "test@example.com",
            "role": "root",
            "status": "active",
            "last_activity": "2024-09-01",
            "permissions": []
        }"#;

        assert!(serde_json::from_str::<User>(json).is_err());
    }
}
