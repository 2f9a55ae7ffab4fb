//! User accounts.

use crate::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A client booking sessions and leaving reviews.
    Client,
    /// A photographer with an extended profile.
    Photographer,
    /// A site administrator.
    Admin,
}

impl Role {
    /// Canonical lowercase name, as stored and sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Photographer => "photographer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "photographer" => Ok(Self::Photographer),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A registered account.
///
/// The password is stored exactly as received and compared by string
/// equality at login. This mirrors the source system's contract; see
/// DESIGN.md before changing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique id.
    pub id: UserId,
    /// Unique display name used for login.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Plaintext password (never included in API responses).
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Account role.
    pub role: Role,
    /// URL of the profile image, if uploaded.
    pub profile_image: Option<String>,
    /// Contact phone.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new account with fresh timestamps.
    #[must_use]
    pub fn new(username: String, email: String, password: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password,
            role,
            profile_image: None,
            phone: String::new(),
            address: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Client, Role::Photographer, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_password_is_not_serialized() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "secret".to_string(),
            Role::Client,
        );
        let json = serde_json::to_string(&user).unwrap_or_default();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"username\":\"alice\""));
    }
}
