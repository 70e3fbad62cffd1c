//! Auth domain types: Role, Identity, RegistrationGrant, claims
//!
//! Serializable, cloneable, and cheap to pass around.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InkwellError;

/// Identity roles. The first registered identity is the only admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = InkwellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(InkwellError::Database(format!("unknown role {other:?}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public view of an identity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl Identity {
    /// Token subject for this identity
    pub fn subject(&self) -> String {
        self.id.to_string()
    }
}

/// Identity record together with its stored password hash
#[derive(Clone)]
pub struct StoredIdentity {
    pub identity: Identity,
    pub hashed_password: String,
}

impl fmt::Debug for StoredIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredIdentity")
            .field("identity", &self.identity)
            .field("hashed_password", &"***")
            .finish()
    }
}

/// Data for a registry insert. The role is decided by the registry.
#[derive(Clone)]
pub struct NewIdentity {
    pub email: String,
    pub hashed_password: String,
}

/// Why a registration was allowed to proceed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationGrant {
    /// Registry was empty; the insert only succeeds while it still is
    Bootstrap,
    /// An admin authorised the registration
    Admin(Identity),
}

/// Login response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// JWT claims for session tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (identity id)
    pub sub: String,
    /// Expiry (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_storage_form() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn test_stored_identity_debug_hides_hash() {
        let stored = StoredIdentity {
            identity: Identity { id: 1, email: "a@b.c".into(), role: Role::Admin },
            hashed_password: "$argon2id$v=19$secret".into(),
        };
        assert!(!format!("{stored:?}").contains("argon2id"));
    }

    #[test]
    fn test_bearer_token_type() {
        let token = AccessToken::bearer("abc".into());
        assert_eq!(token.token_type, "bearer");
    }
}
