//! Caller roles and the staff/end-user distinction.
//!
//! Every authenticated request resolves to exactly one [`Role`]. Handlers
//! never compare raw role strings; they match on the enum or go through the
//! typed extractors in the `api` crate.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role name for end users (ticket reporters).
pub const ROLE_USER: &str = "user";
/// Role name for support agents.
pub const ROLE_AGENT: &str = "agent";
/// Role name for administrators.
pub const ROLE_ADMIN: &str = "admin";

/// The three caller roles. `agent` and `admin` are collectively "staff".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    Admin,
}

impl Role {
    /// Staff roles may see internal comments and mutate tickets.
    #[must_use]
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Agent | Role::Admin)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Agent => ROLE_AGENT,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Parse a wire-format role name.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            ROLE_USER => Ok(Role::User),
            ROLE_AGENT => Ok(Role::Agent),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {ROLE_USER}, {ROLE_AGENT}, {ROLE_ADMIN}"
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
