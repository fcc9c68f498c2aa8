//! Staff account entity model and DTOs.

use quickdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full staff row from the `staff_accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`StaffResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct StaffAccount {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe staff representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<StaffAccount> for StaffResponse {
    fn from(account: StaffAccount) -> Self {
        StaffResponse {
            id: account.id,
            email: account.email,
            name: account.name,
            role: account.role,
            avatar: account.avatar,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

/// Resolved insert payload for a staff account. The password has already
/// been hashed by the caller.
#[derive(Debug)]
pub struct CreateStaffAccount {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
}
