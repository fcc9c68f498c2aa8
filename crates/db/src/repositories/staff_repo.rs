//! Repository for the `staff_accounts` table.

use sqlx::PgPool;
use quickdesk_core::types::DbId;

use crate::models::staff::{CreateStaffAccount, StaffAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, password_hash, role, avatar, \
                       is_active, created_at, updated_at";

/// Provides CRUD operations for staff accounts.
pub struct StaffRepo;

impl StaffRepo {
    /// Insert a new staff account, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStaffAccount,
    ) -> Result<StaffAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff_accounts (email, name, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffAccount>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a staff account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StaffAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_accounts WHERE id = $1");
        sqlx::query_as::<_, StaffAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a staff account by email. Callers normalize the email to
    /// lowercase before lookup.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<StaffAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_accounts WHERE email = $1");
        sqlx::query_as::<_, StaffAccount>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all staff accounts in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<StaffAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_accounts ORDER BY id");
        sqlx::query_as::<_, StaffAccount>(&query)
            .fetch_all(pool)
            .await
    }

    /// Count all staff accounts, active or not.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM staff_accounts")
            .fetch_one(pool)
            .await
    }
}
