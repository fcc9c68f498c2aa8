//! Startup bootstrap: idempotent seeding of reference data.
//!
//! Runs once at boot, after migrations. Seeds the default category set where
//! missing and ensures the configured bootstrap admin account exists, so a
//! fresh deployment has categories to file tickets against and a staff login
//! to administer them with.

use quickdesk_core::roles::ROLE_ADMIN;
use quickdesk_db::models::staff::CreateStaffAccount;
use quickdesk_db::repositories::{CategoryRepo, StaffRepo};
use quickdesk_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;

/// Errors surfaced by the bootstrap step.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Password(argon2::password_hash::Error),
}

/// Seed reference data and the bootstrap admin. Safe to run on every start.
pub async fn run(pool: &DbPool, config: &ServerConfig) -> Result<(), BootstrapError> {
    let seeded = CategoryRepo::seed_defaults(pool).await?;
    if seeded > 0 {
        tracing::info!(seeded, "Seeded default categories");
    }

    let (email, password) = match (
        config.bootstrap_admin_email.as_deref(),
        config.bootstrap_admin_password.as_deref(),
    ) {
        (Some(email), Some(password)) => (email, password),
        _ => return Ok(()),
    };

    let email = email.to_lowercase();
    if StaffRepo::find_by_email(pool, &email).await?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password).map_err(BootstrapError::Password)?;
    let input = CreateStaffAccount {
        email: email.clone(),
        name: "System Administrator".to_string(),
        password_hash,
        role: ROLE_ADMIN.to_string(),
    };
    let account = StaffRepo::create(pool, &input).await?;
    tracing::info!(staff_id = account.id, email = %email, "Created bootstrap admin account");

    Ok(())
}
