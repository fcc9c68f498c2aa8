//! Repository for the `categories` table.

use sqlx::PgPool;
use quickdesk_core::category::DEFAULT_CATEGORIES;
use quickdesk_core::types::DbId;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, color, is_active, created_at, updated_at";

/// Provides CRUD operations for ticket categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row. A duplicate
    /// name violates `uq_categories_name`.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, color)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve several categories at once, for ticket enrichment.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1)");
        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List active categories in name order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE is_active ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Returns the updated row if found, `None`
    /// when the ID does not exist or nothing was requested.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let mut sets: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if changes.name.is_some() {
            sets.push(format!("name = ${param_idx}"));
            param_idx += 1;
        }
        if changes.description.is_some() {
            sets.push(format!("description = ${param_idx}"));
            param_idx += 1;
        }
        if changes.color.is_some() {
            sets.push(format!("color = ${param_idx}"));
            param_idx += 1;
        }
        if changes.is_active.is_some() {
            sets.push(format!("is_active = ${param_idx}"));
            param_idx += 1;
        }

        if sets.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE categories SET {}, updated_at = now() WHERE id = ${param_idx} \
             RETURNING {COLUMNS}",
            sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, Category>(&query);
        if let Some(name) = &changes.name {
            q = q.bind(name);
        }
        if let Some(description) = &changes.description {
            q = q.bind(description);
        }
        if let Some(color) = &changes.color {
            q = q.bind(color);
        }
        if let Some(is_active) = changes.is_active {
            q = q.bind(is_active);
        }
        q = q.bind(id);

        q.fetch_optional(pool).await
    }

    /// Soft-delete: flip `is_active` off. Returns the updated row if
    /// found. Rows are never hard-deleted.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET is_active = FALSE, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count all categories, active or not.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await
    }

    /// Install the built-in default categories, skipping any name that
    /// already exists. Returns the number of rows inserted, so repeated
    /// calls report 0.
    pub async fn seed_defaults(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for seed in DEFAULT_CATEGORIES {
            let result = sqlx::query(
                "INSERT INTO categories (name, description, color)
                 VALUES ($1, $2, $3)
                 ON CONFLICT ON CONSTRAINT uq_categories_name DO NOTHING",
            )
            .bind(seed.name)
            .bind(seed.description)
            .bind(seed.color)
            .execute(pool)
            .await?;
            inserted += result.rows_affected();
        }
        if inserted > 0 {
            tracing::info!(inserted, "seeded default categories");
        }
        Ok(inserted)
    }
}
