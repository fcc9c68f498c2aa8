//! Handlers for the `/categories` resource.
//!
//! Listing is public; create, update, and deactivate are admin-only.
//! Categories are never hard-deleted, deactivation hides them from the
//! public list while tickets keep referencing them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quickdesk_core::category::{
    validate_category_color, validate_category_description, validate_category_name,
    DEFAULT_CATEGORY_COLOR,
};
use quickdesk_core::error::CoreError;
use quickdesk_core::types::DbId;
use quickdesk_db::models::category::{Category, CreateCategory, UpdateCategory};
use quickdesk_db::repositories::CategoryRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /categories`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Request body for `PUT /categories/{id}`. `None` fields are left
/// untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
///
/// Public list of active categories in name order.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
///
/// Create a category. An empty or missing color falls back to the
/// default badge color; a duplicate name is a 409.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    validate_category_name(&input.name)?;
    if let Some(description) = &input.description {
        validate_category_description(description)?;
    }

    let color = match input.color.as_deref() {
        Some(raw) if !raw.is_empty() => {
            validate_category_color(raw)?;
            raw.to_string()
        }
        _ => DEFAULT_CATEGORY_COLOR.to_string(),
    };

    let category = CategoryRepo::create(
        &state.pool,
        &CreateCategory {
            name: input.name,
            description: input.description,
            color,
        },
    )
    .await?;

    tracing::info!(
        category_id = category.id,
        name = %category.name,
        admin_id = %identity.subject,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
///
/// Admin-only partial update, including re-activation via `isActive`.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategoryRequest>,
) -> AppResult<Json<DataResponse<Category>>> {
    if let Some(name) = &input.name {
        validate_category_name(name)?;
    }
    if let Some(description) = &input.description {
        validate_category_description(description)?;
    }
    if let Some(color) = &input.color {
        validate_category_color(color)?;
    }

    let changes = UpdateCategory {
        name: input.name,
        description: input.description,
        color: input.color,
        is_active: input.is_active,
    };

    let category = CategoryRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(category_id = id, admin_id = %identity.subject, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Admin-only soft delete: the category disappears from the public list
/// but existing tickets keep their reference.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    CategoryRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(category_id = id, admin_id = %identity.subject, "Category deactivated");

    Ok(Json(MessageResponse {
        message: "Category deactivated successfully",
    }))
}
