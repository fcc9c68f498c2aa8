//! Handlers for the `/staff` resource (agent and admin accounts).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use quickdesk_core::roles::Role;
use quickdesk_db::models::staff::{CreateStaffAccount, StaffResponse};
use quickdesk_db::repositories::StaffRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /staff`.
///
/// Fields default to empty strings so missing and empty values report
/// the same 400.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

/// GET /api/v1/staff
///
/// Admin-only list of all staff accounts, active or not.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_identity): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<StaffResponse>>>> {
    let accounts = StaffRepo::list(&state.pool).await?;
    let data = accounts.into_iter().map(StaffResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/staff
///
/// Admin-only staff registration. The role defaults to `agent`; a
/// duplicate email is a 409.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Json(input): Json<CreateStaffRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StaffResponse>>)> {
    // 1. Required fields.
    if input.email.is_empty()
        || input.first_name.is_empty()
        || input.last_name.is_empty()
        || input.password.is_empty()
    {
        return Err(AppError::BadRequest(
            "Email, first name, last name, and password are required".into(),
        ));
    }
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    // 2. The role must be a staff role.
    let role = match input.role.as_deref() {
        Some(raw) => {
            let role = Role::parse(raw)?;
            if !role.is_staff() {
                return Err(AppError::BadRequest("Role must be agent or admin".into()));
            }
            role
        }
        None => Role::Agent,
    };

    // 3. Hash and insert. A duplicate email surfaces as a unique
    //    violation and maps to 409.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = StaffRepo::create(
        &state.pool,
        &CreateStaffAccount {
            email: input.email.to_lowercase(),
            name: format!("{} {}", input.first_name, input.last_name),
            password_hash,
            role: role.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(
        staff_id = account.id,
        email = %account.email,
        role = %account.role,
        admin_id = %identity.subject,
        "Staff account registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: StaffResponse::from(account),
        }),
    ))
}
