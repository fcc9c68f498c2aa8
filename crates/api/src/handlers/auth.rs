//! Handlers for the `/auth` resource (staff login, token verification).

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use quickdesk_core::error::CoreError;
use quickdesk_core::roles::Role;
use quickdesk_core::types::DbId;
use quickdesk_db::repositories::StaffRepo;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::auth::jwt::generate_staff_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::STAFF_TOKEN_COOKIE;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
///
/// Fields default to empty strings so a missing field reports the same
/// 400 as an empty one instead of a body-deserialization 422.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response: the staff token plus the account it names.
///
/// The token is also set as the `auth-token` cookie, so browser clients
/// can ignore the body copy.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: StaffInfo,
}

/// Public staff info embedded in [`LoginResponse`].
#[derive(Debug, Serialize)]
pub struct StaffInfo {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Response body for `GET /auth/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: VerifiedUser,
}

/// The identity a presented token resolves to.
#[derive(Debug, Serialize)]
pub struct VerifiedUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate a staff account with email + password. Returns the staff
/// token in the body and as an http-only cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    // 1. Both fields are required.
    if input.email.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    // 2. Look up an active staff account. A missing account, a
    //    deactivated one, and a non-staff role all produce the same
    //    response so the endpoint does not leak which accounts exist.
    let email = input.email.to_lowercase();
    let account = StaffRepo::find_by_email(&state.pool, &email)
        .await?
        .filter(|account| account.is_active)
        .filter(|account| Role::parse(&account.role).is_ok_and(Role::is_staff))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid credentials or insufficient permissions".into(),
            ))
        })?;

    // 3. Verify the password.
    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // 4. Issue the staff token.
    let token = generate_staff_token(
        account.id,
        &account.email,
        &account.name,
        &account.role,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = Cookie::build((STAFF_TOKEN_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::hours(state.config.jwt.expiry_hours))
        .build();

    let response = LoginResponse {
        token,
        user: StaffInfo {
            id: account.id,
            email: account.email,
            name: account.name,
            role: account.role,
        },
    };

    Ok((jar.add(cookie), Json(response)))
}

/// GET /api/v1/auth/verify
///
/// Report the identity behind the presented token. Accepts both staff
/// tokens and end-user session tokens, from a bearer header or cookie.
pub async fn verify(RequireAuth(identity): RequireAuth) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        user: VerifiedUser {
            id: identity.subject,
            email: identity.email,
            role: identity.role,
        },
    })
}
