//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`Identity`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use quickdesk_core::error::CoreError;
use quickdesk_core::roles::Role;

use super::auth::{resolve_identity, Identity};
use crate::error::AppError;
use crate::state::AppState;

/// Requires any resolved identity (any role). Rejects with 401 otherwise.
///
/// Functionally equivalent to extracting [`Identity`] directly but named
/// explicitly for use in route definitions where the intent "this route
/// requires authentication" should be self-documenting.
///
/// ```ignore
/// async fn any_authed(RequireAuth(identity): RequireAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAuth(pub Identity);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        Ok(RequireAuth(identity))
    }
}

/// Requires the `agent` or `admin` role. Rejects with 401 when no identity
/// resolves, 403 when the caller is an end user.
///
/// ```ignore
/// async fn staff_only(RequireStaff(identity): RequireStaff) -> AppResult<Json<()>> {
///     // identity is guaranteed to be agent or admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub Identity);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        if !identity.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Agent or Admin role required".into(),
            )));
        }
        Ok(RequireStaff(identity))
    }
}

/// Requires the `admin` role. Rejects with 401 when no identity resolves,
/// 403 otherwise.
pub struct RequireAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        if identity.role != Role::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(identity))
    }
}

/// Resolves the caller identity when present, without ever rejecting.
///
/// Used by read endpoints whose response shape depends on the viewer
/// (e.g. internal-comment filtering) but which are open to anonymous
/// callers.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequestParts<AppState> for OptionalIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalIdentity(resolve_identity(parts, state)))
    }
}
