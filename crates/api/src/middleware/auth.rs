//! Caller identity resolution from session and staff tokens.
//!
//! Two token kinds are accepted, both carried either as
//! `Authorization: Bearer <token>` or in a cookie:
//!
//! 1. An external end-user session token (`session-token` cookie), verified
//!    with the session secret and always resolving to the `user` role.
//! 2. A locally issued staff token (`auth-token` cookie), verified with the
//!    staff secret and carrying the `agent` or `admin` role.
//!
//! End-user resolution is attempted first; a request presenting both token
//! kinds is treated as the end user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use quickdesk_core::error::CoreError;
use quickdesk_core::roles::Role;
use quickdesk_core::ticket::{ActorRef, UserRef};

use crate::auth::jwt::{validate_session_token, validate_staff_token};
use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the locally issued staff token.
pub const STAFF_TOKEN_COOKIE: &str = "auth-token";
/// Cookie carrying the external end-user session token.
pub const SESSION_TOKEN_COOKIE: &str = "session-token";

/// Display name used when a session token omits profile claims.
const DEFAULT_SESSION_NAME: &str = "User";
/// Email used when a session token omits profile claims.
const DEFAULT_SESSION_EMAIL: &str = "user@example.com";

/// Resolved caller identity: who is making the request and in which role.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(identity: Identity) -> AppResult<Json<()>> {
///     tracing::info!(subject = %identity.subject, role = %identity.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    /// Stable subject id: the provider's opaque id for end users, the staff
    /// account's database id rendered as a string for staff.
    pub subject: String,
    /// Resolved role.
    pub role: Role,
    /// Display name embedded into documents this caller touches.
    pub name: String,
    /// Email embedded into documents this caller touches.
    pub email: String,
}

impl Identity {
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// Reporter/assignee summary embedded in ticket documents.
    pub fn to_user_ref(&self) -> UserRef {
        UserRef {
            id: self.subject.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: None,
        }
    }

    /// Author/actor summary embedded in comments and status history.
    pub fn to_actor_ref(&self) -> ActorRef {
        ActorRef {
            id: self.subject.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            avatar: None,
        }
    }
}

/// Resolve the caller identity from the request headers, if any.
pub fn resolve_identity(parts: &Parts, state: &AppState) -> Option<Identity> {
    let jar = CookieJar::from_headers(&parts.headers);
    let bearer = bearer_token(parts);

    // End-user session first: a bearer token, then the session cookie.
    if let Some(identity) = bearer
        .and_then(|token| session_identity(token, state))
        .or_else(|| {
            jar.get(SESSION_TOKEN_COOKIE)
                .and_then(|cookie| session_identity(cookie.value(), state))
        })
    {
        return Some(identity);
    }

    // Staff token second: the same bearer token, then the staff cookie.
    bearer
        .and_then(|token| staff_identity(token, state))
        .or_else(|| {
            jar.get(STAFF_TOKEN_COOKIE)
                .and_then(|cookie| staff_identity(cookie.value(), state))
        })
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Try to resolve a token as an external end-user session.
fn session_identity(token: &str, state: &AppState) -> Option<Identity> {
    let claims = validate_session_token(token, &state.config.jwt).ok()?;
    Some(Identity {
        subject: claims.sub,
        role: Role::User,
        name: claims
            .name
            .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
        email: claims
            .email
            .unwrap_or_else(|| DEFAULT_SESSION_EMAIL.to_string()),
    })
}

/// Try to resolve a token as a locally issued staff token.
fn staff_identity(token: &str, state: &AppState) -> Option<Identity> {
    let claims = validate_staff_token(token, &state.config.jwt).ok()?;
    // Staff tokens are only ever issued for staff roles; an unknown role
    // claim means the token is not ours.
    let role = Role::parse(&claims.role).ok().filter(|role| role.is_staff())?;
    Some(Identity {
        subject: claims.sub.to_string(),
        role,
        name: claims.name,
        email: claims.email,
    })
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_identity(parts, state).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })
    }
}
