//! Handlers for ticket comments (`/tickets/{id}/comments`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use quickdesk_core::comment::{validate_comment_content, visible_comments, Comment};
use quickdesk_core::error::CoreError;
use quickdesk_core::types::DbId;
use quickdesk_db::repositories::TicketRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{OptionalIdentity, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tickets/{id}/comments`.
///
/// Content defaults to an empty string so a missing field reports the
/// same 400 as an empty one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_internal: bool,
}

/// POST /api/v1/tickets/{id}/comments
///
/// Append a comment. Any authenticated caller may comment; end-user
/// authors cannot mark a comment internal, the flag is silently forced
/// off for them.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    validate_comment_content(&input.content)?;

    let comment = Comment::new(
        input.content,
        identity.to_actor_ref(),
        input.is_internal,
        Utc::now(),
    );

    TicketRepo::append_comment(&state.pool, id, &comment)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    tracing::info!(
        ticket_id = id,
        author_id = %comment.author.id,
        is_internal = comment.is_internal,
        "Comment added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/tickets/{id}/comments
///
/// List a ticket's comments in insertion order. Internal comments are
/// stripped unless the caller resolves to a staff identity.
pub async fn list(
    State(state): State<AppState>,
    OptionalIdentity(identity): OptionalIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    let ticket = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    let viewer = identity.as_ref().map(|identity| identity.role);
    let comments = visible_comments(ticket.comments.0, viewer);

    Ok(Json(DataResponse { data: comments }))
}
