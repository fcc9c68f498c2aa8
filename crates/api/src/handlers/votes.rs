//! Handler for ticket voting (`/tickets/{id}/vote`).

use axum::extract::{Path, State};
use axum::Json;
use quickdesk_core::error::CoreError;
use quickdesk_core::types::DbId;
use quickdesk_core::vote::{VoteDirection, VoteTally};
use quickdesk_db::repositories::TicketRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tickets/{id}/vote`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub vote_type: String,
}

/// POST /api/v1/tickets/{id}/vote
///
/// Apply one vote with toggle semantics: repeating the remembered
/// direction clears it, the opposite direction moves it. Responds with
/// the updated tally.
pub async fn cast(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<Json<DataResponse<VoteTally>>> {
    let direction = VoteDirection::parse(&input.vote_type)?;

    let ticket = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    let tally = ticket.votes.0.cast(direction);

    TicketRepo::set_votes(&state.pool, id, &tally)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    tracing::info!(
        ticket_id = id,
        voter_id = %identity.subject,
        vote_type = direction.as_str(),
        upvotes = tally.upvotes,
        downvotes = tally.downvotes,
        "Vote cast"
    );

    Ok(Json(DataResponse { data: tally }))
}
