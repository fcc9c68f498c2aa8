//! Route definitions for the `/tickets` resource.
//!
//! Also nests the vote and comment sub-resources under
//! `/tickets/{id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comments, tickets, votes};
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// GET    /               -> list (scoped to the caller)
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update (staff)
/// DELETE /{id}           -> delete (admin)
///
/// POST   /{id}/vote      -> cast
/// GET    /{id}/comments  -> list
/// POST   /{id}/comments  -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list).post(tickets::create))
        .route(
            "/{id}",
            get(tickets::get_by_id)
                .put(tickets::update)
                .delete(tickets::delete),
        )
        .route("/{id}/vote", post(votes::cast))
        .route(
            "/{id}/comments",
            get(comments::list).post(comments::create),
        )
}
