pub mod auth;
pub mod categories;
pub mod health;
pub mod staff;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  staff login (public)
/// /auth/verify                 token verification (staff or session token)
///
/// /tickets                     list (auth), create (open, demo fallback)
/// /tickets/{id}                get (public), update (staff), delete (admin)
/// /tickets/{id}/vote           cast vote (auth)
/// /tickets/{id}/comments       list (public, filtered), add (auth)
///
/// /categories                  list (public)
/// /categories/{id}             create/update/deactivate (admin)
///
/// /staff                       list, register (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (staff login, token verification).
        .nest("/auth", auth::router())
        // Tickets plus their nested vote and comment sub-resources.
        .nest("/tickets", tickets::router())
        // Category management; listing is public.
        .nest("/categories", categories::router())
        // Staff account management (admin only).
        .nest("/staff", staff::router())
}
