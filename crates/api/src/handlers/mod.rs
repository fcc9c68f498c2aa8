//! Request handlers for the help-desk resources.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `quickdesk_db`, enforce the
//! access rules via the extractors in [`crate::middleware`], and map
//! errors via [`crate::error::AppError`].

pub mod auth;
pub mod categories;
pub mod comments;
pub mod staff;
pub mod tickets;
pub mod votes;
