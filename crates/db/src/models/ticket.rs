//! Ticket entity models and DTOs.
//!
//! A ticket row embeds its conversation, status history, and vote tally
//! as JSONB, so a single fetch yields the whole aggregate the API
//! serves. The embedded shapes are the typed values from
//! `quickdesk_core`, not raw JSON.

use quickdesk_core::comment::Comment;
use quickdesk_core::ticket::{StatusChange, UserRef};
use quickdesk_core::types::{DbId, Timestamp};
use quickdesk_core::vote::VoteTally;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::category::Category;

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: DbId,
    pub ticket_number: String,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    pub tags: Vec<String>,
    pub reporter: Json<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Json<UserRef>>,
    pub comments: Json<Vec<Comment>>,
    pub status_history: Json<Vec<StatusChange>>,
    pub votes: Json<VoteTally>,
    pub last_activity: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ticket {
    /// Attach the resolved category object for the response body.
    #[must_use]
    pub fn with_category(self, category: Option<Category>) -> TicketResponse {
        TicketResponse {
            ticket: self,
            category,
        }
    }
}

/// A ticket plus its resolved category, as returned by the API.
///
/// Category resolution is best-effort enrichment: a missing or deleted
/// category degrades this to `category: null`, never an error.
#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Resolved insert payload for a ticket. The caller has already
/// validated fields, assigned the ticket number, and resolved the
/// reporter summary.
#[derive(Debug)]
pub struct CreateTicket {
    pub ticket_number: String,
    pub subject: String,
    pub description: String,
    pub priority: String,
    pub category_id: Option<DbId>,
    pub tags: Vec<String>,
    pub reporter: UserRef,
}

/// Combined mutation payload for the ticket update operation.
///
/// `None` leaves a field untouched. `assignment` distinguishes "do not
/// touch" (`None`) from "clear" (`Some(None)`) and "set" (`Some(Some)`).
/// When `status` is present and differs from the stored value the caller
/// supplies `history_entry`; an equal status is written without one.
#[derive(Debug, Default)]
pub struct TicketUpdate {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub history_entry: Option<StatusChange>,
    pub assignment: Option<Option<UserRef>>,
}

impl TicketUpdate {
    /// Whether the update carries any change at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.assignment.is_none()
    }
}

/// Filters for ticket listings. All present fields combine with AND;
/// the multi-value fields match any of their entries.
#[derive(Debug, Default)]
pub struct TicketFilter {
    pub statuses: Vec<String>,
    pub priorities: Vec<String>,
    pub category_ids: Vec<DbId>,
    pub search: Option<String>,
    pub reporter_id: Option<String>,
    pub assigned_to_id: Option<String>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}
