//! Ticket domain logic: status and priority enums, the human-readable
//! ticket-number scheme, embedded person summaries, field validation,
//! and status-change planning.
//!
//! Everything here is pure. The `db` crate persists the results and the
//! `api` crate maps validation failures to HTTP 400.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Prefix of every human-readable ticket number.
pub const TICKET_NUMBER_PREFIX: &str = "QD-";

/// Minimum width of the numeric part of a ticket number (zero-padded).
pub const TICKET_NUMBER_WIDTH: usize = 6;

/// Maximum length of a ticket subject in characters.
pub const MAX_SUBJECT_LENGTH: usize = 200;

/// Maximum length of a ticket description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Maximum number of free-text tags on a ticket.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag.
pub const MAX_TAG_LENGTH: usize = 50;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Ticket workflow status. Wire format uses kebab-case names
/// (`open`, `in-progress`, `resolved`, `closed`).
///
/// Transitions are unconstrained: staff may move a ticket from any state
/// to any other. The status history records every change either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// All valid status strings, in conventional workflow order.
pub const VALID_STATUSES: &[&str] = &["open", "in-progress", "resolved", "closed"];

impl TicketStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    /// Parse a wire-format status name.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "open" => Ok(TicketStatus::Open),
            "in-progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Ticket priority. New tickets default to `medium` when the request
/// omits the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// All valid priority strings, lowest first.
pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

impl TicketPriority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Urgent => "urgent",
        }
    }

    /// Parse a wire-format priority name.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "urgent" => Ok(TicketPriority::Urgent),
            other => Err(CoreError::Validation(format!(
                "Invalid priority '{other}'. Must be one of: {}",
                VALID_PRIORITIES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Embedded person summaries
// ---------------------------------------------------------------------------

/// Snapshot of the reporting user (or assigned staff member) embedded in
/// a ticket. Denormalized at write time so ticket reads need no account
/// lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Snapshot of the caller performing a mutation. Unlike [`UserRef`] this
/// carries the role, which drives comment visibility and history entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRef {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ActorRef {
    /// Drop the role, keeping the plain person summary.
    #[must_use]
    pub fn to_user_ref(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Status history
// ---------------------------------------------------------------------------

/// One entry in a ticket's append-only status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub from: TicketStatus,
    pub to: TicketStatus,
    pub updated_by: ActorRef,
    pub created_at: Timestamp,
}

/// Decide whether a status update appends a history entry.
///
/// Returns `None` when `to` equals the current status: the update still
/// succeeds but records nothing. Otherwise returns the entry to append.
#[must_use]
pub fn plan_status_change(
    current: TicketStatus,
    to: TicketStatus,
    actor: ActorRef,
    now: Timestamp,
) -> Option<StatusChange> {
    if current == to {
        return None;
    }
    Some(StatusChange {
        from: current,
        to,
        updated_by: actor,
        created_at: now,
    })
}

// ---------------------------------------------------------------------------
// Ticket numbers
// ---------------------------------------------------------------------------

/// Format a sequence number as a ticket number (`QD-000001`).
///
/// Numbers wider than [`TICKET_NUMBER_WIDTH`] digits are kept in full,
/// which is how timestamp-derived fallback numbers stay unique.
#[must_use]
pub fn format_ticket_number(seq: u64) -> String {
    format!(
        "{TICKET_NUMBER_PREFIX}{seq:0width$}",
        width = TICKET_NUMBER_WIDTH
    )
}

/// Extract the numeric part of a ticket number. Returns `None` when the
/// prefix is missing or the remainder is not all decimal digits.
#[must_use]
pub fn parse_ticket_number(number: &str) -> Option<u64> {
    let digits = number.strip_prefix(TICKET_NUMBER_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Compute the ticket number that follows `latest` (the number of the
/// most recently created ticket, if any).
///
/// An absent or unparseable `latest` restarts the sequence at 1 instead
/// of failing the create.
#[must_use]
pub fn next_ticket_number(latest: Option<&str>) -> String {
    let next = latest
        .and_then(parse_ticket_number)
        .map_or(1, |seq| seq + 1);
    format_ticket_number(next)
}

/// Timestamp-derived ticket number used when the sequence lookup fails.
#[must_use]
pub fn fallback_ticket_number(now: Timestamp) -> String {
    format!("{TICKET_NUMBER_PREFIX}{}", now.timestamp_millis())
}

/// Check that a string is a well-formed ticket number.
#[must_use]
pub fn is_valid_ticket_number(number: &str) -> bool {
    parse_ticket_number(number).is_some()
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a ticket subject: non-empty after trimming, within the
/// length limit.
pub fn validate_subject(subject: &str) -> Result<(), CoreError> {
    if subject.trim().is_empty() {
        return Err(CoreError::Validation("Subject is required".to_string()));
    }
    if subject.len() > MAX_SUBJECT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Subject exceeds maximum length of {MAX_SUBJECT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a ticket description: non-empty after trimming, within the
/// length limit.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Description is required".to_string(),
        ));
    }
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the free-text tag list.
pub fn validate_tags(tags: &[String]) -> Result<(), CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_TAGS} tags are allowed"
        )));
    }
    for tag in tags {
        if tag.trim().is_empty() {
            return Err(CoreError::Validation("Tags cannot be empty".to_string()));
        }
        if tag.len() > MAX_TAG_LENGTH {
            return Err(CoreError::Validation(format!(
                "Tag exceeds maximum length of {MAX_TAG_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
