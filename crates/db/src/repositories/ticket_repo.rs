//! Repository for the `tickets` table.
//!
//! Comment and status-history appends use jsonb concatenation so two
//! concurrent appends both land. The vote tally is a single slot
//! rewritten as a whole; concurrent votes race, last write wins.

use sqlx::types::Json;
use sqlx::PgPool;
use quickdesk_core::comment::Comment;
use quickdesk_core::types::DbId;
use quickdesk_core::vote::VoteTally;

use crate::models::ticket::{CreateTicket, Ticket, TicketFilter, TicketUpdate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ticket_number, subject, description, status, priority, \
                       category_id, tags, reporter, assigned_to, comments, \
                       status_history, votes, last_activity, created_at, updated_at";

/// Sortable columns exposed to the API, keyed by their wire names.
/// Unknown fields fall back to the default sort in the caller.
fn sort_column(field: &str) -> Option<&'static str> {
    match field {
        "lastActivity" => Some("last_activity"),
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        "priority" => Some("priority"),
        "status" => Some("status"),
        "subject" => Some("subject"),
        "ticketNumber" => Some("ticket_number"),
        _ => None,
    }
}

/// Turn a user-supplied search term into a containment pattern with
/// LIKE wildcards escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Build the WHERE clause for a ticket filter. Returns the clause and
/// the next free bind-parameter index. Bind order must match the
/// condition order here.
fn build_where(filter: &TicketFilter) -> (String, usize) {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx: usize = 1;

    if !filter.statuses.is_empty() {
        conditions.push(format!("status = ANY(${param_idx})"));
        param_idx += 1;
    }
    if !filter.priorities.is_empty() {
        conditions.push(format!("priority = ANY(${param_idx})"));
        param_idx += 1;
    }
    if !filter.category_ids.is_empty() {
        conditions.push(format!("category_id = ANY(${param_idx})"));
        param_idx += 1;
    }
    if filter.search.is_some() {
        conditions.push(format!(
            "(subject ILIKE ${param_idx} OR description ILIKE ${param_idx} \
             OR ticket_number ILIKE ${param_idx})"
        ));
        param_idx += 1;
    }
    if filter.reporter_id.is_some() {
        conditions.push(format!("reporter ->> 'id' = ${param_idx}"));
        param_idx += 1;
    }
    if filter.assigned_to_id.is_some() {
        conditions.push(format!("assigned_to ->> 'id' = ${param_idx}"));
        param_idx += 1;
    }
    if filter.created_from.is_some() {
        conditions.push(format!("created_at >= ${param_idx}"));
        param_idx += 1;
    }
    if filter.created_to.is_some() {
        conditions.push(format!("created_at <= ${param_idx}"));
        param_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, param_idx)
}

/// Provides CRUD operations for tickets and their embedded collections.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the full row. Status starts at
    /// the column default (`open`); embedded collections start empty.
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets \
                (ticket_number, subject, description, priority, category_id, tags, reporter) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.ticket_number)
            .bind(&input.subject)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(input.category_id)
            .bind(&input.tags)
            .bind(Json(&input.reporter))
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of the most recently created ticket, if any. Feeds the
    /// sequential ticket-number generator.
    pub async fn latest_ticket_number(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT ticket_number FROM tickets ORDER BY id DESC LIMIT 1")
            .fetch_optional(pool)
            .await
    }

    /// List tickets matching `filter`, sorted by the given wire-format
    /// field name (unknown names fall back to `lastActivity`).
    pub async fn list(
        pool: &PgPool,
        filter: &TicketFilter,
        sort_field: &str,
        descending: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let (where_clause, param_idx) = build_where(filter);
        let column = sort_column(sort_field).unwrap_or("last_activity");
        let direction = if descending { "DESC" } else { "ASC" };

        let query = format!(
            "SELECT {COLUMNS} FROM tickets {where_clause} \
             ORDER BY {column} {direction} \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Ticket>(&query);
        if !filter.statuses.is_empty() {
            q = q.bind(&filter.statuses);
        }
        if !filter.priorities.is_empty() {
            q = q.bind(&filter.priorities);
        }
        if !filter.category_ids.is_empty() {
            q = q.bind(&filter.category_ids);
        }
        if let Some(search) = &filter.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(reporter_id) = &filter.reporter_id {
            q = q.bind(reporter_id);
        }
        if let Some(assigned_to_id) = &filter.assigned_to_id {
            q = q.bind(assigned_to_id);
        }
        if let Some(from) = filter.created_from {
            q = q.bind(from);
        }
        if let Some(to) = filter.created_to {
            q = q.bind(to);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Count tickets matching `filter`, for pagination metadata.
    pub async fn count(pool: &PgPool, filter: &TicketFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = build_where(filter);
        let query = format!("SELECT COUNT(*) FROM tickets {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if !filter.statuses.is_empty() {
            q = q.bind(&filter.statuses);
        }
        if !filter.priorities.is_empty() {
            q = q.bind(&filter.priorities);
        }
        if !filter.category_ids.is_empty() {
            q = q.bind(&filter.category_ids);
        }
        if let Some(search) = &filter.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(reporter_id) = &filter.reporter_id {
            q = q.bind(reporter_id);
        }
        if let Some(assigned_to_id) = &filter.assigned_to_id {
            q = q.bind(assigned_to_id);
        }
        if let Some(from) = filter.created_from {
            q = q.bind(from);
        }
        if let Some(to) = filter.created_to {
            q = q.bind(to);
        }

        q.fetch_one(pool).await
    }

    /// Apply a combined update: scalar fields, status (with its history
    /// entry), and assignment. Refreshes `last_activity` on every write.
    /// Returns the updated row if found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &TicketUpdate,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let mut sets: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if changes.subject.is_some() {
            sets.push(format!("subject = ${param_idx}"));
            param_idx += 1;
        }
        if changes.description.is_some() {
            sets.push(format!("description = ${param_idx}"));
            param_idx += 1;
        }
        if changes.priority.is_some() {
            sets.push(format!("priority = ${param_idx}"));
            param_idx += 1;
        }
        if changes.status.is_some() {
            sets.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if changes.history_entry.is_some() {
            sets.push(format!("status_history = status_history || ${param_idx}"));
            param_idx += 1;
        }
        if let Some(assignment) = &changes.assignment {
            match assignment {
                Some(_) => {
                    sets.push(format!("assigned_to = ${param_idx}"));
                    param_idx += 1;
                }
                None => sets.push("assigned_to = NULL".to_string()),
            }
        }

        if sets.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        sets.push("last_activity = now()".to_string());
        sets.push("updated_at = now()".to_string());

        let query = format!(
            "UPDATE tickets SET {} WHERE id = ${param_idx} RETURNING {COLUMNS}",
            sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, Ticket>(&query);
        if let Some(subject) = &changes.subject {
            q = q.bind(subject);
        }
        if let Some(description) = &changes.description {
            q = q.bind(description);
        }
        if let Some(priority) = &changes.priority {
            q = q.bind(priority);
        }
        if let Some(status) = &changes.status {
            q = q.bind(status);
        }
        if let Some(entry) = &changes.history_entry {
            q = q.bind(Json(entry));
        }
        if let Some(Some(assignee)) = &changes.assignment {
            q = q.bind(Json(assignee));
        }
        q = q.bind(id);

        q.fetch_optional(pool).await
    }

    /// Append one comment and refresh `last_activity`. Returns the
    /// updated row if found.
    pub async fn append_comment(
        pool: &PgPool,
        id: DbId,
        comment: &Comment,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets \
             SET comments = comments || $1, last_activity = now(), updated_at = now() \
             WHERE id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(Json(comment))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Store a recomputed vote tally and refresh `last_activity`.
    /// Returns the updated row if found.
    pub async fn set_votes(
        pool: &PgPool,
        id: DbId,
        votes: &VoteTally,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets \
             SET votes = $1, last_activity = now(), updated_at = now() \
             WHERE id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(Json(votes))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a ticket. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
