//! Handlers for the `/tickets` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use quickdesk_core::comment::visible_comments;
use quickdesk_core::error::CoreError;
use quickdesk_core::pagination::{clamp_limit, clamp_page, offset_for_page, PageMeta};
use quickdesk_core::roles::Role;
use quickdesk_core::ticket::{
    fallback_ticket_number, next_ticket_number, plan_status_change, validate_description,
    validate_subject, validate_tags, TicketPriority, TicketStatus, UserRef,
};
use quickdesk_core::types::DbId;
use quickdesk_db::models::category::Category;
use quickdesk_db::models::staff::StaffAccount;
use quickdesk_db::models::ticket::{
    CreateTicket, Ticket, TicketFilter, TicketResponse, TicketUpdate,
};
use quickdesk_db::repositories::{CategoryRepo, StaffRepo, TicketRepo};
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{OptionalIdentity, RequireAdmin, RequireAuth, RequireStaff};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /tickets`. Multi-value filters arrive as
/// comma-separated lists (`status=open,resolved`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub assigned_to: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
    pub all_tickets: Option<bool>,
}

/// Request body for `POST /tickets`.
///
/// Subject and description default to empty strings so a missing field
/// reports the same 400 as an empty one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub priority: Option<String>,
    pub category: Option<DbId>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `PUT /tickets/{id}`. Every field is optional;
/// `assignedToId` distinguishes an absent key (leave unchanged) from an
/// explicit `null` (clear the assignment).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to_id: Option<Option<DbId>>,
}

/// Deserialize a nullable field so an absent key stays `None` while an
/// explicit `null` becomes `Some(None)`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DbId>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tickets
///
/// Paged listing scoped to the caller: by default everyone sees the
/// tickets they reported; staff may pass `allTickets=true` to lift the
/// scope.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Query(params): Query<TicketListParams>,
) -> AppResult<Json<PageResponse<TicketResponse>>> {
    // 1. The unscoped listing is a staff capability.
    let all_tickets = params.all_tickets.unwrap_or(false);
    if all_tickets && !identity.is_staff() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Staff role required to list all tickets".into(),
        )));
    }

    // 2. Translate the query parameters into a repository filter.
    //    Unknown status or priority names simply match nothing.
    let category_ids = split_csv(&params.category)
        .into_iter()
        .map(|raw| {
            raw.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid category id: {raw}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let filter = TicketFilter {
        statuses: split_csv(&params.status),
        priorities: split_csv(&params.priority),
        category_ids,
        search: params.search.clone(),
        reporter_id: (!all_tickets).then(|| identity.subject.clone()),
        assigned_to_id: params.assigned_to.clone(),
        created_from: params.date_from,
        created_to: params.date_to,
    };

    // 3. Fetch the requested page plus the total for the envelope.
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let offset = offset_for_page(page, limit);

    let sort_field = params.sort_field.as_deref().unwrap_or("lastActivity");
    let descending = params.sort_direction.as_deref() != Some("asc");

    let tickets =
        TicketRepo::list(&state.pool, &filter, sort_field, descending, limit, offset).await?;
    let total = TicketRepo::count(&state.pool, &filter).await?;

    // 4. Resolve every referenced category in one query.
    let mut wanted: Vec<DbId> = tickets.iter().filter_map(|t| t.category_id).collect();
    wanted.sort_unstable();
    wanted.dedup();
    let categories: HashMap<DbId, Category> = CategoryRepo::find_by_ids(&state.pool, &wanted)
        .await?
        .into_iter()
        .map(|category| (category.id, category))
        .collect();

    let viewer = Some(identity.role);
    let data = tickets
        .into_iter()
        .map(|ticket| {
            let category = ticket.category_id.and_then(|id| categories.get(&id).cloned());
            filter_ticket_comments(ticket, viewer).with_category(category)
        })
        .collect();

    Ok(Json(PageResponse {
        data,
        pagination: PageMeta::new(page, limit, total),
    }))
}

/// POST /api/v1/tickets
///
/// File a ticket. Works without authentication: anonymous callers get a
/// throwaway demo reporter identity so the submission form stays open.
pub async fn create(
    State(state): State<AppState>,
    OptionalIdentity(identity): OptionalIdentity,
    Json(input): Json<CreateTicketRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TicketResponse>>)> {
    // 1. Required fields and length caps.
    if input.subject.is_empty() || input.description.is_empty() {
        return Err(AppError::BadRequest(
            "Subject and description are required".into(),
        ));
    }
    validate_subject(&input.subject)?;
    validate_description(&input.description)?;
    validate_tags(&input.tags)?;

    let priority = match input.priority.as_deref() {
        Some(raw) => TicketPriority::parse(raw)?,
        None => TicketPriority::Medium,
    };

    // 2. Resolve the reporter.
    let reporter = match &identity {
        Some(identity) => identity.to_user_ref(),
        None => demo_reporter(Utc::now()),
    };

    // 3. Allocate the next ticket number. When the latest number cannot
    //    be read, fall back to a timestamp-derived number rather than
    //    refusing the submission.
    let ticket_number = match TicketRepo::latest_ticket_number(&state.pool).await {
        Ok(latest) => next_ticket_number(latest.as_deref()),
        Err(error) => {
            tracing::warn!(%error, "falling back to timestamp ticket number");
            fallback_ticket_number(Utc::now())
        }
    };

    // 4. An unknown category id is dropped rather than rejected.
    let category = match input.category {
        Some(category_id) => CategoryRepo::find_by_id(&state.pool, category_id).await?,
        None => None,
    };

    let ticket = TicketRepo::create(
        &state.pool,
        &CreateTicket {
            ticket_number,
            subject: input.subject,
            description: input.description,
            priority: priority.as_str().to_string(),
            category_id: category.as_ref().map(|c| c.id),
            tags: input.tags,
            reporter,
        },
    )
    .await?;

    tracing::info!(
        ticket_id = ticket.id,
        ticket_number = %ticket.ticket_number,
        reporter_id = %ticket.reporter.id,
        "Ticket created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ticket.with_category(category),
        }),
    ))
}

/// GET /api/v1/tickets/{id}
///
/// Public ticket view. Internal comments are stripped unless the caller
/// resolves to a staff identity.
pub async fn get_by_id(
    State(state): State<AppState>,
    OptionalIdentity(identity): OptionalIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketResponse>>> {
    let ticket = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    let viewer = identity.as_ref().map(|identity| identity.role);
    let ticket = filter_ticket_comments(ticket, viewer);

    let category = match ticket.category_id {
        Some(category_id) => CategoryRepo::find_by_id(&state.pool, category_id).await?,
        None => None,
    };

    Ok(Json(DataResponse {
        data: ticket.with_category(category),
    }))
}

/// PUT /api/v1/tickets/{id}
///
/// Staff-only partial update. A status change appends a history entry
/// naming the acting staff member; re-asserting the current status is a
/// success no-op that records nothing.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(identity): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicketRequest>,
) -> AppResult<Json<DataResponse<TicketResponse>>> {
    // 1. The change set is computed against the current document.
    let current = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    let mut changes = TicketUpdate::default();

    // 2. Status transition plus its audit entry.
    if let Some(raw) = &input.status {
        let to = TicketStatus::parse(raw)?;
        let from = TicketStatus::parse(&current.status).map_err(|_| {
            AppError::InternalError(format!("Stored status '{}' is invalid", current.status))
        })?;
        changes.status = Some(to.as_str().to_string());
        changes.history_entry = plan_status_change(from, to, identity.to_actor_ref(), Utc::now());
    }

    // 3. Remaining scalar fields.
    if let Some(raw) = &input.priority {
        let priority = TicketPriority::parse(raw)?;
        changes.priority = Some(priority.as_str().to_string());
    }
    if let Some(subject) = &input.subject {
        validate_subject(subject)?;
        changes.subject = Some(subject.clone());
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
        changes.description = Some(description.clone());
    }

    // 4. Assignment: an id must name an active staff account, an
    //    explicit null clears it.
    if let Some(assignment) = input.assigned_to_id {
        changes.assignment = Some(match assignment {
            Some(staff_id) => {
                let agent = StaffRepo::find_by_id(&state.pool, staff_id)
                    .await?
                    .filter(|agent| agent.is_active)
                    .ok_or_else(|| AppError::BadRequest("Agent not found".into()))?;
                Some(staff_user_ref(&agent))
            }
            None => None,
        });
    }

    // 5. Apply. The repository stamps last_activity on every update.
    let ticket = TicketRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    if let Some(entry) = &changes.history_entry {
        tracing::info!(
            ticket_id = id,
            from = %entry.from,
            to = %entry.to,
            staff_id = %identity.subject,
            "Ticket status changed"
        );
    } else {
        tracing::info!(ticket_id = id, staff_id = %identity.subject, "Ticket updated");
    }

    let category = match ticket.category_id {
        Some(category_id) => CategoryRepo::find_by_id(&state.pool, category_id).await?,
        None => None,
    };

    Ok(Json(DataResponse {
        data: ticket.with_category(category),
    }))
}

/// DELETE /api/v1/tickets/{id}
///
/// Admin-only hard delete.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = TicketRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(ticket_id = id, admin_id = %identity.subject, "Ticket deleted");
        Ok(Json(MessageResponse {
            message: "Ticket deleted successfully",
        }))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split a comma-separated filter value, dropping empty segments.
fn split_csv(value: &Option<String>) -> Vec<String> {
    value
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Strip comments the viewer may not see from a ticket document.
fn filter_ticket_comments(mut ticket: Ticket, viewer: Option<Role>) -> Ticket {
    let comments = std::mem::take(&mut ticket.comments.0);
    ticket.comments.0 = visible_comments(comments, viewer);
    ticket
}

/// Reporter identity used when an unauthenticated caller files a ticket.
fn demo_reporter(now: DateTime<Utc>) -> UserRef {
    UserRef {
        id: format!("demo-user-{}", now.timestamp_millis()),
        name: "Demo User".to_string(),
        email: "demo@example.com".to_string(),
        avatar: None,
    }
}

/// Assignee summary for a staff account embedded in a ticket.
fn staff_user_ref(account: &StaffAccount) -> UserRef {
    UserRef {
        id: account.id.to_string(),
        name: account.name.clone(),
        email: account.email.clone(),
        avatar: account.avatar.clone(),
    }
}
