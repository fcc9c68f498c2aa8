//! Ticket comments and the internal/external visibility rules.
//!
//! Comments live embedded in their parent ticket, append-only and in
//! insertion order. Internal comments are staff-only notes; the filter
//! here is applied to every response a non-staff viewer can see.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::ticket::ActorRef;
use crate::types::Timestamp;

/// Maximum length of comment content in characters.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// One comment in a ticket's conversation. Immutable after creation;
/// there is no edit or delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub content: String,
    pub author: ActorRef,
    #[serde(default)]
    pub is_internal: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Comment {
    /// Build a comment, forcing the internal flag off for end-user
    /// authors regardless of what the request asked for.
    #[must_use]
    pub fn new(
        content: String,
        author: ActorRef,
        requested_internal: bool,
        now: Timestamp,
    ) -> Self {
        let is_internal = sanitize_internal_flag(requested_internal, author.role);
        Comment {
            content,
            author,
            is_internal,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this comment may appear in a response for `viewer`.
    #[must_use]
    pub fn visible_to(&self, viewer: Option<Role>) -> bool {
        !self.is_internal || viewer.is_some_and(Role::is_staff)
    }
}

/// End users cannot create staff-only notes; everyone else keeps the
/// requested flag.
#[must_use]
pub fn sanitize_internal_flag(requested: bool, author_role: Role) -> bool {
    if author_role == Role::User {
        false
    } else {
        requested
    }
}

/// Filter a ticket's comment list for a viewer. Staff see everything;
/// end users and anonymous viewers never see internal comments.
/// Insertion order is preserved.
#[must_use]
pub fn visible_comments(comments: Vec<Comment>, viewer: Option<Role>) -> Vec<Comment> {
    if viewer.is_some_and(Role::is_staff) {
        return comments;
    }
    comments.into_iter().filter(|c| !c.is_internal).collect()
}

/// Validate comment content: non-empty after trimming, within the
/// length limit.
pub fn validate_comment_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment content is required".to_string(),
        ));
    }
    if content.len() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
