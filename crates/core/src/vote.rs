//! Per-ticket vote tally with single-slot toggle semantics.
//!
//! Each ticket remembers at most one vote direction. Casting the same
//! direction again toggles the vote off; casting the other direction
//! moves it. Counts never go below zero.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A vote direction as carried in the `voteType` request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }

    /// Parse a wire-format vote direction.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            other => Err(CoreError::Validation(format!(
                "Invalid vote type '{other}'. Must be 'up' or 'down'"
            ))),
        }
    }
}

/// Aggregate up/down counters plus the remembered vote direction.
///
/// The remembered slot is stored per ticket, not per voter, so the
/// toggle semantics apply to whoever votes next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_vote: Option<VoteDirection>,
}

impl VoteTally {
    /// Apply one vote and return the updated tally.
    ///
    /// Same direction as the remembered vote toggles it off; a different
    /// direction moves the vote; no remembered vote records a fresh one.
    #[must_use]
    pub fn cast(mut self, direction: VoteDirection) -> VoteTally {
        match self.user_vote {
            Some(previous) if previous == direction => {
                self.decrement(direction);
                self.user_vote = None;
            }
            Some(previous) => {
                self.decrement(previous);
                self.increment(direction);
                self.user_vote = Some(direction);
            }
            None => {
                self.increment(direction);
                self.user_vote = Some(direction);
            }
        }
        self
    }

    fn increment(&mut self, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.upvotes += 1,
            VoteDirection::Down => self.downvotes += 1,
        }
    }

    // Counts floor at zero.
    fn decrement(&mut self, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.upvotes = (self.upvotes - 1).max(0),
            VoteDirection::Down => self.downvotes = (self.downvotes - 1).max(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
