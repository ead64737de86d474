//! Vote toggle resolution.
//!
//! Voting the same way twice removes the vote; voting the other way flips it.

use serde::{Deserialize, Serialize};

use crate::enums::{VoteAction, VoteType};

/// Result of applying a requested vote on top of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub action: VoteAction,
    /// The vote left in place, if any.
    pub new_vote: Option<VoteType>,
    pub up_delta: i64,
    pub down_delta: i64,
}

const fn delta(vote: VoteType, sign: i64) -> (i64, i64) {
    match vote {
        VoteType::Up => (sign, 0),
        VoteType::Down => (0, sign),
    }
}

#[must_use]
pub fn resolve_vote(existing: Option<VoteType>, requested: VoteType) -> VoteOutcome {
    match existing {
        None => {
            let (up, down) = delta(requested, 1);
            VoteOutcome {
                action: VoteAction::Added,
                new_vote: Some(requested),
                up_delta: up,
                down_delta: down,
            }
        }
        Some(prev) if prev == requested => {
            let (up, down) = delta(prev, -1);
            VoteOutcome {
                action: VoteAction::Removed,
                new_vote: None,
                up_delta: up,
                down_delta: down,
            }
        }
        Some(prev) => {
            let (up_old, down_old) = delta(prev, -1);
            let (up_new, down_new) = delta(requested, 1);
            VoteOutcome {
                action: VoteAction::Changed,
                new_vote: Some(requested),
                up_delta: up_old + up_new,
                down_delta: down_old + down_new,
            }
        }
    }
}
