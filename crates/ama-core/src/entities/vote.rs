use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{VoteTarget, VoteType};

/// A single user's vote on a post or comment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Vote {
    pub id: String,
    pub user_id: String,
    pub target: VoteTarget,
    pub target_id: String,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}
