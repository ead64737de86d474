use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A discussion post in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub community_id: Option<String>,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Net score: upvotes minus downvotes.
    #[must_use]
    pub fn net_votes(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}
