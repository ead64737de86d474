use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AppRole;

/// A platform user.
///
/// The location ids default the jurisdiction of civic actions the user reports.
/// Karma is derived from net votes on the user's posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub role: AppRole,
    pub ward_id: Option<String>,
    pub constituency_id: Option<String>,
    pub county_id: Option<String>,
    pub is_verified_resident: bool,
    pub is_verified_user: bool,
    pub is_verified_official: bool,
    pub post_karma: i64,
    pub comment_karma: i64,
    pub karma: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
