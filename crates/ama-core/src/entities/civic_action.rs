use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ActionLevel, CivicActionStatus, IssueCategory, Urgency};

/// A citizen-submitted issue report tracked through a fixed status lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CivicAction {
    pub id: String,
    /// Human-facing reference, e.g. `CA-2026-3F9A1C`.
    pub case_number: String,
    pub user_id: String,
    pub category: IssueCategory,
    pub action_level: ActionLevel,
    pub title: String,
    pub description: Option<String>,
    pub urgency: Urgency,
    pub status: CivicActionStatus,
    pub location_text: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ward_id: Option<String>,
    pub constituency_id: Option<String>,
    pub county_id: Option<String>,
    pub is_public: bool,
    pub support_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One step in a civic action's status history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CivicActionUpdate {
    pub id: String,
    pub action_id: String,
    pub user_id: Option<String>,
    pub previous_status: Option<CivicActionStatus>,
    pub new_status: CivicActionStatus,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
