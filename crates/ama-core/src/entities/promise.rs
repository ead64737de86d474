use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PromiseStatus;

/// A development promise made by an official.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DevelopmentPromise {
    pub id: String,
    pub official_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: PromiseStatus,
    /// 0..=100.
    pub progress_percentage: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
