use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;

/// A government project tracked for accountability.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GovernmentProject {
    pub id: String,
    /// Official primarily responsible; projects count toward their scorecard.
    pub official_id: Option<String>,
    pub institution_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: ProjectStatus,
    /// 0..=100.
    pub progress_percentage: u8,
    pub budget_allocated: Option<f64>,
    pub budget_used: Option<f64>,
    pub county: Option<String>,
    pub constituency: Option<String>,
    pub ward: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
