use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Grade;

/// An official's public service scorecard.
///
/// Either read from the `official_scorecards` cache or computed by
/// [`crate::scorecard::compute_scorecard`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct OfficialScorecard {
    pub user_id: String,

    pub promises_total: u32,
    pub promises_kept: u32,
    pub promises_broken: u32,
    pub promises_in_progress: u32,
    pub promise_kept_percent: u32,

    pub projects_total: u32,
    pub projects_stalled: u32,
    pub projects_active: u32,
    pub projects_completed: u32,
    pub projects_cancelled: u32,

    pub attendance_sessions_total: u32,
    pub attendance_sessions_present: u32,
    pub attendance_percent: u32,

    pub total_citizen_queries: u32,
    pub queries_responded: u32,
    pub avg_response_hours: Option<f64>,

    /// `None` when the official has neither promises nor projects.
    pub overall_grade: Option<Grade>,
    pub last_calculated: DateTime<Utc>,
}
