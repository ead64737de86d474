use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TrustTier;

/// Stored civic impact metrics for a user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CivicImpactScore {
    pub user_id: String,
    /// 0..=100.
    pub impact_rating: f64,
    pub trust_tier: TrustTier,
    pub goat_level: u32,
    pub goat_title: String,
    pub goat_xp: u64,
    pub actions_score: f64,
    pub resolution_score: f64,
    pub community_score: f64,
    pub reliability_score: f64,
    pub calculated_at: DateTime<Utc>,
}

/// A row of the GOAT level reference table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GoatLevel {
    pub level: u32,
    pub title: String,
    pub xp_required: u64,
    pub description: Option<String>,
    pub badge_color: Option<String>,
}
