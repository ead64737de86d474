use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An administrator-controlled platform feature switch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeatureFlag {
    pub id: String,
    /// Stable lookup key, e.g. `baraza`.
    pub feature_key: String,
    pub feature_name: String,
    pub category: String,
    pub description: Option<String>,
    pub is_enabled: bool,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
