use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A node in the administrative hierarchy (country → county → constituency → ward).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AdministrativeDivision {
    pub id: String,
    pub country_code: String,
    pub name: String,
    /// Free-form level label, e.g. `county`, `constituency`, `ward`.
    pub governance_level: String,
    /// Depth in the hierarchy; roots are 0.
    pub level_index: u32,
    pub parent_id: Option<String>,
    pub division_code: Option<String>,
    pub population: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
