use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VerificationStatus;

/// A government body (ministry, county assembly, agency).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GovernmentInstitution {
    pub id: String,
    pub name: String,
    pub institution_type: String,
    pub division_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's claim to hold an office.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OfficeHolder {
    pub id: String,
    pub user_id: String,
    pub institution_id: Option<String>,
    pub division_id: Option<String>,
    pub position_title: String,
    pub is_active: bool,
    pub verification_status: VerificationStatus,
    pub term_start: Option<NaiveDate>,
    pub term_end: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
