use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An official's attendance at one sitting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceSession {
    pub id: String,
    pub official_id: String,
    pub session_date: NaiveDate,
    pub present: bool,
    pub created_at: DateTime<Utc>,
}

/// A question put to an official by a citizen.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CitizenQuery {
    pub id: String,
    pub official_id: String,
    pub asker_id: String,
    pub question: String,
    pub response: Option<String>,
    pub asked_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl CitizenQuery {
    /// Hours between the question and the response, if answered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn response_hours(&self) -> Option<f64> {
        self.responded_at
            .map(|responded| (responded - self.asked_at).num_seconds() as f64 / 3600.0)
    }
}
