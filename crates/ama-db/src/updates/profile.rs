//! Profile update builder.

use ama_core::enums::AppRole;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AppRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituency_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county_id: Option<Option<String>>,
}

#[derive(Default)]
pub struct ProfileUpdateBuilder(ProfileUpdate);

impl ProfileUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn display_name(mut self, display_name: Option<String>) -> Self {
        self.0.display_name = Some(display_name);
        self
    }

    #[must_use]
    pub const fn role(mut self, role: AppRole) -> Self {
        self.0.role = Some(role);
        self
    }

    /// Set the home ward, constituency and county together.
    #[must_use]
    pub fn location(
        mut self,
        ward_id: Option<String>,
        constituency_id: Option<String>,
        county_id: Option<String>,
    ) -> Self {
        self.0.ward_id = Some(ward_id);
        self.0.constituency_id = Some(constituency_id);
        self.0.county_id = Some(county_id);
        self
    }

    #[must_use]
    pub fn build(self) -> ProfileUpdate {
        self.0
    }
}
