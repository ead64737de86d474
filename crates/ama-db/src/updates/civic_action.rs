//! Civic action edit builder.
//!
//! Status is not editable here; it moves only through
//! `AmaService::transition_civic_action`.

use ama_core::enums::{IssueCategory, Urgency};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CivicActionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<IssueCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_text: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

#[derive(Default)]
pub struct CivicActionPatchBuilder(CivicActionPatch);

impl CivicActionPatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn category(mut self, category: IssueCategory) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub const fn urgency(mut self, urgency: Urgency) -> Self {
        self.0.urgency = Some(urgency);
        self
    }

    #[must_use]
    pub fn location_text(mut self, location_text: Option<String>) -> Self {
        self.0.location_text = Some(location_text);
        self
    }

    #[must_use]
    pub const fn is_public(mut self, is_public: bool) -> Self {
        self.0.is_public = Some(is_public);
        self
    }

    #[must_use]
    pub fn build(self) -> CivicActionPatch {
        self.0
    }
}
