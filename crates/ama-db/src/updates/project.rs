//! Government project update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_allocated: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_used: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_id: Option<Option<String>>,
}

#[derive(Default)]
pub struct ProjectUpdateBuilder(ProjectUpdate);

impl ProjectUpdateBuilder {
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
    pub fn category(mut self, category: Option<String>) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub const fn progress_percentage(mut self, progress: u8) -> Self {
        self.0.progress_percentage = Some(progress);
        self
    }

    #[must_use]
    pub const fn budget_allocated(mut self, amount: Option<f64>) -> Self {
        self.0.budget_allocated = Some(amount);
        self
    }

    #[must_use]
    pub const fn budget_used(mut self, amount: Option<f64>) -> Self {
        self.0.budget_used = Some(amount);
        self
    }

    #[must_use]
    pub fn official_id(mut self, official_id: Option<String>) -> Self {
        self.0.official_id = Some(official_id);
        self
    }

    #[must_use]
    pub fn build(self) -> ProjectUpdate {
        self.0
    }
}
