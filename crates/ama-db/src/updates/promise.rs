//! Development promise update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PromiseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<u8>,
}

#[derive(Default)]
pub struct PromiseUpdateBuilder(PromiseUpdate);

impl PromiseUpdateBuilder {
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
    pub fn build(self) -> PromiseUpdate {
        self.0
    }
}
