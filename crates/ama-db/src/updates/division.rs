//! Administrative division update builder.
//!
//! Re-parenting is not supported; `level_index` follows the parent at creation.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DivisionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub governance_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division_code: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<Option<u64>>,
}

#[derive(Default)]
pub struct DivisionUpdateBuilder(DivisionUpdate);

impl DivisionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn governance_level(mut self, level: impl Into<String>) -> Self {
        self.0.governance_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn division_code(mut self, code: Option<String>) -> Self {
        self.0.division_code = Some(code);
        self
    }

    #[must_use]
    pub const fn population(mut self, population: Option<u64>) -> Self {
        self.0.population = Some(population);
        self
    }

    #[must_use]
    pub fn build(self) -> DivisionUpdate {
        self.0
    }
}
