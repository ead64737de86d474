//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL; nullable columns use
//! `Option<Option<T>>` so callers can clear them. The update struct is also
//! stored as the audit `detail` (changed fields only).

pub mod civic_action;
pub mod division;
pub mod post;
pub mod profile;
pub mod project;
pub mod promise;

/// Accumulates `column = ?n` clauses and their bind values.
#[derive(Debug, Default)]
pub(crate) struct SetClauses {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetClauses {
    pub(crate) fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Finish as `UPDATE {table} SET ... WHERE {key} = ?n`.
    pub(crate) fn into_update(
        mut self,
        table: &str,
        key: &str,
        id: &str,
    ) -> (String, Vec<libsql::Value>) {
        self.params.push(id.into());
        let sql = format!(
            "UPDATE {table} SET {} WHERE {key} = ?{}",
            self.sets.join(", "),
            self.params.len()
        );
        (sql, self.params)
    }
}
