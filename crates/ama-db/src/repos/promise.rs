//! Development promise repository.

use chrono::Utc;

use ama_core::audit_detail::StatusChangedDetail;
use ama_core::entities::DevelopmentPromise;
use ama_core::enums::{AuditAction, EntityType, PromiseStatus};
use ama_core::ids::PREFIX_PROMISE;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_percent, parse_datetime, parse_enum};
use crate::service::AmaService;
use crate::updates::SetClauses;
use crate::updates::promise::PromiseUpdate;

const SELECT_COLS: &str = "id, official_id, title, description, category, status, \
     progress_percentage, created_at, updated_at";

fn row_to_promise(row: &libsql::Row) -> Result<DevelopmentPromise, DatabaseError> {
    Ok(DevelopmentPromise {
        id: row.get(0)?,
        official_id: row.get(1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        category: get_opt_string(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        progress_percentage: get_percent(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl AmaService {
    pub async fn create_promise(
        &self,
        official_id: &str,
        title: &str,
        description: Option<&str>,
        category: Option<&str>,
    ) -> Result<DevelopmentPromise, DatabaseError> {
        if title.trim().is_empty() {
            return Err(DatabaseError::Validation("promise title must not be empty".into()));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROMISE).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO development_promises (id, official_id, title, description, category,
                 status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    official_id,
                    title,
                    description,
                    category,
                    PromiseStatus::NotStarted.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.audit::<()>(EntityType::DevelopmentPromise, &id, AuditAction::Created, None)
            .await?;

        Ok(DevelopmentPromise {
            id,
            official_id: official_id.to_string(),
            title: title.to_string(),
            description: description.map(String::from),
            category: category.map(String::from),
            status: PromiseStatus::NotStarted,
            progress_percentage: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_promise(&self, id: &str) -> Result<DevelopmentPromise, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM development_promises WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_promise(&row)
    }

    /// Every promise made by an official, oldest first.
    pub async fn list_promises_for_official(
        &self,
        official_id: &str,
    ) -> Result<Vec<DevelopmentPromise>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM development_promises WHERE official_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [official_id],
            )
            .await?;
        let mut promises = Vec::new();
        while let Some(row) = rows.next().await? {
            promises.push(row_to_promise(&row)?);
        }
        Ok(promises)
    }

    pub async fn update_promise(
        &self,
        promise_id: &str,
        update: PromiseUpdate,
    ) -> Result<DevelopmentPromise, DatabaseError> {
        if update.progress_percentage.is_some_and(|p| p > 100) {
            return Err(DatabaseError::Validation(
                "progress_percentage must be between 0 and 100".into(),
            ));
        }

        let mut sets = SetClauses::default();
        if let Some(ref title) = update.title {
            sets.push("title", title.clone());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.clone());
        }
        if let Some(ref category) = update.category {
            sets.push("category", category.clone());
        }
        if let Some(progress) = update.progress_percentage {
            sets.push("progress_percentage", i64::from(progress));
        }

        if sets.is_empty() {
            return self.get_promise(promise_id).await;
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("development_promises", "id", promise_id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.audit(
            EntityType::DevelopmentPromise,
            promise_id,
            AuditAction::Updated,
            Some(&update),
        )
        .await?;
        self.get_promise(promise_id).await
    }

    /// Move a promise along its lifecycle. Keeping it sets progress to 100.
    pub async fn transition_promise(
        &self,
        promise_id: &str,
        new_status: PromiseStatus,
        reason: Option<&str>,
    ) -> Result<DevelopmentPromise, DatabaseError> {
        let current = self.get_promise(promise_id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition promise {} from {} to {}",
                promise_id, current.status, new_status
            )));
        }

        let now = Utc::now();
        let progress = if new_status == PromiseStatus::Completed {
            100
        } else {
            current.progress_percentage
        };
        self.db()
            .conn()
            .execute(
                "UPDATE development_promises SET status = ?1, progress_percentage = ?2, updated_at = ?3
                 WHERE id = ?4",
                libsql::params![
                    new_status.as_str(),
                    i64::from(progress),
                    now.to_rfc3339(),
                    promise_id
                ],
            )
            .await?;

        let detail = StatusChangedDetail {
            from: current.status.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: reason.map(String::from),
        };
        self.audit(
            EntityType::DevelopmentPromise,
            promise_id,
            AuditAction::StatusChanged,
            Some(&detail),
        )
        .await?;

        Ok(DevelopmentPromise {
            status: new_status,
            progress_percentage: progress,
            updated_at: now,
            ..current
        })
    }
}
