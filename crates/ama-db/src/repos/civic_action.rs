//! Civic action repository: reporting, status lifecycle, history and support.

use chrono::Utc;

use ama_core::audit_detail::StatusChangedDetail;
use ama_core::entities::{CivicAction, CivicActionUpdate};
use ama_core::enums::{
    ActionLevel, AuditAction, CivicActionStatus, EntityType, IssueCategory, Urgency,
};
use ama_core::ids::{PREFIX_ACTION_UPDATE, PREFIX_CIVIC_ACTION, format_case_number};
use ama_core::responses::{CivicActionDetail, TransitionResponse};

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_f64, get_opt_string, get_u32, opt_real, opt_text, parse_datetime,
    parse_enum, parse_optional_enum,
};
use crate::service::AmaService;
use crate::updates::SetClauses;
use crate::updates::civic_action::CivicActionPatch;

const SELECT_COLS: &str = "id, case_number, user_id, category, action_level, title, description, \
     urgency, status, location_text, latitude, longitude, ward_id, constituency_id, county_id, \
     is_public, support_count, created_at, updated_at";

const UPDATE_COLS: &str = "id, action_id, user_id, previous_status, new_status, comment, created_at";

fn row_to_action(row: &libsql::Row) -> Result<CivicAction, DatabaseError> {
    Ok(CivicAction {
        id: row.get(0)?,
        case_number: row.get(1)?,
        user_id: row.get(2)?,
        category: parse_enum(&row.get::<String>(3)?)?,
        action_level: parse_enum(&row.get::<String>(4)?)?,
        title: row.get(5)?,
        description: get_opt_string(row, 6)?,
        urgency: parse_enum(&row.get::<String>(7)?)?,
        status: parse_enum(&row.get::<String>(8)?)?,
        location_text: get_opt_string(row, 9)?,
        latitude: get_opt_f64(row, 10)?,
        longitude: get_opt_f64(row, 11)?,
        ward_id: get_opt_string(row, 12)?,
        constituency_id: get_opt_string(row, 13)?,
        county_id: get_opt_string(row, 14)?,
        is_public: get_bool(row, 15)?,
        support_count: get_u32(row, 16)?,
        created_at: parse_datetime(&row.get::<String>(17)?)?,
        updated_at: parse_datetime(&row.get::<String>(18)?)?,
    })
}

fn row_to_update(row: &libsql::Row) -> Result<CivicActionUpdate, DatabaseError> {
    Ok(CivicActionUpdate {
        id: row.get(0)?,
        action_id: row.get(1)?,
        user_id: get_opt_string(row, 2)?,
        previous_status: parse_optional_enum(get_opt_string(row, 3)?.as_deref())?,
        new_status: parse_enum(&row.get::<String>(4)?)?,
        comment: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Input for [`AmaService::report_civic_action`].
///
/// `action_level` defaults from the category; location ids default from the
/// reporter's profile.
#[derive(Debug, Clone)]
pub struct NewCivicAction {
    pub user_id: String,
    pub category: IssueCategory,
    pub title: String,
    pub description: Option<String>,
    pub urgency: Urgency,
    pub action_level: Option<ActionLevel>,
    pub location_text: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ward_id: Option<String>,
    pub constituency_id: Option<String>,
    pub county_id: Option<String>,
    pub is_public: bool,
}

impl NewCivicAction {
    #[must_use]
    pub fn new(user_id: impl Into<String>, category: IssueCategory, title: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            category,
            title: title.into(),
            description: None,
            urgency: Urgency::Medium,
            action_level: None,
            location_text: None,
            latitude: None,
            longitude: None,
            ward_id: None,
            constituency_id: None,
            county_id: None,
            is_public: true,
        }
    }
}

/// Filter criteria for civic action listings.
#[derive(Debug, Default)]
pub struct CivicActionFilter {
    pub status: Option<CivicActionStatus>,
    pub category: Option<IssueCategory>,
    pub action_level: Option<ActionLevel>,
    pub user_id: Option<String>,
    pub public_only: bool,
    pub limit: Option<u32>,
}

impl AmaService {
    /// File a new civic action in `submitted` status with a fresh case number.
    pub async fn report_civic_action(
        &self,
        input: NewCivicAction,
    ) -> Result<CivicAction, DatabaseError> {
        if input.title.trim().is_empty() {
            return Err(DatabaseError::Validation("civic action title must not be empty".into()));
        }
        for (name, value, bound) in [
            ("latitude", input.latitude, 90.0),
            ("longitude", input.longitude, 180.0),
        ] {
            if value.is_some_and(|v| !(-bound..=bound).contains(&v)) {
                return Err(DatabaseError::Validation(format!("{name} out of range")));
            }
        }

        let reporter = self.get_profile(&input.user_id).await?;
        let ward_id = input.ward_id.or(reporter.ward_id);
        let constituency_id = input.constituency_id.or(reporter.constituency_id);
        let county_id = input.county_id.or(reporter.county_id);
        let action_level = input
            .action_level
            .unwrap_or_else(|| input.category.default_action_level());

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CIVIC_ACTION).await?;
        let case_number = format_case_number(now, &self.db().random_hex(3).await?);

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO civic_actions ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, 0, ?17, ?18)"
                ),
                vec![
                    libsql::Value::from(id.as_str()),
                    case_number.as_str().into(),
                    input.user_id.as_str().into(),
                    input.category.as_str().into(),
                    action_level.as_str().into(),
                    input.title.as_str().into(),
                    opt_text(input.description.as_deref()),
                    input.urgency.as_str().into(),
                    CivicActionStatus::Submitted.as_str().into(),
                    opt_text(input.location_text.as_deref()),
                    opt_real(input.latitude),
                    opt_real(input.longitude),
                    opt_text(ward_id.as_deref()),
                    opt_text(constituency_id.as_deref()),
                    opt_text(county_id.as_deref()),
                    i64::from(input.is_public).into(),
                    now.to_rfc3339().into(),
                    now.to_rfc3339().into(),
                ],
            )
            .await?;

        self.insert_action_update(&id, None, CivicActionStatus::Submitted, None)
            .await?;
        self.audit::<()>(EntityType::CivicAction, &id, AuditAction::Created, None)
            .await?;
        tracing::debug!(%case_number, category = %input.category, "civic action reported");

        Ok(CivicAction {
            id,
            case_number,
            user_id: input.user_id,
            category: input.category,
            action_level,
            title: input.title,
            description: input.description,
            urgency: input.urgency,
            status: CivicActionStatus::Submitted,
            location_text: input.location_text,
            latitude: input.latitude,
            longitude: input.longitude,
            ward_id,
            constituency_id,
            county_id,
            is_public: input.is_public,
            support_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_civic_action(&self, id: &str) -> Result<CivicAction, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM civic_actions WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_action(&row)
    }

    pub async fn get_civic_action_by_case(
        &self,
        case_number: &str,
    ) -> Result<CivicAction, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM civic_actions WHERE case_number = ?1"),
                [case_number.to_ascii_uppercase()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_action(&row)
    }

    /// Action with its progress and full status history.
    pub async fn civic_action_detail(&self, id: &str) -> Result<CivicActionDetail, DatabaseError> {
        let action = self.get_civic_action(id).await?;
        let updates = self.list_civic_action_updates(id).await?;
        Ok(CivicActionDetail {
            progress_percent: action.status.progress_percent(),
            action,
            updates,
        })
    }

    /// Filtered listing, newest first.
    pub async fn list_civic_actions(
        &self,
        filter: &CivicActionFilter,
    ) -> Result<Vec<CivicAction>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            conditions.push(format!("status = ?{}", params.len()));
        }
        if let Some(category) = filter.category {
            params.push(category.as_str().into());
            conditions.push(format!("category = ?{}", params.len()));
        }
        if let Some(level) = filter.action_level {
            params.push(level.as_str().into());
            conditions.push(format!("action_level = ?{}", params.len()));
        }
        if let Some(ref user_id) = filter.user_id {
            params.push(user_id.as_str().into());
            conditions.push(format!("user_id = ?{}", params.len()));
        }
        if filter.public_only {
            conditions.push("is_public = 1".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit = filter.limit.unwrap_or(100);

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM civic_actions {where_clause}
                     ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        let mut actions = Vec::new();
        while let Some(row) = rows.next().await? {
            actions.push(row_to_action(&row)?);
        }
        Ok(actions)
    }

    /// Edit descriptive fields. Status changes go through
    /// [`Self::transition_civic_action`].
    pub async fn update_civic_action(
        &self,
        action_id: &str,
        patch: CivicActionPatch,
    ) -> Result<CivicAction, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(ref title) = patch.title {
            sets.push("title", title.clone());
        }
        if let Some(ref description) = patch.description {
            sets.push("description", description.clone());
        }
        if let Some(category) = patch.category {
            sets.push("category", category.as_str());
        }
        if let Some(urgency) = patch.urgency {
            sets.push("urgency", urgency.as_str());
        }
        if let Some(ref location_text) = patch.location_text {
            sets.push("location_text", location_text.clone());
        }
        if let Some(is_public) = patch.is_public {
            sets.push("is_public", i64::from(is_public));
        }

        if sets.is_empty() {
            return self.get_civic_action(action_id).await;
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("civic_actions", "id", action_id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.audit(EntityType::CivicAction, action_id, AuditAction::Updated, Some(&patch))
            .await?;
        self.get_civic_action(action_id).await
    }

    /// Move an action along its lifecycle, recording the step in its history.
    pub async fn transition_civic_action(
        &self,
        action_id: &str,
        new_status: CivicActionStatus,
        comment: Option<&str>,
    ) -> Result<TransitionResponse, DatabaseError> {
        let current = self.get_civic_action(action_id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition civic action {} from {} to {}",
                action_id, current.status, new_status
            )));
        }

        let tx = self.db().conn().transaction().await?;
        let now = Utc::now();
        tx.execute(
            "UPDATE civic_actions SET status = ?1, updated_at = ?2 WHERE id = ?3",
            libsql::params![new_status.as_str(), now.to_rfc3339(), action_id],
        )
        .await?;

        let update = self
            .insert_action_update(action_id, Some(current.status), new_status, comment)
            .await?;

        let detail = StatusChangedDetail {
            from: current.status.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: comment.map(String::from),
        };
        self.audit(
            EntityType::CivicAction,
            action_id,
            AuditAction::StatusChanged,
            Some(&detail),
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(action_id, from = %current.status, to = %new_status, "civic action transitioned");

        Ok(TransitionResponse {
            previous_status: current.status,
            action: CivicAction {
                status: new_status,
                updated_at: now,
                ..current
            },
            update,
        })
    }

    /// Status history, oldest first.
    pub async fn list_civic_action_updates(
        &self,
        action_id: &str,
    ) -> Result<Vec<CivicActionUpdate>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {UPDATE_COLS} FROM civic_action_updates WHERE action_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [action_id],
            )
            .await?;
        let mut updates = Vec::new();
        while let Some(row) = rows.next().await? {
            updates.push(row_to_update(&row)?);
        }
        Ok(updates)
    }

    /// Toggle a user's support. Returns whether the user now supports the
    /// action, and the new support count.
    pub async fn toggle_civic_action_support(
        &self,
        action_id: &str,
        user_id: &str,
    ) -> Result<(bool, u32), DatabaseError> {
        self.get_civic_action(action_id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM civic_action_supporters WHERE action_id = ?1 AND user_id = ?2",
                [action_id, user_id],
            )
            .await?;
        let already = rows.next().await?.is_some();

        let tx = self.db().conn().transaction().await?;
        if already {
            tx.execute(
                "DELETE FROM civic_action_supporters WHERE action_id = ?1 AND user_id = ?2",
                [action_id, user_id],
            )
            .await?;
            tx.execute(
                "UPDATE civic_actions SET support_count = max(0, support_count - 1) WHERE id = ?1",
                [action_id],
            )
            .await?;
        } else {
            tx.execute(
                "INSERT INTO civic_action_supporters (action_id, user_id, created_at) VALUES (?1, ?2, ?3)",
                libsql::params![action_id, user_id, Utc::now().to_rfc3339()],
            )
            .await?;
            tx.execute(
                "UPDATE civic_actions SET support_count = support_count + 1 WHERE id = ?1",
                [action_id],
            )
            .await?;
        }

        let detail = serde_json::json!({ "user_id": user_id, "supported": !already });
        self.audit(EntityType::CivicAction, action_id, AuditAction::Supported, Some(&detail))
            .await?;
        tx.commit().await?;

        let action = self.get_civic_action(action_id).await?;
        Ok((!already, action.support_count))
    }

    async fn insert_action_update(
        &self,
        action_id: &str,
        previous_status: Option<CivicActionStatus>,
        new_status: CivicActionStatus,
        comment: Option<&str>,
    ) -> Result<CivicActionUpdate, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ACTION_UPDATE).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO civic_action_updates ({UPDATE_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                libsql::params![
                    id.as_str(),
                    action_id,
                    self.actor(),
                    previous_status.map(CivicActionStatus::as_str),
                    new_status.as_str(),
                    comment,
                    now.to_rfc3339()
                ],
            )
            .await?;
        Ok(CivicActionUpdate {
            id,
            action_id: action_id.to_string(),
            user_id: self.actor().map(String::from),
            previous_status,
            new_status,
            comment: comment.map(String::from),
            created_at: now,
        })
    }
}
