//! Feature flag repository. Flags are addressed by their unique key.

use chrono::Utc;

use ama_core::audit_detail::ToggledDetail;
use ama_core::entities::FeatureFlag;
use ama_core::enums::{AuditAction, EntityType};
use ama_core::ids::PREFIX_FEATURE_FLAG;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime};
use crate::service::AmaService;

const SELECT_COLS: &str = "id, feature_key, feature_name, category, description, is_enabled, \
     updated_by, created_at, updated_at";

fn row_to_flag(row: &libsql::Row) -> Result<FeatureFlag, DatabaseError> {
    Ok(FeatureFlag {
        id: row.get(0)?,
        feature_key: row.get(1)?,
        feature_name: row.get(2)?,
        category: row.get(3)?,
        description: get_opt_string(row, 4)?,
        is_enabled: get_bool(row, 5)?,
        updated_by: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl AmaService {
    /// Create a flag, or refresh its name, category and description if the
    /// key already exists. The enabled state of an existing flag is kept.
    pub async fn upsert_feature_flag(
        &self,
        feature_key: &str,
        feature_name: &str,
        category: &str,
        description: Option<&str>,
        enabled: bool,
    ) -> Result<FeatureFlag, DatabaseError> {
        let key = feature_key.trim();
        if key.is_empty() {
            return Err(DatabaseError::Validation("feature key must not be empty".into()));
        }

        let now = Utc::now().to_rfc3339();
        let id = self.db().generate_id(PREFIX_FEATURE_FLAG).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO feature_flags ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                     ON CONFLICT (feature_key) DO UPDATE SET
                         feature_name = excluded.feature_name,
                         category = excluded.category,
                         description = excluded.description,
                         updated_by = excluded.updated_by,
                         updated_at = excluded.updated_at"
                ),
                libsql::params![
                    id.as_str(),
                    key,
                    feature_name,
                    category,
                    description,
                    i64::from(enabled),
                    self.actor(),
                    now.as_str(),
                    now.as_str()
                ],
            )
            .await?;

        let flag = self.get_feature_flag(key).await?;
        self.audit::<()>(EntityType::FeatureFlag, &flag.id, AuditAction::Updated, None)
            .await?;
        Ok(flag)
    }

    pub async fn get_feature_flag(&self, feature_key: &str) -> Result<FeatureFlag, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM feature_flags WHERE feature_key = ?1"),
                [feature_key],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_flag(&row)
    }

    /// Whether a feature is on. Unknown keys are off.
    pub async fn is_feature_enabled(&self, feature_key: &str) -> Result<bool, DatabaseError> {
        match self.get_feature_flag(feature_key).await {
            Ok(flag) => Ok(flag.is_enabled),
            Err(DatabaseError::NoResult) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Flip a flag and return its new state.
    pub async fn toggle_feature_flag(&self, feature_key: &str) -> Result<FeatureFlag, DatabaseError> {
        let current = self.get_feature_flag(feature_key).await?;
        self.set_feature_flag(feature_key, !current.is_enabled).await
    }

    pub async fn set_feature_flag(
        &self,
        feature_key: &str,
        enabled: bool,
    ) -> Result<FeatureFlag, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE feature_flags SET is_enabled = ?1, updated_by = ?2, updated_at = ?3
                 WHERE feature_key = ?4",
                libsql::params![
                    i64::from(enabled),
                    self.actor(),
                    Utc::now().to_rfc3339(),
                    feature_key
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        let flag = self.get_feature_flag(feature_key).await?;
        let detail = ToggledDetail {
            feature_key: feature_key.to_string(),
            enabled,
        };
        self.audit(EntityType::FeatureFlag, &flag.id, AuditAction::Toggled, Some(&detail))
            .await?;
        tracing::info!(feature_key, enabled, "feature flag set");
        Ok(flag)
    }

    /// Flags ordered by category then key, optionally for one category.
    pub async fn list_feature_flags(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<FeatureFlag>, DatabaseError> {
        let mut rows = match category {
            Some(category) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM feature_flags WHERE category = ?1
                             ORDER BY feature_key"
                        ),
                        [category],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM feature_flags ORDER BY category, feature_key"
                        ),
                        (),
                    )
                    .await?
            }
        };
        let mut flags = Vec::new();
        while let Some(row) = rows.next().await? {
            flags.push(row_to_flag(&row)?);
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::helpers::{test_service, test_service_as};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_flag_is_disabled() {
        let svc = test_service().await;
        assert!(!svc.is_feature_enabled("civic_actions").await.unwrap());
    }

    #[tokio::test]
    async fn toggle_round_trip() {
        let svc = test_service_as("usr-admin001").await;
        svc.upsert_feature_flag("scorecards", "Official scorecards", "accountability", None, false)
            .await
            .unwrap();

        let on = svc.toggle_feature_flag("scorecards").await.unwrap();
        assert!(on.is_enabled);
        assert_eq!(on.updated_by.as_deref(), Some("usr-admin001"));
        assert!(svc.is_feature_enabled("scorecards").await.unwrap());

        let off = svc.toggle_feature_flag("scorecards").await.unwrap();
        assert!(!off.is_enabled);

        let audits = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Toggled),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(audits.len(), 2);
    }

    #[tokio::test]
    async fn upsert_keeps_enabled_state() {
        let svc = test_service().await;
        let first = svc
            .upsert_feature_flag("feed", "Feed", "social", None, true)
            .await
            .unwrap();
        let second = svc
            .upsert_feature_flag("feed", "Community feed", "social", Some("Posts"), false)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert!(second.is_enabled);
        assert_eq!(second.feature_name, "Community feed");
    }

    #[tokio::test]
    async fn list_by_category() {
        let svc = test_service().await;
        svc.upsert_feature_flag("feed", "Feed", "social", None, true)
            .await
            .unwrap();
        svc.upsert_feature_flag("comments", "Comments", "social", None, true)
            .await
            .unwrap();
        svc.upsert_feature_flag("routing", "Issue routing", "civic", None, false)
            .await
            .unwrap();

        let social = svc.list_feature_flags(Some("social")).await.unwrap();
        let keys: Vec<_> = social.iter().map(|f| f.feature_key.as_str()).collect();
        assert_eq!(keys, vec!["comments", "feed"]);
        assert_eq!(svc.list_feature_flags(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn toggle_unknown_flag() {
        let svc = test_service().await;
        let result = svc.toggle_feature_flag("nope").await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }
}
