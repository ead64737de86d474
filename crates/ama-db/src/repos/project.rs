//! Government project repository.

use chrono::Utc;

use ama_core::audit_detail::StatusChangedDetail;
use ama_core::entities::GovernmentProject;
use ama_core::enums::{AuditAction, EntityType, ProjectStatus};
use ama_core::ids::PREFIX_PROJECT;

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_f64, get_opt_string, get_percent, opt_real, opt_text, parse_datetime,
    parse_enum,
};
use crate::service::AmaService;
use crate::updates::SetClauses;
use crate::updates::project::ProjectUpdate;

const SELECT_COLS: &str = "id, official_id, institution_id, title, description, category, status, \
     progress_percentage, budget_allocated, budget_used, county, constituency, ward, is_verified, \
     created_at, updated_at";

fn row_to_project(row: &libsql::Row) -> Result<GovernmentProject, DatabaseError> {
    Ok(GovernmentProject {
        id: row.get(0)?,
        official_id: get_opt_string(row, 1)?,
        institution_id: get_opt_string(row, 2)?,
        title: row.get(3)?,
        description: get_opt_string(row, 4)?,
        category: get_opt_string(row, 5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        progress_percentage: get_percent(row, 7)?,
        budget_allocated: get_opt_f64(row, 8)?,
        budget_used: get_opt_f64(row, 9)?,
        county: get_opt_string(row, 10)?,
        constituency: get_opt_string(row, 11)?,
        ward: get_opt_string(row, 12)?,
        is_verified: get_bool(row, 13)?,
        created_at: parse_datetime(&row.get::<String>(14)?)?,
        updated_at: parse_datetime(&row.get::<String>(15)?)?,
    })
}

/// Input for [`AmaService::create_project`].
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub official_id: Option<String>,
    pub institution_id: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub budget_allocated: Option<f64>,
    pub county: Option<String>,
    pub constituency: Option<String>,
    pub ward: Option<String>,
}

/// Filter criteria for project listings.
#[derive(Debug, Default)]
pub struct ProjectFilter {
    pub official_id: Option<String>,
    pub status: Option<ProjectStatus>,
    pub county: Option<String>,
    pub verified_only: bool,
    pub limit: Option<u32>,
}

impl AmaService {
    pub async fn create_project(
        &self,
        input: NewProject,
    ) -> Result<GovernmentProject, DatabaseError> {
        if input.title.trim().is_empty() {
            return Err(DatabaseError::Validation("project title must not be empty".into()));
        }
        if input.budget_allocated.is_some_and(|b| b < 0.0) {
            return Err(DatabaseError::Validation("budget must not be negative".into()));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROJECT).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO government_projects (id, official_id, institution_id, title, description,
                 category, status, budget_allocated, county, constituency, ward, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                vec![
                    libsql::Value::from(id.as_str()),
                    opt_text(input.official_id.as_deref()),
                    opt_text(input.institution_id.as_deref()),
                    input.title.as_str().into(),
                    opt_text(input.description.as_deref()),
                    opt_text(input.category.as_deref()),
                    ProjectStatus::Planned.as_str().into(),
                    opt_real(input.budget_allocated),
                    opt_text(input.county.as_deref()),
                    opt_text(input.constituency.as_deref()),
                    opt_text(input.ward.as_deref()),
                    now.to_rfc3339().into(),
                    now.to_rfc3339().into(),
                ],
            )
            .await?;

        self.audit::<()>(EntityType::GovernmentProject, &id, AuditAction::Created, None)
            .await?;

        Ok(GovernmentProject {
            id,
            official_id: input.official_id,
            institution_id: input.institution_id,
            title: input.title,
            description: input.description,
            category: input.category,
            status: ProjectStatus::Planned,
            progress_percentage: 0,
            budget_allocated: input.budget_allocated,
            budget_used: None,
            county: input.county,
            constituency: input.constituency,
            ward: input.ward,
            is_verified: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_project(&self, id: &str) -> Result<GovernmentProject, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM government_projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    pub async fn list_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<GovernmentProject>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref official_id) = filter.official_id {
            params.push(official_id.as_str().into());
            conditions.push(format!("official_id = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            conditions.push(format!("status = ?{}", params.len()));
        }
        if let Some(ref county) = filter.county {
            params.push(county.as_str().into());
            conditions.push(format!("county = ?{}", params.len()));
        }
        if filter.verified_only {
            conditions.push("is_verified = 1".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit = filter.limit.map_or_else(String::new, |l| format!("LIMIT {l}"));

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM government_projects {where_clause}
                     ORDER BY created_at DESC, rowid DESC {limit}"
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        update: ProjectUpdate,
    ) -> Result<GovernmentProject, DatabaseError> {
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
        if let Some(budget) = update.budget_allocated {
            sets.push("budget_allocated", opt_real(budget));
        }
        if let Some(used) = update.budget_used {
            sets.push("budget_used", opt_real(used));
        }
        if let Some(ref official_id) = update.official_id {
            sets.push("official_id", official_id.clone());
        }

        if sets.is_empty() {
            return self.get_project(project_id).await;
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("government_projects", "id", project_id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.audit(
            EntityType::GovernmentProject,
            project_id,
            AuditAction::Updated,
            Some(&update),
        )
        .await?;
        self.get_project(project_id).await
    }

    /// Move a project along its lifecycle. Completing it sets progress to 100.
    pub async fn transition_project(
        &self,
        project_id: &str,
        new_status: ProjectStatus,
        reason: Option<&str>,
    ) -> Result<GovernmentProject, DatabaseError> {
        let current = self.get_project(project_id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition project {} from {} to {}",
                project_id, current.status, new_status
            )));
        }

        let now = Utc::now();
        let progress = if new_status == ProjectStatus::Completed {
            100
        } else {
            current.progress_percentage
        };
        self.db()
            .conn()
            .execute(
                "UPDATE government_projects SET status = ?1, progress_percentage = ?2, updated_at = ?3
                 WHERE id = ?4",
                libsql::params![
                    new_status.as_str(),
                    i64::from(progress),
                    now.to_rfc3339(),
                    project_id
                ],
            )
            .await?;

        let detail = StatusChangedDetail {
            from: current.status.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: reason.map(String::from),
        };
        self.audit(
            EntityType::GovernmentProject,
            project_id,
            AuditAction::StatusChanged,
            Some(&detail),
        )
        .await?;

        Ok(GovernmentProject {
            status: new_status,
            progress_percentage: progress,
            updated_at: now,
            ..current
        })
    }

    /// Mark a project as independently verified.
    pub async fn verify_project(
        &self,
        project_id: &str,
        verified: bool,
    ) -> Result<GovernmentProject, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE government_projects SET is_verified = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(verified), Utc::now().to_rfc3339(), project_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        let detail = serde_json::json!({ "is_verified": verified });
        self.audit(
            EntityType::GovernmentProject,
            project_id,
            AuditAction::Verified,
            Some(&detail),
        )
        .await?;
        self.get_project(project_id).await
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM government_projects WHERE id = ?1", [project_id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.audit::<()>(
            EntityType::GovernmentProject,
            project_id,
            AuditAction::Deleted,
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{official, test_service};
    use crate::updates::project::ProjectUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn new_project(official_id: &str, title: &str) -> NewProject {
        NewProject {
            title: title.to_string(),
            official_id: Some(official_id.to_string()),
            county: Some("Nairobi".into()),
            budget_allocated: Some(1_500_000.0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_and_get() {
        let svc = test_service().await;
        let mp = official(&svc, "mp_kibra").await;
        let project = svc
            .create_project(new_project(&mp.id, "Borehole at Olympic"))
            .await
            .unwrap();
        assert!(project.id.starts_with("prj-"));
        assert_eq!(project.status, ProjectStatus::Planned);
        assert_eq!(svc.get_project(&project.id).await.unwrap(), project);
    }

    #[tokio::test]
    async fn lifecycle_with_delay() {
        let svc = test_service().await;
        let mp = official(&svc, "mp_lang_ata").await;
        let project = svc
            .create_project(new_project(&mp.id, "Market shed"))
            .await
            .unwrap();

        svc.transition_project(&project.id, ProjectStatus::Ongoing, None)
            .await
            .unwrap();
        svc.update_project(
            &project.id,
            ProjectUpdateBuilder::new().progress_percentage(45).build(),
        )
        .await
        .unwrap();
        let delayed = svc
            .transition_project(&project.id, ProjectStatus::Delayed, Some("funds late"))
            .await
            .unwrap();
        assert_eq!(delayed.progress_percentage, 45);
        svc.transition_project(&project.id, ProjectStatus::Ongoing, None)
            .await
            .unwrap();
        let done = svc
            .transition_project(&project.id, ProjectStatus::Completed, None)
            .await
            .unwrap();
        assert_eq!(done.progress_percentage, 100);
        assert_eq!(svc.get_project(&project.id).await.unwrap(), done);
    }

    #[tokio::test]
    async fn cannot_complete_planned() {
        let svc = test_service().await;
        let mp = official(&svc, "mp_embakasi").await;
        let project = svc
            .create_project(new_project(&mp.id, "Footbridge"))
            .await
            .unwrap();
        let result = svc
            .transition_project(&project.id, ProjectStatus::Completed, None)
            .await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
    }

    #[tokio::test]
    async fn progress_over_100_rejected() {
        let svc = test_service().await;
        let mp = official(&svc, "mp_ruaraka").await;
        let project = svc
            .create_project(new_project(&mp.id, "Classrooms"))
            .await
            .unwrap();
        let result = svc
            .update_project(
                &project.id,
                ProjectUpdateBuilder::new().progress_percentage(101).build(),
            )
            .await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn filter_by_official_and_verification() {
        let svc = test_service().await;
        let a = official(&svc, "mp_a").await;
        let b = official(&svc, "mp_b").await;
        let p1 = svc.create_project(new_project(&a.id, "A1")).await.unwrap();
        svc.create_project(new_project(&a.id, "A2")).await.unwrap();
        svc.create_project(new_project(&b.id, "B1")).await.unwrap();
        svc.verify_project(&p1.id, true).await.unwrap();

        let for_a = svc
            .list_projects(&ProjectFilter {
                official_id: Some(a.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(for_a.len(), 2);

        let verified = svc
            .list_projects(&ProjectFilter {
                verified_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].id, p1.id);
    }

    #[tokio::test]
    async fn delete_missing_project() {
        let svc = test_service().await;
        let result = svc.delete_project("prj-missing0").await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }
}
