//! Official scorecards: computed from raw records, cached per official.

use chrono::Utc;

use ama_core::entities::OfficialScorecard;
use ama_core::enums::{AuditAction, EntityType, PromiseStatus, ProjectStatus};
use ama_core::scorecard::{ScorecardInputs, compute_scorecard};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_f64, get_opt_string, get_u32, parse_datetime, parse_enum, parse_optional_enum};
use crate::service::AmaService;

const SELECT_COLS: &str = "user_id, promises_total, promises_kept, promises_broken, \
     promises_in_progress, promise_kept_percent, projects_total, projects_stalled, \
     projects_active, projects_completed, projects_cancelled, attendance_sessions_total, \
     attendance_sessions_present, attendance_percent, total_citizen_queries, queries_responded, \
     avg_response_hours, overall_grade, last_calculated";

fn row_to_scorecard(row: &libsql::Row) -> Result<OfficialScorecard, DatabaseError> {
    Ok(OfficialScorecard {
        user_id: row.get(0)?,
        promises_total: get_u32(row, 1)?,
        promises_kept: get_u32(row, 2)?,
        promises_broken: get_u32(row, 3)?,
        promises_in_progress: get_u32(row, 4)?,
        promise_kept_percent: get_u32(row, 5)?,
        projects_total: get_u32(row, 6)?,
        projects_stalled: get_u32(row, 7)?,
        projects_active: get_u32(row, 8)?,
        projects_completed: get_u32(row, 9)?,
        projects_cancelled: get_u32(row, 10)?,
        attendance_sessions_total: get_u32(row, 11)?,
        attendance_sessions_present: get_u32(row, 12)?,
        attendance_percent: get_u32(row, 13)?,
        total_citizen_queries: get_u32(row, 14)?,
        queries_responded: get_u32(row, 15)?,
        avg_response_hours: get_opt_f64(row, 16)?,
        overall_grade: parse_optional_enum(get_opt_string(row, 17)?.as_deref())?,
        last_calculated: parse_datetime(&row.get::<String>(18)?)?,
    })
}

impl AmaService {
    /// Aggregate every promise, project, sitting and query for an official.
    /// Nothing is written.
    pub async fn compute_official_scorecard(
        &self,
        user_id: &str,
    ) -> Result<OfficialScorecard, DatabaseError> {
        self.get_profile(user_id).await?;

        let promises: Vec<PromiseStatus> = self
            .status_column("development_promises", user_id)
            .await?
            .iter()
            .map(|s| parse_enum(s))
            .collect::<Result<_, _>>()?;
        let projects: Vec<ProjectStatus> = self
            .status_column("government_projects", user_id)
            .await?
            .iter()
            .map(|s| parse_enum(s))
            .collect::<Result<_, _>>()?;
        let attendance: Vec<bool> = self
            .list_attendance(user_id)
            .await?
            .into_iter()
            .map(|s| s.present)
            .collect();
        let queries = self.list_queries_for_official(user_id, false).await?;

        let inputs = ScorecardInputs {
            promises: &promises,
            projects: &projects,
            attendance: &attendance,
            queries: &queries,
        };
        Ok(compute_scorecard(user_id, inputs, Utc::now()))
    }

    /// The cached scorecard if one exists, otherwise a freshly computed one.
    pub async fn get_scorecard(&self, user_id: &str) -> Result<OfficialScorecard, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM official_scorecards WHERE user_id = ?1"),
                [user_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_scorecard(&row),
            None => self.compute_official_scorecard(user_id).await,
        }
    }

    /// Recompute and store the cached scorecard.
    pub async fn refresh_scorecard(
        &self,
        user_id: &str,
    ) -> Result<OfficialScorecard, DatabaseError> {
        let card = self.compute_official_scorecard(user_id).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT OR REPLACE INTO official_scorecards ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
                ),
                vec![
                    libsql::Value::from(card.user_id.as_str()),
                    i64::from(card.promises_total).into(),
                    i64::from(card.promises_kept).into(),
                    i64::from(card.promises_broken).into(),
                    i64::from(card.promises_in_progress).into(),
                    i64::from(card.promise_kept_percent).into(),
                    i64::from(card.projects_total).into(),
                    i64::from(card.projects_stalled).into(),
                    i64::from(card.projects_active).into(),
                    i64::from(card.projects_completed).into(),
                    i64::from(card.projects_cancelled).into(),
                    i64::from(card.attendance_sessions_total).into(),
                    i64::from(card.attendance_sessions_present).into(),
                    i64::from(card.attendance_percent).into(),
                    i64::from(card.total_citizen_queries).into(),
                    i64::from(card.queries_responded).into(),
                    card.avg_response_hours
                        .map_or(libsql::Value::Null, libsql::Value::Real),
                    card.overall_grade
                        .map_or(libsql::Value::Null, |g| g.as_str().into()),
                    card.last_calculated.to_rfc3339().into(),
                ],
            )
            .await?;

        let detail = serde_json::json!({
            "promise_kept_percent": card.promise_kept_percent,
            "overall_grade": card.overall_grade,
        });
        self.audit(EntityType::Scorecard, user_id, AuditAction::Recalculated, Some(&detail))
            .await?;
        tracing::debug!(user_id, grade = ?card.overall_grade, "scorecard refreshed");
        Ok(card)
    }

    async fn status_column(&self, table: &str, official_id: &str) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT status FROM {table} WHERE official_id = ?1"),
                [official_id],
            )
            .await?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next().await? {
            statuses.push(row.get::<String>(0)?);
        }
        Ok(statuses)
    }
}
