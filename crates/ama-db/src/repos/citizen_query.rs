//! Citizen questions to officials and their answers.

use chrono::Utc;

use ama_core::entities::CitizenQuery;
use ama_core::enums::{AuditAction, EntityType};
use ama_core::ids::PREFIX_QUERY;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime};
use crate::service::AmaService;

const SELECT_COLS: &str = "id, official_id, asker_id, question, response, asked_at, responded_at";

fn row_to_query(row: &libsql::Row) -> Result<CitizenQuery, DatabaseError> {
    Ok(CitizenQuery {
        id: row.get(0)?,
        official_id: row.get(1)?,
        asker_id: row.get(2)?,
        question: row.get(3)?,
        response: get_opt_string(row, 4)?,
        asked_at: parse_datetime(&row.get::<String>(5)?)?,
        responded_at: parse_optional_datetime(get_opt_string(row, 6)?.as_deref())?,
    })
}

impl AmaService {
    pub async fn ask_query(
        &self,
        official_id: &str,
        asker_id: &str,
        question: &str,
    ) -> Result<CitizenQuery, DatabaseError> {
        if question.trim().is_empty() {
            return Err(DatabaseError::Validation("question must not be empty".into()));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_QUERY).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO citizen_queries (id, official_id, asker_id, question, asked_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), official_id, asker_id, question, now.to_rfc3339()],
            )
            .await?;

        self.audit::<()>(EntityType::CitizenQuery, &id, AuditAction::Created, None)
            .await?;

        Ok(CitizenQuery {
            id,
            official_id: official_id.to_string(),
            asker_id: asker_id.to_string(),
            question: question.to_string(),
            response: None,
            asked_at: now,
            responded_at: None,
        })
    }

    pub async fn get_query(&self, id: &str) -> Result<CitizenQuery, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM citizen_queries WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_query(&row)
    }

    /// Answer a query once. A second answer is refused.
    pub async fn respond_to_query(
        &self,
        query_id: &str,
        response: &str,
    ) -> Result<CitizenQuery, DatabaseError> {
        if response.trim().is_empty() {
            return Err(DatabaseError::Validation("response must not be empty".into()));
        }
        let current = self.get_query(query_id).await?;
        if current.responded_at.is_some() {
            return Err(DatabaseError::InvalidState(format!(
                "query {query_id} has already been answered"
            )));
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE citizen_queries SET response = ?1, responded_at = ?2 WHERE id = ?3",
                libsql::params![response, now.to_rfc3339(), query_id],
            )
            .await?;

        self.audit::<()>(EntityType::CitizenQuery, query_id, AuditAction::Responded, None)
            .await?;

        Ok(CitizenQuery {
            response: Some(response.to_string()),
            responded_at: Some(now),
            ..current
        })
    }

    /// Queries addressed to an official, newest first.
    pub async fn list_queries_for_official(
        &self,
        official_id: &str,
        unanswered_only: bool,
    ) -> Result<Vec<CitizenQuery>, DatabaseError> {
        let unanswered = if unanswered_only {
            "AND responded_at IS NULL"
        } else {
            ""
        };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM citizen_queries WHERE official_id = ?1 {unanswered}
                     ORDER BY asked_at DESC, rowid DESC"
                ),
                [official_id],
            )
            .await?;
        let mut queries = Vec::new();
        while let Some(row) = rows.next().await? {
            queries.push(row_to_query(&row)?);
        }
        Ok(queries)
    }
}
