//! Attendance sessions for officials. One row per official per sitting date.

use chrono::{NaiveDate, Utc};

use ama_core::entities::AttendanceSession;
use ama_core::enums::{AuditAction, EntityType};
use ama_core::ids::PREFIX_ATTENDANCE;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_date, parse_datetime};
use crate::service::AmaService;

fn row_to_session(row: &libsql::Row) -> Result<AttendanceSession, DatabaseError> {
    Ok(AttendanceSession {
        id: row.get(0)?,
        official_id: row.get(1)?,
        session_date: parse_date(&row.get::<String>(2)?)?,
        present: get_bool(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl AmaService {
    /// Record presence for a sitting. Re-recording the same date overwrites it.
    pub async fn record_attendance(
        &self,
        official_id: &str,
        session_date: NaiveDate,
        present: bool,
    ) -> Result<AttendanceSession, DatabaseError> {
        let id = self.db().generate_id(PREFIX_ATTENDANCE).await?;
        let date = session_date.format("%Y-%m-%d").to_string();
        self.db()
            .conn()
            .execute(
                "INSERT INTO attendance_sessions (id, official_id, session_date, present, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (official_id, session_date) DO UPDATE SET present = excluded.present",
                libsql::params![
                    id.as_str(),
                    official_id,
                    date.as_str(),
                    i64::from(present),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, official_id, session_date, present, created_at FROM attendance_sessions
                 WHERE official_id = ?1 AND session_date = ?2",
                [official_id, date.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let session = row_to_session(&row)?;

        let detail = serde_json::json!({ "session_date": date, "present": present });
        self.audit(
            EntityType::AttendanceSession,
            &session.id,
            AuditAction::Created,
            Some(&detail),
        )
        .await?;
        Ok(session)
    }

    /// Sessions for an official, oldest first.
    pub async fn list_attendance(
        &self,
        official_id: &str,
    ) -> Result<Vec<AttendanceSession>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, official_id, session_date, present, created_at FROM attendance_sessions
                 WHERE official_id = ?1 ORDER BY session_date",
                [official_id],
            )
            .await?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            sessions.push(row_to_session(&row)?);
        }
        Ok(sessions)
    }
}
