//! Government institutions and office-holder claims.
//!
//! A claim starts `pending`; verifying it marks the claimant's profile as a
//! verified official.

use chrono::{NaiveDate, Utc};

use ama_core::audit_detail::StatusChangedDetail;
use ama_core::entities::{GovernmentInstitution, OfficeHolder};
use ama_core::enums::{AuditAction, EntityType, VerificationStatus};
use ama_core::ids::{PREFIX_INSTITUTION, PREFIX_OFFICE_HOLDER};

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, parse_datetime, parse_enum, parse_optional_date,
};
use crate::service::AmaService;

const HOLDER_COLS: &str = "id, user_id, institution_id, division_id, position_title, is_active, \
     verification_status, term_start, term_end, created_at";

fn row_to_institution(row: &libsql::Row) -> Result<GovernmentInstitution, DatabaseError> {
    Ok(GovernmentInstitution {
        id: row.get(0)?,
        name: row.get(1)?,
        institution_type: row.get(2)?,
        division_id: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_holder(row: &libsql::Row) -> Result<OfficeHolder, DatabaseError> {
    Ok(OfficeHolder {
        id: row.get(0)?,
        user_id: row.get(1)?,
        institution_id: get_opt_string(row, 2)?,
        division_id: get_opt_string(row, 3)?,
        position_title: row.get(4)?,
        is_active: get_bool(row, 5)?,
        verification_status: parse_enum(&row.get::<String>(6)?)?,
        term_start: parse_optional_date(get_opt_string(row, 7)?.as_deref())?,
        term_end: parse_optional_date(get_opt_string(row, 8)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

fn date_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Input for [`AmaService::claim_office`].
#[derive(Debug, Clone, Default)]
pub struct NewOfficeHolder {
    pub user_id: String,
    pub position_title: String,
    pub institution_id: Option<String>,
    pub division_id: Option<String>,
    pub term_start: Option<NaiveDate>,
    pub term_end: Option<NaiveDate>,
}

impl AmaService {
    pub async fn create_institution(
        &self,
        name: &str,
        institution_type: &str,
        division_id: Option<&str>,
    ) -> Result<GovernmentInstitution, DatabaseError> {
        if name.trim().is_empty() {
            return Err(DatabaseError::Validation("institution name must not be empty".into()));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_INSTITUTION).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO government_institutions (id, name, institution_type, division_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), name, institution_type, division_id, now.to_rfc3339()],
            )
            .await?;

        self.audit::<()>(EntityType::GovernmentInstitution, &id, AuditAction::Created, None)
            .await?;

        Ok(GovernmentInstitution {
            id,
            name: name.to_string(),
            institution_type: institution_type.to_string(),
            division_id: division_id.map(String::from),
            created_at: now,
        })
    }

    pub async fn get_institution(&self, id: &str) -> Result<GovernmentInstitution, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, institution_type, division_id, created_at
                 FROM government_institutions WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_institution(&row)
    }

    /// Institutions, optionally within one division.
    pub async fn list_institutions(
        &self,
        division_id: Option<&str>,
    ) -> Result<Vec<GovernmentInstitution>, DatabaseError> {
        let mut rows = match division_id {
            Some(division_id) => {
                self.db()
                    .conn()
                    .query(
                        "SELECT id, name, institution_type, division_id, created_at
                         FROM government_institutions WHERE division_id = ?1 ORDER BY name",
                        [division_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        "SELECT id, name, institution_type, division_id, created_at
                         FROM government_institutions ORDER BY name",
                        (),
                    )
                    .await?
            }
        };
        let mut institutions = Vec::new();
        while let Some(row) = rows.next().await? {
            institutions.push(row_to_institution(&row)?);
        }
        Ok(institutions)
    }

    /// File a pending claim to an office.
    pub async fn claim_office(&self, input: NewOfficeHolder) -> Result<OfficeHolder, DatabaseError> {
        if input.position_title.trim().is_empty() {
            return Err(DatabaseError::Validation("position title must not be empty".into()));
        }
        if matches!((input.term_start, input.term_end), (Some(start), Some(end)) if end < start) {
            return Err(DatabaseError::Validation(
                "term_end must not be before term_start".into(),
            ));
        }
        self.get_profile(&input.user_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_OFFICE_HOLDER).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO office_holders ({HOLDER_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    input.user_id.as_str(),
                    input.institution_id.as_deref(),
                    input.division_id.as_deref(),
                    input.position_title.as_str(),
                    VerificationStatus::Pending.as_str(),
                    date_text(input.term_start),
                    date_text(input.term_end),
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.audit::<()>(EntityType::OfficeHolder, &id, AuditAction::Created, None)
            .await?;

        Ok(OfficeHolder {
            id,
            user_id: input.user_id,
            institution_id: input.institution_id,
            division_id: input.division_id,
            position_title: input.position_title,
            is_active: true,
            verification_status: VerificationStatus::Pending,
            term_start: input.term_start,
            term_end: input.term_end,
            created_at: now,
        })
    }

    pub async fn get_office_holder(&self, id: &str) -> Result<OfficeHolder, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {HOLDER_COLS} FROM office_holders WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_holder(&row)
    }

    /// Office holders, optionally filtered by verification status.
    pub async fn list_office_holders(
        &self,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<OfficeHolder>, DatabaseError> {
        let mut rows = match status {
            Some(status) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {HOLDER_COLS} FROM office_holders
                             WHERE verification_status = ?1 ORDER BY created_at, rowid"
                        ),
                        [status.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {HOLDER_COLS} FROM office_holders ORDER BY created_at, rowid"
                        ),
                        (),
                    )
                    .await?
            }
        };
        let mut holders = Vec::new();
        while let Some(row) = rows.next().await? {
            holders.push(row_to_holder(&row)?);
        }
        Ok(holders)
    }

    /// Decide a pending claim. Verification flags the claimant's profile as
    /// a verified official.
    pub async fn verify_office_holder(
        &self,
        holder_id: &str,
        decision: VerificationStatus,
    ) -> Result<OfficeHolder, DatabaseError> {
        let current = self.get_office_holder(holder_id).await?;
        if !current.verification_status.can_transition_to(decision) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot move office claim {} from {} to {}",
                holder_id, current.verification_status, decision
            )));
        }

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "UPDATE office_holders SET verification_status = ?1 WHERE id = ?2",
            [decision.as_str(), holder_id],
        )
        .await?;
        if decision == VerificationStatus::Verified {
            tx.execute(
                "UPDATE profiles SET is_verified_official = 1, updated_at = ?1 WHERE id = ?2",
                libsql::params![Utc::now().to_rfc3339(), current.user_id.as_str()],
            )
            .await?;
        }

        let detail = StatusChangedDetail {
            from: current.verification_status.as_str().to_string(),
            to: decision.as_str().to_string(),
            reason: None,
        };
        self.audit(
            EntityType::OfficeHolder,
            holder_id,
            AuditAction::Verified,
            Some(&detail),
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(holder_id, %decision, "office claim decided");
        Ok(OfficeHolder {
            verification_status: decision,
            ..current
        })
    }

    /// Mark an office holder as no longer serving.
    pub async fn deactivate_office_holder(
        &self,
        holder_id: &str,
    ) -> Result<OfficeHolder, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE office_holders SET is_active = 0 WHERE id = ?1",
                [holder_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        let detail = serde_json::json!({ "is_active": false });
        self.audit(EntityType::OfficeHolder, holder_id, AuditAction::Updated, Some(&detail))
            .await?;
        self.get_office_holder(holder_id).await
    }
}
