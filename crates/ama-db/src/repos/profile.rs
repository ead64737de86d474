//! Profile repository.

use chrono::Utc;

use ama_core::entities::Profile;
use ama_core::enums::{AppRole, AuditAction, EntityType};
use ama_core::ids::PREFIX_PROFILE;
use ama_core::impact::VerificationFlags;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime, parse_enum};
use crate::service::AmaService;
use crate::updates::SetClauses;
use crate::updates::profile::ProfileUpdate;

const SELECT_COLS: &str = "id, username, display_name, role, ward_id, constituency_id, county_id, \
     is_verified_resident, is_verified_user, is_verified_official, created_at, updated_at, \
     (SELECT coalesce(sum(p.upvotes - p.downvotes), 0) FROM posts p WHERE p.author_id = profiles.id), \
     (SELECT coalesce(sum(c.upvotes - c.downvotes), 0) FROM comments c WHERE c.author_id = profiles.id)";

fn row_to_profile(row: &libsql::Row) -> Result<Profile, DatabaseError> {
    let post_karma = row.get::<i64>(12)?;
    let comment_karma = row.get::<i64>(13)?;
    Ok(Profile {
        id: row.get(0)?,
        username: row.get(1)?,
        display_name: get_opt_string(row, 2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        ward_id: get_opt_string(row, 4)?,
        constituency_id: get_opt_string(row, 5)?,
        county_id: get_opt_string(row, 6)?,
        is_verified_resident: get_bool(row, 7)?,
        is_verified_user: get_bool(row, 8)?,
        is_verified_official: get_bool(row, 9)?,
        post_karma,
        comment_karma,
        karma: post_karma + comment_karma,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl AmaService {
    pub async fn create_profile(
        &self,
        username: &str,
        display_name: Option<&str>,
        role: AppRole,
    ) -> Result<Profile, DatabaseError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DatabaseError::Validation("username must not be empty".into()));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROFILE).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO profiles (id, username, display_name, role, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    username,
                    display_name,
                    role.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.audit::<()>(EntityType::Profile, &id, AuditAction::Created, None)
            .await?;

        Ok(Profile {
            id,
            username: username.to_string(),
            display_name: display_name.map(String::from),
            role,
            ward_id: None,
            constituency_id: None,
            county_id: None,
            is_verified_resident: false,
            is_verified_user: false,
            is_verified_official: false,
            post_karma: 0,
            comment_karma: 0,
            karma: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_profile(&self, id: &str) -> Result<Profile, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM profiles WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_profile(&row)
    }

    pub async fn get_profile_by_username(&self, username: &str) -> Result<Profile, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM profiles WHERE username = ?1"),
                [username],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_profile(&row)
    }

    pub async fn list_profiles(&self, limit: u32) -> Result<Vec<Profile>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM profiles ORDER BY created_at DESC LIMIT {limit}"),
                (),
            )
            .await?;
        let mut profiles = Vec::new();
        while let Some(row) = rows.next().await? {
            profiles.push(row_to_profile(&row)?);
        }
        Ok(profiles)
    }

    pub async fn update_profile(
        &self,
        profile_id: &str,
        update: ProfileUpdate,
    ) -> Result<Profile, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(ref display_name) = update.display_name {
            sets.push("display_name", display_name.clone());
        }
        if let Some(role) = update.role {
            sets.push("role", role.as_str());
        }
        if let Some(ref ward_id) = update.ward_id {
            sets.push("ward_id", ward_id.clone());
        }
        if let Some(ref constituency_id) = update.constituency_id {
            sets.push("constituency_id", constituency_id.clone());
        }
        if let Some(ref county_id) = update.county_id {
            sets.push("county_id", county_id.clone());
        }

        if sets.is_empty() {
            return self.get_profile(profile_id).await;
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("profiles", "id", profile_id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.audit(EntityType::Profile, profile_id, AuditAction::Updated, Some(&update))
            .await?;
        self.get_profile(profile_id).await
    }

    /// Overwrite the three verification flags.
    pub async fn set_verification_flags(
        &self,
        profile_id: &str,
        flags: VerificationFlags,
    ) -> Result<Profile, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE profiles SET is_verified_resident = ?1, is_verified_user = ?2,
                 is_verified_official = ?3, updated_at = ?4 WHERE id = ?5",
                libsql::params![
                    i64::from(flags.is_verified_resident),
                    i64::from(flags.is_verified_user),
                    i64::from(flags.is_verified_official),
                    Utc::now().to_rfc3339(),
                    profile_id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        let detail = serde_json::json!({
            "is_verified_resident": flags.is_verified_resident,
            "is_verified_user": flags.is_verified_user,
            "is_verified_official": flags.is_verified_official,
        });
        self.audit(EntityType::Profile, profile_id, AuditAction::Verified, Some(&detail))
            .await?;
        self.get_profile(profile_id).await
    }
}

/// Verification flags as stored on a profile.
#[must_use]
pub const fn verification_flags(profile: &Profile) -> VerificationFlags {
    VerificationFlags {
        is_verified_resident: profile.is_verified_resident,
        is_verified_user: profile.is_verified_user,
        is_verified_official: profile.is_verified_official,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::helpers::test_service;
    use crate::updates::profile::ProfileUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_fetch_profile() {
        let svc = test_service().await;
        let profile = svc
            .create_profile("wanjiku", Some("Wanjiku M."), AppRole::Citizen)
            .await
            .unwrap();
        assert!(profile.id.starts_with("usr-"));

        let by_id = svc.get_profile(&profile.id).await.unwrap();
        assert_eq!(by_id, profile);
        let by_name = svc.get_profile_by_username("wanjiku").await.unwrap();
        assert_eq!(by_name.id, profile.id);
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let svc = test_service().await;
        svc.create_profile("otieno", None, AppRole::Citizen)
            .await
            .unwrap();
        let dup = svc.create_profile("otieno", None, AppRole::Citizen).await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn blank_username_rejected() {
        let svc = test_service().await;
        let result = svc.create_profile("   ", None, AppRole::Citizen).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn update_profile_location() {
        let svc = test_service().await;
        let profile = svc
            .create_profile("achieng", None, AppRole::Citizen)
            .await
            .unwrap();

        let update = ProfileUpdateBuilder::new()
            .location(Some("div-ward0001".into()), None, Some("div-cnty0001".into()))
            .role(AppRole::Journalist)
            .build();
        let updated = svc.update_profile(&profile.id, update).await.unwrap();
        assert_eq!(updated.ward_id.as_deref(), Some("div-ward0001"));
        assert_eq!(updated.constituency_id, None);
        assert_eq!(updated.role, AppRole::Journalist);

        let audits = svc
            .query_audit(&AuditFilter {
                entity_id: Some(profile.id.clone()),
                action: Some(AuditAction::Updated),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(audits.len(), 1);
    }

    #[tokio::test]
    async fn update_missing_profile_is_no_result() {
        let svc = test_service().await;
        let update = ProfileUpdateBuilder::new().display_name(None).build();
        let result = svc.update_profile("usr-missing0", update).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn verification_flags_roundtrip() {
        let svc = test_service().await;
        let profile = svc
            .create_profile("kamau", None, AppRole::Official)
            .await
            .unwrap();
        let flags = VerificationFlags {
            is_verified_resident: true,
            is_verified_user: false,
            is_verified_official: true,
        };
        let updated = svc.set_verification_flags(&profile.id, flags).await.unwrap();
        assert_eq!(verification_flags(&updated), flags);
    }
}
