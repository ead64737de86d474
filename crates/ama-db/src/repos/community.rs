//! Community repository: groups, membership and member counts.
//!
//! `member_count` moves with `community_members` inside one transaction.

use chrono::Utc;

use ama_core::entities::{Community, CommunityMember};
use ama_core::enums::{AuditAction, EntityType};
use ama_core::ids::PREFIX_COMMUNITY;
use ama_core::responses::MembershipResponse;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_datetime};
use crate::service::AmaService;

const SELECT_COLS: &str = "id, name, display_name, description, category, created_by, member_count, \
     created_at, updated_at";

fn row_to_community(row: &libsql::Row) -> Result<Community, DatabaseError> {
    Ok(Community {
        id: row.get(0)?,
        name: row.get(1)?,
        display_name: row.get(2)?,
        description: get_opt_string(row, 3)?,
        category: row.get(4)?,
        created_by: get_opt_string(row, 5)?,
        member_count: get_u32(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Lowercase slug of ASCII letters, digits, `_` and `-`.
fn normalize_name(name: &str) -> Result<String, DatabaseError> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(DatabaseError::Validation("community name must not be empty".into()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(DatabaseError::Validation(format!(
            "community name '{name}' may only contain letters, digits, '_' and '-'"
        )));
    }
    Ok(name)
}

impl AmaService {
    /// Create a community. A creator becomes its first member.
    pub async fn create_community(
        &self,
        name: &str,
        display_name: &str,
        description: Option<&str>,
        category: &str,
        created_by: Option<&str>,
    ) -> Result<Community, DatabaseError> {
        let name = normalize_name(name)?;
        let display_name = match display_name.trim() {
            "" => name.clone(),
            trimmed => trimmed.to_string(),
        };
        if let Some(creator) = created_by {
            self.get_profile(creator).await?;
        }

        let now = Utc::now().to_rfc3339();
        let id = self.db().generate_id(PREFIX_COMMUNITY).await?;

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "INSERT INTO communities (id, name, display_name, description, category, created_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                id.as_str(),
                name.as_str(),
                display_name.as_str(),
                description,
                category,
                created_by,
                now.as_str(),
                now.as_str()
            ],
        )
        .await?;
        if let Some(creator) = created_by {
            tx.execute(
                "INSERT INTO community_members (community_id, user_id, joined_at) VALUES (?1, ?2, ?3)",
                libsql::params![id.as_str(), creator, now.as_str()],
            )
            .await?;
            tx.execute(
                "UPDATE communities SET member_count = 1 WHERE id = ?1",
                [id.as_str()],
            )
            .await?;
        }
        self.audit::<()>(EntityType::Community, &id, AuditAction::Created, None)
            .await?;
        tx.commit().await?;

        self.get_community(&id).await
    }

    pub async fn get_community(&self, id: &str) -> Result<Community, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM communities WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_community(&row)
    }

    pub async fn get_community_by_name(&self, name: &str) -> Result<Community, DatabaseError> {
        let name = normalize_name(name)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM communities WHERE name = ?1"),
                [name.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_community(&row)
    }

    /// Largest communities first, optionally within one category.
    pub async fn list_communities(
        &self,
        category: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Community>, DatabaseError> {
        let mut rows = match category {
            Some(category) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM communities WHERE category = ?1
                             ORDER BY member_count DESC, name LIMIT ?2"
                        ),
                        libsql::params![category, i64::from(limit)],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM communities
                             ORDER BY member_count DESC, name LIMIT ?1"
                        ),
                        [i64::from(limit)],
                    )
                    .await?
            }
        };
        let mut communities = Vec::new();
        while let Some(row) = rows.next().await? {
            communities.push(row_to_community(&row)?);
        }
        Ok(communities)
    }

    pub async fn is_community_member(
        &self,
        community_id: &str,
        user_id: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM community_members WHERE community_id = ?1 AND user_id = ?2",
                libsql::params![community_id, user_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Members in join order.
    pub async fn list_community_members(
        &self,
        community_id: &str,
        limit: u32,
    ) -> Result<Vec<CommunityMember>, DatabaseError> {
        self.get_community(community_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT community_id, user_id, joined_at FROM community_members
                 WHERE community_id = ?1 ORDER BY joined_at, user_id LIMIT ?2",
                libsql::params![community_id, i64::from(limit)],
            )
            .await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(CommunityMember {
                community_id: row.get(0)?,
                user_id: row.get(1)?,
                joined_at: parse_datetime(&row.get::<String>(2)?)?,
            });
        }
        Ok(members)
    }

    /// Join a community. Joining twice leaves the count unchanged.
    pub async fn join_community(
        &self,
        community_id: &str,
        user_id: &str,
    ) -> Result<MembershipResponse, DatabaseError> {
        self.set_membership(community_id, user_id, true).await
    }

    /// Leave a community. Leaving when not a member leaves the count unchanged.
    pub async fn leave_community(
        &self,
        community_id: &str,
        user_id: &str,
    ) -> Result<MembershipResponse, DatabaseError> {
        self.set_membership(community_id, user_id, false).await
    }

    async fn set_membership(
        &self,
        community_id: &str,
        user_id: &str,
        join: bool,
    ) -> Result<MembershipResponse, DatabaseError> {
        self.get_community(community_id).await?;
        self.get_profile(user_id).await?;

        let tx = self.db().conn().transaction().await?;
        let changed = if join {
            tx.execute(
                "INSERT OR IGNORE INTO community_members (community_id, user_id, joined_at)
                 VALUES (?1, ?2, ?3)",
                libsql::params![community_id, user_id, Utc::now().to_rfc3339()],
            )
            .await?
        } else {
            tx.execute(
                "DELETE FROM community_members WHERE community_id = ?1 AND user_id = ?2",
                libsql::params![community_id, user_id],
            )
            .await?
        };

        if changed > 0 {
            let delta: i64 = if join { 1 } else { -1 };
            tx.execute(
                "UPDATE communities SET member_count = max(0, member_count + ?1), updated_at = ?2
                 WHERE id = ?3",
                libsql::params![delta, Utc::now().to_rfc3339(), community_id],
            )
            .await?;
            let action = if join { AuditAction::Joined } else { AuditAction::Left };
            self.audit::<()>(EntityType::Community, community_id, action, None)
                .await?;
        }
        tx.commit().await?;

        let community = self.get_community(community_id).await?;
        tracing::debug!(community_id, user_id, join, changed, "community membership");
        Ok(MembershipResponse {
            community_id: community.id,
            user_id: user_id.to_string(),
            is_member: join,
            member_count: community.member_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{citizen, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn creator_is_first_member() {
        let svc = test_service().await;
        let founder = citizen(&svc, "achieng").await;
        let community = svc
            .create_community("Kisumu", "Kisumu City", None, "location", Some(&founder.id))
            .await
            .unwrap();

        assert!(community.id.starts_with("com-"));
        assert_eq!(community.name, "kisumu");
        assert_eq!(community.member_count, 1);
        assert!(svc.is_community_member(&community.id, &founder.id).await.unwrap());
        assert_eq!(svc.get_community_by_name("KISUMU").await.unwrap().id, community.id);
    }

    #[tokio::test]
    async fn join_and_leave_track_member_count() {
        let svc = test_service().await;
        let community = svc
            .create_community("roads", "", None, "issue", None)
            .await
            .unwrap();
        assert_eq!(community.display_name, "roads");
        assert_eq!(community.member_count, 0);

        let a = citizen(&svc, "baraka").await;
        let b = citizen(&svc, "chiku").await;
        svc.join_community(&community.id, &a.id).await.unwrap();
        let joined = svc.join_community(&community.id, &b.id).await.unwrap();
        assert!(joined.is_member);
        assert_eq!(joined.member_count, 2);

        let again = svc.join_community(&community.id, &b.id).await.unwrap();
        assert_eq!(again.member_count, 2);

        let left = svc.leave_community(&community.id, &a.id).await.unwrap();
        assert!(!left.is_member);
        assert_eq!(left.member_count, 1);
        let left_again = svc.leave_community(&community.id, &a.id).await.unwrap();
        assert_eq!(left_again.member_count, 1);

        let members = svc.list_community_members(&community.id, 10).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, b.id);
    }

    #[tokio::test]
    async fn list_orders_by_size_and_filters_category() {
        let svc = test_service().await;
        let small = svc
            .create_community("small", "", None, "location", None)
            .await
            .unwrap();
        let big = svc
            .create_community("big", "", None, "location", None)
            .await
            .unwrap();
        svc.create_community("health", "", None, "issue", None)
            .await
            .unwrap();
        for name in ["d1", "d2"] {
            let user = citizen(&svc, name).await;
            svc.join_community(&big.id, &user.id).await.unwrap();
        }

        let located = svc.list_communities(Some("location"), 10).await.unwrap();
        assert_eq!(
            located.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec![big.id.as_str(), small.id.as_str()]
        );
        assert_eq!(svc.list_communities(None, 10).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn invalid_names_and_duplicates_rejected() {
        let svc = test_service().await;
        assert!(matches!(
            svc.create_community("two words", "", None, "general", None).await,
            Err(DatabaseError::Validation(_))
        ));
        svc.create_community("mombasa", "", None, "location", None)
            .await
            .unwrap();
        assert!(svc
            .create_community("Mombasa", "", None, "location", None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn membership_on_missing_community() {
        let svc = test_service().await;
        let user = citizen(&svc, "dalia").await;
        let result = svc.join_community("com-missing0", &user.id).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }
}
